//! RefreshDriver - Background service that recomputes one context on a timer.
//!
//! Each driver is the only periodic writer of its context. A tick collects
//! metrics from the configured source and runs a full refresh round, which
//! in turn notifies the context's observers.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 5s | Time between ticks |
//!
//! ## Failures
//!
//! A tick whose source fails is logged and the loop keeps going. The loop
//! ends on the shutdown signal, when the shutdown sender is dropped, or once
//! the context has been torn down.
//!
//! ## Graceful Shutdown
//!
//! The driver exits as soon as the shutdown channel flips to `true`. No
//! final tick is run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::context::{ContextError, ContextState, TensionUpdate};
use crate::ports::MetricsSource;

/// Configuration for a [`RefreshDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshDriverConfig {
    /// Time between ticks.
    pub interval: Duration,
}

impl Default for RefreshDriverConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
        }
    }
}

impl RefreshDriverConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Drives periodic refreshes of a single context.
pub struct RefreshDriver {
    context: Arc<ContextState>,
    source: Arc<dyn MetricsSource>,
    config: RefreshDriverConfig,
}

impl RefreshDriver {
    /// Create a driver with the default interval.
    pub fn new(context: Arc<ContextState>, source: Arc<dyn MetricsSource>) -> Self {
        Self::with_config(context, source, RefreshDriverConfig::default())
    }

    pub fn with_config(
        context: Arc<ContextState>,
        source: Arc<dyn MetricsSource>,
        config: RefreshDriverConfig,
    ) -> Self {
        Self {
            context,
            source,
            config,
        }
    }

    pub fn context(&self) -> &Arc<ContextState> {
        &self.context
    }

    /// Run ticks until the shutdown signal is received or the sender drops.
    ///
    /// Returns the number of successful ticks.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut completed = 0u64;

        info!(
            key = %self.context.key(),
            interval_ms = self.config.interval.as_millis() as u64,
            "Refresh driver started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                _ = interval.tick() => {
                    match self.tick_once().await {
                        Ok(_) => completed += 1,
                        Err(ContextError::TornDown(_)) => {
                            debug!(key = %self.context.key(), "Context torn down, driver exiting");
                            break;
                        }
                        Err(e) => {
                            error!(key = %self.context.key(), error = %e, "Refresh tick failed");
                        }
                    }
                }
            }
        }

        info!(key = %self.context.key(), ticks = completed, "Refresh driver stopped");
        completed
    }

    /// Run exactly one tick (for testing).
    pub async fn tick_once(&self) -> Result<TensionUpdate, ContextError> {
        self.context.tick(self.source.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ContextKey;
    use crate::domain::tension::{AnalyzerSettings, MetricBag, MetricKind};
    use crate::ports::MetricsSourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl MetricsSource for CountingSource {
        async fn collect(&self, _key: &ContextKey) -> Result<MetricBag, MetricsSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MetricsSourceError::CollectionFailed("probe timeout".to_string()));
            }
            Ok(MetricBag::new().with(MetricKind::CpuUsage, 40.0))
        }
    }

    fn context() -> Arc<ContextState> {
        let key = ContextKey::new("storage", "ENTERPRISE", "eu-west").unwrap();
        Arc::new(ContextState::new(key, AnalyzerSettings::default()).unwrap())
    }

    fn fast() -> RefreshDriverConfig {
        RefreshDriverConfig::default().with_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn tick_once_refreshes_context() {
        let context = context();
        let driver = RefreshDriver::new(context.clone(), Arc::new(CountingSource::new(false)));

        let update = driver.tick_once().await.unwrap();

        assert_eq!(update.score, 40.0);
        assert_eq!(context.current().unwrap().score, 40.0);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let context = context();
        let source = Arc::new(CountingSource::new(false));
        let driver = RefreshDriver::with_config(context.clone(), source.clone(), fast());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { driver.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let ticks = handle.await.unwrap();
        assert!(ticks >= 1);
        assert!(!context.history().is_empty());
    }

    #[tokio::test]
    async fn failing_ticks_do_not_stop_the_loop() {
        let source = Arc::new(CountingSource::new(true));
        let driver = RefreshDriver::with_config(context(), source.clone(), fast());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { driver.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(60)).await;
        shutdown_tx.send(true).unwrap();

        assert_eq!(handle.await.unwrap(), 0);
        assert!(source.calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn run_exits_when_context_torn_down() {
        let context = context();
        let driver = RefreshDriver::with_config(
            context.clone(),
            Arc::new(CountingSource::new(false)),
            fast(),
        );
        context.teardown();

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let ticks = tokio::time::timeout(Duration::from_secs(1), driver.run(shutdown_rx))
            .await
            .unwrap();
        assert_eq!(ticks, 0);
    }

    #[tokio::test]
    async fn run_exits_when_sender_dropped() {
        let driver = RefreshDriver::with_config(
            context(),
            Arc::new(CountingSource::new(false)),
            fast(),
        );
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        drop(shutdown_tx);

        let result = tokio::time::timeout(Duration::from_secs(1), driver.run(shutdown_rx)).await;
        assert!(result.is_ok());
    }

    #[test]
    fn config_default_interval() {
        assert_eq!(RefreshDriverConfig::default().interval, Duration::from_secs(5));
    }
}
