//! In-Memory Context Store Adapter
//!
//! Holds every live context and at most one refresh driver per context.
//! The store is an explicit object passed to whoever needs it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::{RefreshDriver, RefreshDriverConfig};
use crate::domain::context::{ContextError, ContextState};
use crate::domain::foundation::ContextKey;
use crate::domain::tension::{AnalyzerError, AnalyzerSettings};
use crate::ports::MetricsSource;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A refresh driver is already running for context '{0}'")]
    DriverAlreadyRunning(String),

    #[error("Refresh interval must be greater than zero")]
    ZeroInterval,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

struct DriverHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

/// Registry of contexts keyed by (type, scope, domain).
pub struct InMemoryContextStore {
    settings: AnalyzerSettings,
    contexts: RwLock<HashMap<ContextKey, Arc<ContextState>>>,
    drivers: RwLock<HashMap<ContextKey, DriverHandle>>,
}

impl InMemoryContextStore {
    /// Create an empty store whose contexts use `settings`.
    pub fn new(settings: AnalyzerSettings) -> Result<Self, StoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            contexts: RwLock::new(HashMap::new()),
            drivers: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the context for `key`, creating it on first use.
    pub async fn get_or_create(&self, key: &ContextKey) -> Result<Arc<ContextState>, StoreError> {
        if let Some(context) = self.contexts.read().await.get(key) {
            return Ok(Arc::clone(context));
        }

        let mut contexts = self.contexts.write().await;
        // Another caller may have created it between the two locks
        if let Some(context) = contexts.get(key) {
            return Ok(Arc::clone(context));
        }
        let context = Arc::new(ContextState::new(key.clone(), self.settings.clone())?);
        contexts.insert(key.clone(), Arc::clone(&context));
        debug!(key = %key, "Context created");
        Ok(context)
    }

    pub async fn get(&self, key: &ContextKey) -> Option<Arc<ContextState>> {
        self.contexts.read().await.get(key).cloned()
    }

    /// Keys of all live contexts, sorted.
    pub async fn keys(&self) -> Vec<ContextKey> {
        let mut keys: Vec<ContextKey> = self.contexts.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contexts.read().await.is_empty()
    }

    /// True while a driver task for `key` is alive.
    pub async fn has_driver(&self, key: &ContextKey) -> bool {
        self.drivers
            .read()
            .await
            .get(key)
            .map(|handle| !handle.task.is_finished())
            .unwrap_or(false)
    }

    /// Starts a background driver refreshing `key` every `interval`.
    ///
    /// Must be called from within a tokio runtime. Fails if a driver is
    /// already running for the key; a driver that has exited on its own is
    /// replaced.
    pub async fn spawn_driver(
        &self,
        key: &ContextKey,
        source: Arc<dyn MetricsSource>,
        interval: Duration,
    ) -> Result<Arc<ContextState>, StoreError> {
        if interval.is_zero() {
            return Err(StoreError::ZeroInterval);
        }

        let context = self.get_or_create(key).await?;
        let mut drivers = self.drivers.write().await;
        if let Some(existing) = drivers.get(key) {
            if !existing.task.is_finished() {
                return Err(StoreError::DriverAlreadyRunning(key.to_string()));
            }
        }

        let driver = RefreshDriver::with_config(
            Arc::clone(&context),
            source,
            RefreshDriverConfig::default().with_interval(interval),
        );
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { driver.run(shutdown_rx).await });

        drivers.insert(key.clone(), DriverHandle { shutdown, task });
        info!(key = %key, interval_ms = interval.as_millis() as u64, "Refresh driver spawned");
        Ok(context)
    }

    /// Stops the driver for `key`, if any, without removing the context.
    pub async fn stop_driver(&self, key: &ContextKey) -> bool {
        let handle = self.drivers.write().await.remove(key);
        match handle {
            Some(handle) => {
                Self::stop(key, handle).await;
                true
            }
            None => false,
        }
    }

    async fn stop(key: &ContextKey, handle: DriverHandle) {
        // The driver may already have exited; a closed channel is fine
        let _ = handle.shutdown.send(true);
        match handle.task.await {
            Ok(ticks) => debug!(key = %key, ticks, "Refresh driver joined"),
            Err(e) => warn!(key = %key, error = %e, "Refresh driver task failed"),
        }
    }

    /// Stops the driver, tears the context down and forgets it.
    ///
    /// Returns `false` if no context existed for `key`.
    pub async fn teardown(&self, key: &ContextKey) -> bool {
        self.stop_driver(key).await;

        let removed = self.contexts.write().await.remove(key);
        match removed {
            Some(context) => {
                context.teardown();
                info!(key = %key, "Context removed");
                true
            }
            None => false,
        }
    }

    /// Tears down every context. Returns how many were removed.
    pub async fn teardown_all(&self) -> usize {
        let handles: Vec<(ContextKey, DriverHandle)> =
            self.drivers.write().await.drain().collect();
        for (key, handle) in handles {
            Self::stop(&key, handle).await;
        }

        let contexts: Vec<Arc<ContextState>> =
            self.contexts.write().await.drain().map(|(_, c)| c).collect();
        for context in &contexts {
            context.teardown();
        }
        info!(count = contexts.len(), "All contexts removed");
        contexts.len()
    }
}

impl std::fmt::Debug for InMemoryContextStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContextStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
