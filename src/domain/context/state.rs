//! Per-context state: current result, memoized colors and observers.
//!
//! A `ContextState` is shared behind an `Arc` between its driver, the store
//! and any readers. Locks are internal, held only for bookkeeping, and never
//! across an `.await` or an observer callback.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::{debug, error, warn};

use super::lookup::{backend_descriptor, metadata_block, BackendDescriptor, MetadataBlock};
use super::update::TensionUpdate;
use crate::domain::color::ColorBundle;
use crate::domain::foundation::{ContextKey, ValidationError};
use crate::domain::tension::{
    recommendations, AnalyzerError, AnalyzerSettings, MetricBag, Recommendation, TensionAnalyzer,
    TensionResult, Trend,
};
use crate::ports::{FnObserver, MetricsSource, MetricsSourceError, ObserverError, TensionObserver};

/// Errors from context operations.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Context '{0}' has been torn down")]
    TornDown(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Source(#[from] MetricsSourceError),
}

type MemoKey = (u64, Trend);

struct Inner {
    analyzer: TensionAnalyzer,
    current: Option<Arc<TensionResult>>,
    memo: HashMap<MemoKey, Arc<ColorBundle>>,
}

impl Inner {
    fn bundle_for(&mut self, score: f64, trend: Trend) -> Result<Arc<ColorBundle>, ValidationError> {
        let memo_key = (score.to_bits(), trend);
        if let Some(bundle) = self.memo.get(&memo_key) {
            return Ok(Arc::clone(bundle));
        }
        let bundle = Arc::new(ColorBundle::derive(score, trend)?);
        self.memo.insert(memo_key, Arc::clone(&bundle));
        Ok(bundle)
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Arc<dyn TensionObserver>)>,
}

/// Handle returned by [`ContextState::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Removes the observer from future rounds. Returns `false` if it was
    /// already gone (unsubscribed earlier, or the context was torn down).
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = lock(&registry);
        let before = registry.entries.len();
        registry.entries.retain(|(id, _)| *id != self.id);
        registry.entries.len() != before
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// State owned by one context key.
pub struct ContextState {
    key: ContextKey,
    inner: Mutex<Inner>,
    registry: Arc<Mutex<Registry>>,
    torn_down: AtomicBool,
}

impl ContextState {
    /// Creates an empty context with its own analyzer.
    pub fn new(key: ContextKey, settings: AnalyzerSettings) -> Result<Self, ContextError> {
        let analyzer = TensionAnalyzer::new(settings)?;
        Ok(Self {
            key,
            inner: Mutex::new(Inner {
                analyzer,
                current: None,
                memo: HashMap::new(),
            }),
            registry: Arc::new(Mutex::new(Registry::default())),
            torn_down: AtomicBool::new(false),
        })
    }

    pub fn key(&self) -> &ContextKey {
        &self.key
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    fn ensure_live(&self) -> Result<(), ContextError> {
        if self.is_torn_down() {
            return Err(ContextError::TornDown(self.key.to_string()));
        }
        Ok(())
    }

    /// Runs one recomputation round with the given metrics and notifies
    /// every observer registered at the start of the round.
    pub fn refresh(&self, metrics: &MetricBag) -> Result<TensionUpdate, ContextError> {
        self.ensure_live()?;

        let update = {
            let mut inner = lock(&self.inner);
            let result = inner.analyzer.analyze(&self.key.to_string(), metrics);
            inner.memo.clear();
            let colors = inner.bundle_for(result.score, result.trend)?;
            let result = Arc::new(result);
            inner.current = Some(Arc::clone(&result));

            TensionUpdate {
                key: self.key.clone(),
                score: result.score,
                trend: result.trend,
                colors,
                recommendations: recommendations(&result),
                result,
            }
        };

        debug!(
            key = %self.key,
            score = update.score,
            trend = %update.trend,
            hex = %update.colors.hex,
            "Context refreshed"
        );

        self.notify(&update);
        Ok(update)
    }

    /// Collects metrics from `source` and refreshes with them.
    pub async fn tick(&self, source: &dyn MetricsSource) -> Result<TensionUpdate, ContextError> {
        self.ensure_live()?;
        let metrics = source.collect(&self.key).await?;
        self.refresh(&metrics)
    }

    fn notify(&self, update: &TensionUpdate) {
        // Snapshot so observers can (un)subscribe without deadlocking
        let observers: Vec<Arc<dyn TensionObserver>> = lock(&self.registry)
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            match catch_unwind(AssertUnwindSafe(|| observer.on_update(update))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    key = %self.key,
                    observer = observer.name(),
                    error = %e,
                    "Observer failed"
                ),
                Err(payload) => error!(
                    key = %self.key,
                    observer = observer.name(),
                    panic = panic_message(payload.as_ref()),
                    "Observer panicked"
                ),
            }
        }
    }

    /// The latest analysis, if any round has run.
    pub fn current(&self) -> Option<Arc<TensionResult>> {
        lock(&self.inner).current.clone()
    }

    /// True when no round has run yet or the latest one is older than
    /// `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.current()
            .map(|result| result.analyzed_at.is_older_than(max_age))
            .unwrap_or(true)
    }

    /// Color bundle for the current score and trend.
    ///
    /// Repeated calls between rounds return the same shared bundle.
    pub fn colors(&self) -> Result<Option<Arc<ColorBundle>>, ContextError> {
        let mut inner = lock(&self.inner);
        let Some((score, trend)) = inner.current.as_ref().map(|r| (r.score, r.trend)) else {
            return Ok(None);
        };
        Ok(Some(inner.bundle_for(score, trend)?))
    }

    /// Recommendations for the current result; empty before the first round.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.current()
            .map(|result| recommendations(&result))
            .unwrap_or_default()
    }

    /// Score history for this context, oldest first.
    pub fn history(&self) -> Vec<f64> {
        lock(&self.inner).analyzer.history(&self.key.to_string())
    }

    pub fn backend(&self) -> BackendDescriptor {
        backend_descriptor(self.key.context_type(), self.key.scope())
    }

    pub fn metadata(&self) -> MetadataBlock {
        metadata_block(self.key.context_type(), self.key.scope())
    }

    /// Registers an observer for future rounds.
    ///
    /// Subscribing to a torn-down context registers nothing and returns a
    /// handle whose `unsubscribe` reports `false`.
    pub fn subscribe(&self, observer: Arc<dyn TensionObserver>) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;

        if self.is_torn_down() {
            debug!(key = %self.key, observer = observer.name(), "Subscribe after teardown ignored");
        } else {
            registry.entries.push((id, observer));
        }

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Registers a closure as an observer.
    pub fn subscribe_fn<F>(&self, name: impl Into<String>, callback: F) -> Subscription
    where
        F: Fn(&TensionUpdate) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnObserver::new(name, callback)))
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    /// Drops every observer and rejects further rounds. Idempotent.
    pub fn teardown(&self) {
        let was_live = !self.torn_down.swap(true, Ordering::AcqRel);
        let removed = {
            let mut registry = lock(&self.registry);
            std::mem::take(&mut registry.entries).len()
        };
        if was_live {
            debug!(key = %self.key, observers = removed, "Context torn down");
        }
    }
}

impl std::fmt::Debug for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextState")
            .field("key", &self.key)
            .field("torn_down", &self.is_torn_down())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
