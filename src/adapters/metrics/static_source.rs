//! Static Metrics Source Adapter
//!
//! Serves fixed metric bags from memory. Useful for tests, demos and for
//! hosts that push readings in rather than having the engine pull them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ContextKey;
use crate::domain::tension::MetricBag;
use crate::ports::{MetricsSource, MetricsSourceError};

/// In-memory metrics with an optional fallback bag for unknown keys.
#[derive(Debug, Clone, Default)]
pub struct StaticMetricsSource {
    fallback: Option<MetricBag>,
    bags: Arc<RwLock<HashMap<ContextKey, MetricBag>>>,
}

impl StaticMetricsSource {
    /// Create a source with no readings at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that answers every key with `bag` unless overridden.
    pub fn with_fallback(bag: MetricBag) -> Self {
        Self {
            fallback: Some(bag),
            bags: Arc::default(),
        }
    }

    /// Replace the readings for `key`.
    pub async fn set(&self, key: ContextKey, bag: MetricBag) {
        self.bags.write().await.insert(key, bag);
    }

    /// Remove the readings for `key`, returning them if present.
    pub async fn remove(&self, key: &ContextKey) -> Option<MetricBag> {
        self.bags.write().await.remove(key)
    }
}

#[async_trait]
impl MetricsSource for StaticMetricsSource {
    async fn collect(&self, key: &ContextKey) -> Result<MetricBag, MetricsSourceError> {
        if let Some(bag) = self.bags.read().await.get(key) {
            return Ok(bag.clone());
        }
        self.fallback
            .clone()
            .ok_or_else(|| MetricsSourceError::Unavailable(key.to_string()))
    }
}
