//! MetricsSource port - Interface for supplying metric bags to a context.
//!
//! The engine never generates metrics itself. Whatever drives recomputation
//! (a scheduler, a request handler, a test) hands it a source that knows how
//! to collect the current readings for a context key.

use async_trait::async_trait;

use crate::domain::foundation::ContextKey;
use crate::domain::tension::MetricBag;

/// Errors a metrics source may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsSourceError {
    #[error("No metrics available for context: {0}")]
    Unavailable(String),

    #[error("Metrics collection failed: {0}")]
    CollectionFailed(String),
}

/// Port for collecting the current metrics of a context.
///
/// Missing individual signals should be left as `None` in the returned bag
/// rather than reported as errors; errors mean nothing could be collected.
///
/// # Example
///
/// ```ignore
/// let bag = source.collect(&key).await?;
/// context.refresh(&bag)?;
/// ```
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Collect the latest readings for `key`.
    async fn collect(&self, key: &ContextKey) -> Result<MetricBag, MetricsSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn MetricsSource) {}

    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn metrics_source_is_send_sync() {
        #[allow(dead_code)]
        fn check<T: MetricsSource>() {
            assert_send_sync::<T>();
        }
        assert_send_sync::<std::sync::Arc<dyn MetricsSource>>();
    }

    #[test]
    fn errors_display_context() {
        let err = MetricsSourceError::Unavailable("api/DEVELOPMENT/localhost".to_string());
        assert_eq!(
            err.to_string(),
            "No metrics available for context: api/DEVELOPMENT/localhost"
        );
    }
}
