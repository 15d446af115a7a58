//! Adapters - Implementations of port interfaces.
//!
//! - `metrics` - Metrics sources (static, in-memory)
//! - `store` - Context registry owning refresh drivers

pub mod metrics;
pub mod store;

pub use metrics::StaticMetricsSource;
pub use store::{InMemoryContextStore, StoreError};
