//! Metrics Source Adapters
//!
//! - **StaticMetricsSource** - Fixed readings held in memory

mod static_source;

pub use static_source::StaticMetricsSource;
