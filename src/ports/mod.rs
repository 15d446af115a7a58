//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MetricsSource` - Supplies the metric bag for a context on each tick
//! - `TensionObserver` - Receives every recomputed update of a context

mod metrics_source;
mod tension_observer;

pub use metrics_source::{MetricsSource, MetricsSourceError};
pub use tension_observer::{FnObserver, ObserverError, TensionObserver};
