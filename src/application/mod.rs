//! Application layer - Services coordinating domain state and ports.
//!
//! The refresh driver pulls metrics through the `MetricsSource` port and
//! feeds them to a context on a fixed interval.

pub mod refresh;

pub use refresh::{RefreshDriver, RefreshDriverConfig};
