//! Periodic recomputation of contexts.

mod driver;

pub use driver::{RefreshDriver, RefreshDriverConfig};
