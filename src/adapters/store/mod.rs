//! Context Store Adapters
//!
//! - **InMemoryContextStore** - Live contexts and their refresh drivers

mod in_memory;

pub use in_memory::{InMemoryContextStore, StoreError};
