//! Context Module - Per-key tension state and observer fan-out.
//!
//! A context is identified by a [`ContextKey`](crate::domain::foundation::ContextKey)
//! and owns one analyzer, the latest result, a color memo and its observers.
//! The `lookup` tables describe the backend behind a (type, scope) pair and
//! do not depend on tension at all.

mod lookup;
mod state;
mod update;

pub use lookup::{
    backend_descriptor, metadata_block, BackendDescriptor, ConnectionStatus, MetadataBlock,
};
pub use state::{ContextError, ContextState, Subscription};
pub use update::TensionUpdate;
