//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the tension engine.

mod context_key;
mod errors;
mod percentage;
mod timestamp;

pub use context_key::ContextKey;
pub use errors::{ensure_unit_range, ValidationError};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
