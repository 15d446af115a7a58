//! Domain layer containing the scoring and color logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (percentages, timestamps, context keys, errors)
//! - `tension` - Metric normalization, weighted scoring, trend and history
//! - `color` - Deterministic color derivation from a tension value
//! - `context` - Per-key state, color memoization and observer fan-out

pub mod color;
pub mod context;
pub mod foundation;
pub mod tension;
