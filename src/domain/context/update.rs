//! Payload delivered to observers after each recomputation.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::color::ColorBundle;
use crate::domain::foundation::ContextKey;
use crate::domain::tension::{Recommendation, TensionResult, Trend};

/// One recomputation of a context: the new score, its colors, the full
/// analysis and the guidance derived from it.
///
/// The bundle and result are shared with the context's caches, so cloning
/// an update is cheap.
#[derive(Debug, Clone, Serialize)]
pub struct TensionUpdate {
    pub key: ContextKey,
    pub score: f64,
    pub trend: Trend,
    pub colors: Arc<ColorBundle>,
    pub result: Arc<TensionResult>,
    pub recommendations: Vec<Recommendation>,
}

impl TensionUpdate {
    pub fn hex(&self) -> &str {
        &self.colors.hex
    }
}
