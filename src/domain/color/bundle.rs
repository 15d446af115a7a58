//! Every color derivation for one (score, trend) pair.

use serde::{Deserialize, Serialize};

use super::band::{classify, TensionBand};
use super::gradient::{
    hex_gradient_from_tension, hsl_gradient_from_tension, GradientOptions, HexGradient,
    HslGradient, DEFAULT_ANGLE,
};
use super::hsl::{hsl_from_tension_default, Hsl};
use super::palette::{palette_from_tension, ColorPalette};
use super::rgb::Rgb;
use super::scheme::{scheme_from_tension, ColorScheme};
use crate::domain::foundation::{ensure_unit_range, ValidationError};
use crate::domain::tension::{describe, Trend};

/// Tension points a trend shifts the colors by.
pub const TREND_SHIFT: f64 = 5.0;

/// Tension fed to the color functions: a degrading trend warms the colors,
/// an improving one cools them, clamped to `[0, 100]`.
pub fn effective_tension(score: f64, trend: Trend) -> Result<f64, ValidationError> {
    let score = ensure_unit_range("score", score)?;
    let shifted = match trend {
        Trend::Improving => score - TREND_SHIFT,
        Trend::Stable => score,
        Trend::Degrading => score + TREND_SHIFT,
    };
    Ok(shifted.clamp(0.0, 100.0))
}

/// Visual representation of a score.
///
/// Colors come from the trend-adjusted tension only, so two inputs that
/// adjust to the same value produce identical colors. The band and
/// description describe the raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBundle {
    pub score: f64,
    pub trend: Trend,
    pub effective_tension: f64,
    pub hsl: Hsl,
    pub hex: String,
    pub rgb: Rgb,
    pub palette: ColorPalette,
    pub scheme: ColorScheme,
    pub hsl_gradient: HslGradient,
    pub hex_gradient: HexGradient,
    pub band: TensionBand,
    pub description: String,
}

impl ColorBundle {
    /// Derives the full bundle, or fails without producing any part of it.
    pub fn derive(score: f64, trend: Trend) -> Result<Self, ValidationError> {
        let tension = effective_tension(score, trend)?;

        let hsl = hsl_from_tension_default(tension)?;
        let rgb = hsl.to_rgb();

        Ok(Self {
            score,
            trend,
            effective_tension: tension,
            hsl,
            hex: rgb.to_hex(),
            rgb,
            palette: palette_from_tension(tension)?,
            scheme: scheme_from_tension(tension)?,
            hsl_gradient: hsl_gradient_from_tension(tension, GradientOptions::default())?,
            hex_gradient: hex_gradient_from_tension(tension, DEFAULT_ANGLE)?,
            band: classify(score)?,
            description: describe(score, trend)?,
        })
    }
}
