//! Two-stop linear gradients for tension backgrounds.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::hsl::{display_number, hex_from_tension, hue_from_tension, Hsl};
use crate::domain::foundation::{ensure_unit_range, ValidationError};

/// Default gradient angle in degrees.
pub const DEFAULT_ANGLE: f64 = 135.0;

/// Degrees the end stop drifts toward red.
const HUE_DRIFT: f64 = 30.0;

/// Tension points added for the end stop of a HEX gradient.
const HEX_END_OFFSET: f64 = 20.0;

/// Overrides for [`hsl_gradient_from_tension`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientOptions {
    pub angle: f64,
    pub start_saturation: f64,
    pub end_saturation: f64,
    pub start_lightness: f64,
    pub end_lightness: f64,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            angle: DEFAULT_ANGLE,
            start_saturation: 80.0,
            end_saturation: 80.0,
            start_lightness: 60.0,
            end_lightness: 40.0,
        }
    }
}

impl GradientOptions {
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Gradient whose stops are HSL colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HslGradient {
    pub angle: f64,
    pub start: Hsl,
    pub end: Hsl,
}

/// Gradient whose stops are HEX colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexGradient {
    pub angle: f64,
    pub start: String,
    pub end: String,
}

impl fmt::Display for HslGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear-gradient({}deg, {}, {})",
            display_number(self.angle),
            self.start,
            self.end
        )
    }
}

impl fmt::Display for HexGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear-gradient({}deg, {}, {})",
            display_number(self.angle),
            self.start,
            self.end
        )
    }
}

fn ensure_angle(angle: f64) -> Result<f64, ValidationError> {
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(ValidationError::invalid_format("angle", "must be a finite number"))
    }
}

/// Builds an HSL gradient from the base hue to a hue up to 30 degrees
/// closer to red, clamped at 0.
pub fn hsl_gradient_from_tension(
    tension: f64,
    options: GradientOptions,
) -> Result<HslGradient, ValidationError> {
    let start_hue = hue_from_tension(tension)?;
    let angle = ensure_angle(options.angle)?;
    ensure_unit_range("start_saturation", options.start_saturation)?;
    ensure_unit_range("end_saturation", options.end_saturation)?;
    ensure_unit_range("start_lightness", options.start_lightness)?;
    ensure_unit_range("end_lightness", options.end_lightness)?;

    let end_hue = (start_hue - HUE_DRIFT).max(0.0);

    Ok(HslGradient {
        angle,
        start: Hsl::new(start_hue, options.start_saturation, options.start_lightness)?,
        end: Hsl::new(end_hue, options.end_saturation, options.end_lightness)?,
    })
}

/// Builds a HEX gradient from `tension` to `tension + 20` (capped at 100).
pub fn hex_gradient_from_tension(tension: f64, angle: f64) -> Result<HexGradient, ValidationError> {
    let angle = ensure_angle(angle)?;
    let start = hex_from_tension(tension)?;
    let end = hex_from_tension((tension + HEX_END_OFFSET).min(100.0))?;
    Ok(HexGradient { angle, start, end })
}
