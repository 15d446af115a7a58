//! Semantic color schemes derived from one base hue.

use serde::{Deserialize, Serialize};

use super::hsl::{hue_from_tension, Hsl};
use crate::domain::foundation::ValidationError;

/// Tension at or above which the alert background/text pair is used.
pub const ALERT_SPLIT: f64 = 50.0;

const CALM_BACKGROUND: &str = "#F8FAFC";
const CALM_TEXT: &str = "#1E293B";
const ALERT_TEXT: &str = "#F1F5F9";

/// Five semantic roles as HEX colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// Builds a scheme: primary on the base hue, secondary on its complement,
/// accent on its triadic partner.
///
/// Below the split the scheme sits on a light neutral background with dark
/// text; from the split upward it switches to a dark background tinted with
/// the base hue and light text.
pub fn scheme_from_tension(tension: f64) -> Result<ColorScheme, ValidationError> {
    let hue = hue_from_tension(tension)?;

    let primary = Hsl::new(hue, 70.0, 50.0)?.to_hex();
    let secondary = Hsl::new(hue + 180.0, 60.0, 45.0)?.to_hex();
    let accent = Hsl::new(hue + 120.0, 80.0, 55.0)?.to_hex();

    let (background, text) = if tension < ALERT_SPLIT {
        (CALM_BACKGROUND.to_string(), CALM_TEXT.to_string())
    } else {
        (Hsl::new(hue, 45.0, 18.0)?.to_hex(), ALERT_TEXT.to_string())
    };

    Ok(ColorScheme {
        primary,
        secondary,
        accent,
        background,
        text,
    })
}
