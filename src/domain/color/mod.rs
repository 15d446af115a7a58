//! Color Module - Deterministic color derivation from tension.
//!
//! Tension 0 maps to hue 120 (green) and tension 100 to hue 0 (red). Every
//! function here is pure and validates its numeric inputs before producing
//! anything, so callers either get a complete value or a `ValidationError`.
//!
//! # Components
//!
//! - `Hsl` / `Rgb` - Color values and the HSL to RGB conversion
//! - `palette_from_tension` - Ten shades, lightest to darkest
//! - `scheme_from_tension` - Primary, complementary, triadic and surface roles
//! - `hsl_gradient_from_tension` / `hex_gradient_from_tension` - CSS gradients
//! - `classify` - Ten-band severity classification
//! - `ColorBundle` - All of the above for one (score, trend) pair

mod band;
mod bundle;
mod gradient;
mod hsl;
mod palette;
mod rgb;
mod scheme;

pub use band::{classify, TensionBand, BAND_WIDTH};
pub use bundle::{effective_tension, ColorBundle, TREND_SHIFT};
pub use gradient::{
    hex_gradient_from_tension, hsl_gradient_from_tension, GradientOptions, HexGradient,
    HslGradient, DEFAULT_ANGLE,
};
pub use hsl::{
    hex_from_tension, hsl_from_tension, hsl_from_tension_default, hue_from_tension, Hsl,
    DEFAULT_LIGHTNESS, DEFAULT_SATURATION,
};
pub use palette::{palette_from_tension, ColorPalette, Shade, SHADE_KEYS};
pub use rgb::{rgb_from_hex, Rgb};
pub use scheme::{scheme_from_tension, ColorScheme, ALERT_SPLIT};
