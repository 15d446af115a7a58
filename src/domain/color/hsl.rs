//! HSL color values and the tension-to-hue mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::rgb::Rgb;
use crate::domain::foundation::{ensure_unit_range, ValidationError};

/// Hue at tension 0 (green).
pub const CALM_HUE: f64 = 120.0;

/// Degrees of hue lost per point of tension; tension 100 lands on 0 (red).
pub const HUE_PER_TENSION: f64 = 1.2;

/// Saturation used when the caller does not override it.
pub const DEFAULT_SATURATION: f64 = 70.0;

/// Lightness used when the caller does not override it.
pub const DEFAULT_LIGHTNESS: f64 = 50.0;

/// A color in hue/saturation/lightness space.
///
/// Hue is in degrees `[0, 360)`; saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHsl")]
pub struct Hsl {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

/// Unchecked wire form; deserialization goes through [`Hsl::new`].
#[derive(Deserialize)]
struct RawHsl {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl TryFrom<RawHsl> for Hsl {
    type Error = ValidationError;

    fn try_from(raw: RawHsl) -> Result<Self, Self::Error> {
        Hsl::new(raw.hue, raw.saturation, raw.lightness)
    }
}

impl Hsl {
    /// Creates an HSL color. Hue is wrapped into `[0, 360)`; saturation and
    /// lightness must lie in `[0, 100]`.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Result<Self, ValidationError> {
        if !hue.is_finite() {
            return Err(ValidationError::invalid_format("hue", "must be a finite number"));
        }
        let saturation = ensure_unit_range("saturation", saturation)?;
        let lightness = ensure_unit_range("lightness", lightness)?;
        Ok(Self {
            hue: hue.rem_euclid(360.0),
            saturation,
            lightness,
        })
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Converts to RGB through chroma, the secondary component and the
    /// lightness offset, picking channels by 60-degree hue sector.
    pub fn to_rgb(&self) -> Rgb {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((self.hue / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match self.hue {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Shorthand for `to_rgb().to_hex()`.
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Rounds to two decimals so formatted output stays short and stable.
pub(crate) fn display_number(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            display_number(self.hue),
            display_number(self.saturation),
            display_number(self.lightness)
        )
    }
}

/// Maps a validated tension onto the green-to-red hue axis.
pub(crate) fn hue_for(tension: f64) -> f64 {
    CALM_HUE - tension * HUE_PER_TENSION
}

/// Returns the base hue for `tension`.
pub fn hue_from_tension(tension: f64) -> Result<f64, ValidationError> {
    let tension = ensure_unit_range("tension", tension)?;
    Ok(hue_for(tension))
}

/// Derives an HSL color from tension with explicit saturation and lightness.
pub fn hsl_from_tension(
    tension: f64,
    saturation: f64,
    lightness: f64,
) -> Result<Hsl, ValidationError> {
    let hue = hue_from_tension(tension)?;
    Hsl::new(hue, saturation, lightness)
}

/// Derives an HSL color from tension at saturation 70 and lightness 50.
pub fn hsl_from_tension_default(tension: f64) -> Result<Hsl, ValidationError> {
    hsl_from_tension(tension, DEFAULT_SATURATION, DEFAULT_LIGHTNESS)
}

/// Derives the `#RRGGBB` color for tension at saturation 70 and lightness 50.
pub fn hex_from_tension(tension: f64) -> Result<String, ValidationError> {
    Ok(hsl_from_tension_default(tension)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tension_zero_is_green_hue() {
        let hsl = hsl_from_tension_default(0.0).unwrap();
        assert_eq!(hsl.hue(), 120.0);
        assert_eq!(hsl.to_string(), "hsl(120, 70%, 50%)");
    }

    #[test]
    fn tension_hundred_is_red_hue() {
        let hsl = hsl_from_tension_default(100.0).unwrap();
        assert_eq!(hsl.hue(), 0.0);
    }

    #[test]
    fn fractional_hue_formats_compactly() {
        let hsl = hsl_from_tension(14.5, 65.0, 45.0).unwrap();
        assert_eq!(hsl.to_string(), "hsl(102.6, 65%, 45%)");
    }

    #[test]
    fn hex_matches_known_values() {
        assert_eq!(hex_from_tension(0.0).unwrap(), "#26D926");
        assert_eq!(hex_from_tension(50.0).unwrap(), "#D9D926");
        assert_eq!(hex_from_tension(100.0).unwrap(), "#D92626");
    }

    #[test]
    fn green_and_red_families() {
        let green = hsl_from_tension_default(0.0).unwrap().to_rgb();
        assert!(green.g() > green.r() && green.g() > green.b());

        let red = hsl_from_tension_default(100.0).unwrap().to_rgb();
        assert!(red.r() > red.g() && red.r() > red.b());
    }

    #[test]
    fn out_of_range_tension_is_rejected() {
        let err = hsl_from_tension_default(150.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::out_of_range("tension", 0.0, 100.0, 150.0)
        );
        assert!(hex_from_tension(-1.0).is_err());
        assert!(hex_from_tension(f64::NAN).is_err());
    }

    #[test]
    fn out_of_range_saturation_and_lightness_are_rejected() {
        assert_eq!(
            hsl_from_tension(10.0, 101.0, 50.0).unwrap_err().field(),
            "saturation"
        );
        assert_eq!(
            hsl_from_tension(10.0, 70.0, -5.0).unwrap_err().field(),
            "lightness"
        );
    }

    #[test]
    fn hue_wraps_into_circle() {
        assert_eq!(Hsl::new(480.0, 50.0, 50.0).unwrap().hue(), 120.0);
        assert_eq!(Hsl::new(-30.0, 50.0, 50.0).unwrap().hue(), 330.0);
        assert!(Hsl::new(f64::INFINITY, 50.0, 50.0).is_err());
    }

    #[test]
    fn grey_when_unsaturated() {
        let rgb = Hsl::new(200.0, 0.0, 50.0).unwrap().to_rgb();
        assert_eq!((rgb.r(), rgb.g(), rgb.b()), (128, 128, 128));
    }

    #[test]
    fn every_sector_converts() {
        let expected = [
            (30.0, "#D98026"),
            (90.0, "#80D926"),
            (150.0, "#26D980"),
            (210.0, "#2680D9"),
            (270.0, "#8026D9"),
            (330.0, "#D92680"),
        ];
        for (hue, hex) in expected {
            assert_eq!(Hsl::new(hue, 70.0, 50.0).unwrap().to_hex(), hex, "hue {}", hue);
        }
    }

    #[test]
    fn deserialization_validates_components() {
        let ok: Hsl =
            serde_json::from_str(r#"{"hue":90.0,"saturation":70.0,"lightness":50.0}"#).unwrap();
        assert_eq!(ok, Hsl::new(90.0, 70.0, 50.0).unwrap());

        let err = serde_json::from_str::<Hsl>(
            r#"{"hue":90.0,"saturation":500.0,"lightness":50.0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("saturation"));

        let wrapped: Hsl =
            serde_json::from_str(r#"{"hue":-30.0,"saturation":70.0,"lightness":50.0}"#).unwrap();
        assert_eq!(wrapped.hue(), 330.0);
    }
}
