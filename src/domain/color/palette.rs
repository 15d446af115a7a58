//! Ten-step shade palettes built around the tension hue.

use serde::{Deserialize, Serialize};

use super::hsl::{hue_from_tension, Hsl};
use crate::domain::foundation::ValidationError;

/// Shade keys, lightest first.
pub const SHADE_KEYS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

const LIGHTEST: f64 = 95.0;
const LIGHTNESS_STEP: f64 = 8.0;

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shade {
    pub key: u16,
    pub saturation: f64,
    pub lightness: f64,
    pub hex: String,
}

/// Shades ordered by key; lightness strictly decreases as the key grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    shades: Vec<Shade>,
}

impl ColorPalette {
    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    /// Looks up the HEX color for a shade key such as `500`.
    pub fn get(&self, key: u16) -> Option<&str> {
        self.shades
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.hex.as_str())
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }
}

fn shade_saturation(index: usize, key: u16) -> f64 {
    if index == 0 {
        30.0
    } else if key >= 700 {
        80.0
    } else {
        70.0
    }
}

/// Builds the ten-shade palette for `tension`.
pub fn palette_from_tension(tension: f64) -> Result<ColorPalette, ValidationError> {
    let hue = hue_from_tension(tension)?;

    let shades = SHADE_KEYS
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            let saturation = shade_saturation(index, key);
            let lightness = LIGHTEST - LIGHTNESS_STEP * index as f64;
            let hex = Hsl::new(hue, saturation, lightness)?.to_hex();
            Ok(Shade {
                key,
                saturation,
                lightness,
                hex,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ColorPalette { shades })
}
