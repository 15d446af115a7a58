//! RGB triples and HEX parsing/formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Formats as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parses a `#RRGGBB` string (either case) into an RGB triple.
///
/// Anything other than `#` followed by exactly six hex digits is rejected.
pub fn rgb_from_hex(hex: &str) -> Result<Rgb, ValidationError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| {
            ValidationError::invalid_format(
                "hex",
                format!("expected '#' followed by 6 hex digits, got '{}'", hex),
            )
        })?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| ValidationError::invalid_format("hex", e.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upper_and_lower_case() {
        assert_eq!(rgb_from_hex("#26D926").unwrap(), Rgb::new(38, 217, 38));
        assert_eq!(rgb_from_hex("#ff00a0").unwrap(), Rgb::new(255, 0, 160));
    }

    #[test]
    fn formats_hex_and_display() {
        let rgb = Rgb::new(217, 38, 38);
        assert_eq!(rgb.to_hex(), "#D92626");
        assert_eq!(rgb.to_string(), "rgb(217, 38, 38)");
    }

    #[test]
    fn hex_roundtrips_through_parse() {
        let rgb = Rgb::new(1, 128, 254);
        assert_eq!(rgb_from_hex(&rgb.to_hex()).unwrap(), rgb);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "#", "26D926", "#26D92", "#26D9266", "#GGGGGG", "# 6D926", "#+1D926"] {
            let err = rgb_from_hex(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "hex"),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        assert!(rgb_from_hex("#ééé").is_err());
    }
}
