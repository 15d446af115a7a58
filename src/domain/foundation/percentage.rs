//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A whole-number value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0.0,
                100.0,
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a Percentage from a fraction in `[0, 1]`, rounding to the
    /// nearest whole percent. Out-of-range and NaN inputs clamp.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
        Self(pct as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn percentage_try_new_rejects_over_100() {
        match Percentage::try_new(101) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "percentage");
                assert_eq!(actual, 101.0);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Percentage::try_new(100).is_ok());
    }

    #[test]
    fn percentage_from_fraction_rounds_and_clamps() {
        assert_eq!(Percentage::from_fraction(0.0), Percentage::ZERO);
        assert_eq!(Percentage::from_fraction(0.754).value(), 75);
        assert_eq!(Percentage::from_fraction(0.758).value(), 76);
        assert_eq!(Percentage::from_fraction(1.7), Percentage::HUNDRED);
        assert_eq!(Percentage::from_fraction(-0.3), Percentage::ZERO);
        assert_eq!(Percentage::from_fraction(f64::NAN), Percentage::ZERO);
    }

    #[test]
    fn percentage_deserialization_rejects_over_100() {
        let pct: Percentage = serde_json::from_str("100").unwrap();
        assert_eq!(pct, Percentage::HUNDRED);
        let err = serde_json::from_str::<Percentage>("150").unwrap_err();
        assert!(err.to_string().contains("percentage"));
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(format!("{}", Percentage::ZERO), "0%");
    }

    #[test]
    fn percentage_serializes_to_json() {
        let json = serde_json::to_string(&Percentage::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
