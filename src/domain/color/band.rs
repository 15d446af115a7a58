//! Ten-band severity classification of the tension axis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ensure_unit_range, ValidationError};

/// Width of every band in tension points.
pub const BAND_WIDTH: f64 = 10.0;

/// Severity band, ordered from calmest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Moderate,
    Elevated,
    High,
    Severe,
    Critical,
    Failure,
}

impl TensionBand {
    /// All bands in ascending severity.
    pub const ALL: [TensionBand; 10] = [
        TensionBand::Excellent,
        TensionBand::VeryGood,
        TensionBand::Good,
        TensionBand::Fair,
        TensionBand::Moderate,
        TensionBand::Elevated,
        TensionBand::High,
        TensionBand::Severe,
        TensionBand::Critical,
        TensionBand::Failure,
    ];

    /// Band for an already validated tension. Each band covers
    /// `(10k, 10k + 10]`, except the first which also includes 0.
    pub(crate) fn for_tension(tension: f64) -> Self {
        let index = ((tension / BAND_WIDTH).ceil() as usize)
            .saturating_sub(1)
            .min(Self::ALL.len() - 1);
        Self::ALL[index]
    }

    /// Zero-based severity rank.
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            TensionBand::Excellent => "excellent",
            TensionBand::VeryGood => "very good",
            TensionBand::Good => "good",
            TensionBand::Fair => "fair",
            TensionBand::Moderate => "moderate",
            TensionBand::Elevated => "elevated",
            TensionBand::High => "high",
            TensionBand::Severe => "severe",
            TensionBand::Critical => "critical",
            TensionBand::Failure => "failure",
        }
    }
}

impl fmt::Display for TensionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a tension value into its severity band.
pub fn classify(tension: f64) -> Result<TensionBand, ValidationError> {
    let tension = ensure_unit_range("tension", tension)?;
    Ok(TensionBand::for_tension(tension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn band_edges() {
        assert_eq!(classify(0.0).unwrap(), TensionBand::Excellent);
        assert_eq!(classify(10.0).unwrap(), TensionBand::Excellent);
        assert_eq!(classify(10.01).unwrap(), TensionBand::VeryGood);
        assert_eq!(classify(50.0).unwrap(), TensionBand::Moderate);
        assert_eq!(classify(90.0).unwrap(), TensionBand::Critical);
        assert_eq!(classify(90.5).unwrap(), TensionBand::Failure);
        assert_eq!(classify(100.0).unwrap(), TensionBand::Failure);
    }

    #[test]
    fn every_band_is_reachable() {
        for (i, band) in TensionBand::ALL.iter().enumerate() {
            let midpoint = i as f64 * BAND_WIDTH + BAND_WIDTH / 2.0;
            assert_eq!(classify(midpoint).unwrap(), *band);
            assert_eq!(band.rank(), i);
        }
    }

    #[test]
    fn classify_rejects_out_of_range() {
        assert!(classify(-0.01).is_err());
        assert!(classify(100.01).is_err());
    }

    #[test]
    fn band_serializes_snake_case() {
        let json = serde_json::to_string(&TensionBand::VeryGood).unwrap();
        assert_eq!(json, "\"very_good\"");
    }

    proptest! {
        #[test]
        fn classification_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo).unwrap() <= classify(hi).unwrap());
        }
    }
}
