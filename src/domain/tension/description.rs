//! Human-readable descriptions for band/trend pairs.

use super::analyzer::Trend;
use crate::domain::color::{classify, TensionBand};
use crate::domain::foundation::ValidationError;

fn band_sentence(band: TensionBand) -> &'static str {
    match band {
        TensionBand::Excellent => "Excellent: all systems are operating smoothly",
        TensionBand::VeryGood => "Very good: systems are healthy with minimal load",
        TensionBand::Good => "Good: normal operation with light pressure",
        TensionBand::Fair => "Fair: some pressure is building but service is unaffected",
        TensionBand::Moderate => "Moderate: noticeable strain on one or more resources",
        TensionBand::Elevated => "Elevated: resources are under sustained strain",
        TensionBand::High => "High: degraded performance is likely",
        TensionBand::Severe => "Severe: users are probably affected",
        TensionBand::Critical => "Critical: service is close to failing",
        TensionBand::Failure => "Failure: service is failing or unavailable",
    }
}

fn trend_clause(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "and conditions are improving",
        Trend::Stable => "and conditions are holding steady",
        Trend::Degrading => "and conditions are getting worse",
    }
}

/// Describes a score and trend with a fixed sentence per band/trend pair.
pub fn describe(score: f64, trend: Trend) -> Result<String, ValidationError> {
    let band = classify(score)?;
    Ok(format!("{}, {}.", band_sentence(band), trend_clause(trend)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn describes_calm_stable() {
        assert_eq!(
            describe(4.0, Trend::Stable).unwrap(),
            "Excellent: all systems are operating smoothly, and conditions are holding steady."
        );
    }

    #[test]
    fn describes_failure_degrading() {
        assert_eq!(
            describe(97.0, Trend::Degrading).unwrap(),
            "Failure: service is failing or unavailable, and conditions are getting worse."
        );
    }

    #[test]
    fn every_pair_is_distinct() {
        let mut seen = HashSet::new();
        for band in TensionBand::ALL {
            let score = band.rank() as f64 * 10.0 + 5.0;
            for trend in [Trend::Improving, Trend::Stable, Trend::Degrading] {
                assert!(seen.insert(describe(score, trend).unwrap()));
            }
        }
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn same_band_same_text() {
        assert_eq!(
            describe(41.0, Trend::Improving).unwrap(),
            describe(49.5, Trend::Improving).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_range_score() {
        assert!(describe(120.0, Trend::Stable).is_err());
    }
}
