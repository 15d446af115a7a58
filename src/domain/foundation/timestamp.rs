//! UTC instant attached to every analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When an analysis ran. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Time elapsed since this instant; zero if it lies in the future.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.0)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// True once more than `max_age` has passed.
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn past_instant_has_positive_age() {
        let ts = Timestamp::from_datetime(Utc::now() - chrono::Duration::seconds(90));
        assert!(ts.age() >= Duration::from_secs(89));
        assert!(ts.is_older_than(Duration::from_secs(60)));
        assert!(!ts.is_older_than(Duration::from_secs(3600)));
    }

    #[test]
    fn future_instant_has_zero_age() {
        let ts = Timestamp::from_datetime(Utc::now() + chrono::Duration::hours(1));
        assert_eq!(ts.age(), Duration::ZERO);
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
        assert!(serde_json::to_string(&ts).unwrap().contains("2024-01-15T10:30:00"));
    }
}
