//! Timestamped values for externally fetched market data.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A value together with the time it was fetched.
///
/// Freshness is a pure comparison against a caller-supplied `now`; nothing
/// here reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cached<T> {
    /// The cached value.
    pub data: T,
    /// When the value was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl<T> Cached<T> {
    /// Wraps a value fetched at `fetched_at`.
    pub fn new(data: T, fetched_at: DateTime<Utc>) -> Self {
        Self { data, fetched_at }
    }

    /// Time elapsed since the fetch.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// Returns true if the value is no older than `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) <= ttl
    }

    /// The value, if fresh.
    pub fn fresh(&self, now: DateTime<Utc>, ttl: Duration) -> Option<&T> {
        self.is_fresh(now, ttl).then_some(&self.data)
    }

    /// Replaces the value, returning a new entry stamped `fetched_at`.
    #[must_use]
    pub fn refreshed(self, data: T, fetched_at: DateTime<Utc>) -> Self {
        Self { data, fetched_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_freshness() {
        let fetched = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let spot = Cached::new(36.5, fetched);
        let ttl = Duration::seconds(60);

        assert!(spot.is_fresh(fetched + Duration::seconds(60), ttl));
        assert!(!spot.is_fresh(fetched + Duration::seconds(61), ttl));
        assert_eq!(spot.fresh(fetched + Duration::seconds(30), ttl), Some(&36.5));
        assert_eq!(spot.fresh(fetched + Duration::minutes(5), ttl), None);
    }

    #[test]
    fn test_refreshed() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let t1 = t0 + Duration::minutes(10);
        let spot = Cached::new(36.5, t0).refreshed(36.6, t1);

        assert_eq!(spot.data, 36.6);
        assert_eq!(spot.age(t1), Duration::zero());
    }
}
