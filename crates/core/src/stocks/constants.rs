//! Stock data caching constants.

use chrono::{DateTime, Duration, Utc};

/// Cached overviews younger than this are served without contacting the provider.
pub const OVERVIEW_STALENESS_WINDOW: Duration = Duration::hours(24);

/// Whether an entry written at `last_updated_at` is still fresh at `now`.
///
/// Fresh means strictly younger than [`OVERVIEW_STALENESS_WINDOW`].
pub fn is_fresh(last_updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_updated_at < OVERVIEW_STALENESS_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_fresh_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        assert!(is_fresh(now, now));
        assert!(is_fresh(now - Duration::hours(23), now));
        assert!(!is_fresh(now - Duration::hours(24), now));
        assert!(!is_fresh(now - Duration::hours(25), now));
    }
}
