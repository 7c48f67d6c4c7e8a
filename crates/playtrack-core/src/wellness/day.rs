//! Calendar-day session counter.
//!
//! Tracks whether "today" already had a session so the repeat-session
//! penalty can be decided on start. The stored count is only meaningful
//! while the stored date equals the current date; any other date means
//! zero sessions today.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zero-padded YYYYMMDD key for a calendar date.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayMarker {
    /// YYYYMMDD of the last recorded session start.
    date: String,
    /// Sessions started on `date`.
    count: u32,
}

impl DayMarker {
    /// Sessions already started today.
    pub fn count_for(&self, today: NaiveDate) -> u32 {
        if self.date == day_key(today) {
            self.count
        } else {
            0
        }
    }

    /// Record a session start and return the count of sessions that had
    /// already started today (>= 1 means the repeat penalty applies).
    pub fn register_start(&mut self, today: NaiveDate) -> u32 {
        let key = day_key(today);
        if self.date == key {
            let prior = self.count;
            self.count += 1;
            prior
        } else {
            self.date = key;
            self.count = 1;
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn key_is_zero_padded() {
        assert_eq!(day_key(date(2026, 3, 7)), "20260307");
    }

    #[test]
    fn first_start_of_day_resets() {
        let mut marker = DayMarker::default();
        assert_eq!(marker.register_start(date(2026, 3, 7)), 0);
        assert_eq!(marker.count_for(date(2026, 3, 7)), 1);
    }

    #[test]
    fn second_start_reports_prior_count() {
        let mut marker = DayMarker::default();
        marker.register_start(date(2026, 3, 7));
        assert_eq!(marker.register_start(date(2026, 3, 7)), 1);
        assert_eq!(marker.count_for(date(2026, 3, 7)), 2);
    }

    #[test]
    fn stale_date_counts_as_zero() {
        let mut marker = DayMarker::default();
        marker.register_start(date(2026, 3, 7));
        marker.register_start(date(2026, 3, 7));
        assert_eq!(marker.count_for(date(2026, 3, 8)), 0);
        assert_eq!(marker.register_start(date(2026, 3, 8)), 0);
        assert_eq!(marker.count_for(date(2026, 3, 8)), 1);
    }
}
