//! Time bucketing utilities for stats aggregation
//!
//! Month buckets are stored as "YYYY-MM" strings in the stats index and
//! handled as first-of-month `NaiveDate`s everywhere else.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Compute the month bucket string from a Unix timestamp in milliseconds.
///
/// Returns `None` for timestamps chrono cannot represent.
///
/// # Example
/// ```
/// use fieldcri::stats::month_bucket;
///
/// assert_eq!(month_bucket(1703721600000).as_deref(), Some("2023-12"));
/// ```
pub fn month_bucket(timestamp_ms: i64) -> Option<String> {
    let dt = DateTime::from_timestamp_millis(timestamp_ms)?;
    Some(format!("{:04}-{:02}", dt.year(), dt.month()))
}

/// Format a month as its bucket string
pub fn format_month_bucket(month: NaiveDate) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

/// Parse a month bucket string back to the first day of that month.
pub fn parse_month_bucket(bucket: &str) -> Option<NaiveDate> {
    let (year, month) = bucket.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// The trailing `months_back` calendar months ending with the month of
/// `now`, oldest first.
pub fn trailing_months(now: DateTime<Utc>, months_back: u32) -> Vec<NaiveDate> {
    let current = month_start(now.date_naive());
    (0..months_back)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bucket() {
        // 2023-12-28 12:34:56 UTC
        let ts = 1703766896000i64;
        assert_eq!(month_bucket(ts).as_deref(), Some("2023-12"));
    }

    #[test]
    fn test_parse_month_bucket() {
        assert_eq!(parse_month_bucket("2024-02"), Some(date(2024, 2, 1)));
        assert_eq!(parse_month_bucket("2024-13"), None);
        assert_eq!(parse_month_bucket("garbage"), None);
        assert_eq!(parse_month_bucket(&format_month_bucket(date(2025, 7, 19))), Some(date(2025, 7, 1)));
    }

    #[test]
    fn test_trailing_months_cross_year() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap();
        let months = trailing_months(now, 4);
        assert_eq!(
            months,
            vec![date(2025, 11, 1), date(2025, 12, 1), date(2026, 1, 1), date(2026, 2, 1)]
        );
    }

    #[test]
    fn test_trailing_months_zero() {
        assert!(trailing_months(Utc::now(), 0).is_empty());
    }
}
