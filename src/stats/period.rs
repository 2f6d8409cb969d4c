//! Dashboard periods
//!
//! A period key names a calendar-aligned window (UTC) that starts at the
//! beginning of the current day, ISO week, month, quarter or year and runs
//! up to and including the evaluation instant. Ranges are half-open, so
//! `end` sits one millisecond past `now`.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_bucket::{month_start, trailing_months};
use crate::dashboard::DashboardError;

/// Period selector offered by the dashboard filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKey {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl PeriodKey {
    pub const ALL: [PeriodKey; 5] = [
        PeriodKey::Day,
        PeriodKey::Week,
        PeriodKey::Month,
        PeriodKey::Quarter,
        PeriodKey::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Aujourd'hui",
            Self::Week => "Cette semaine",
            Self::Month => "Ce mois",
            Self::Quarter => "Ce trimestre",
            Self::Year => "Cette année",
        }
    }

    /// Start (00:00 UTC) of the calendar period containing `now`
    pub fn period_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first_day = match self {
            Self::Day => today,
            Self::Week => today - Duration::days(today.weekday().num_days_from_monday() as i64),
            Self::Month => month_start(today),
            Self::Quarter => {
                let first_month = today.month0() / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1).unwrap_or(today)
            }
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        first_day.and_time(NaiveTime::MIN).and_utc()
    }

    /// Resolve this key against the evaluation instant
    pub fn resolve(&self, now: DateTime<Utc>) -> PeriodRange {
        PeriodRange {
            start: self.period_start(now),
            end: now + Duration::milliseconds(1),
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PeriodKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == key)
            .ok_or_else(|| DashboardError::InvalidPeriod(s.to_string()))
    }
}

/// Parse and resolve a period key in one step
pub fn resolve_period(key: &str, now: DateTime<Utc>) -> Result<PeriodRange, DashboardError> {
    Ok(key.parse::<PeriodKey>()?.resolve(now))
}

/// Half-open time range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DashboardError> {
        if start >= end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the trailing `months_back` calendar months, through
    /// the end of the current month. With `months_back == 0` it covers the
    /// current month only, so the range is never empty.
    pub fn history(months_back: u32, now: DateTime<Utc>) -> Self {
        let current = month_start(now.date_naive());
        let first = trailing_months(now, months_back).first().copied().unwrap_or(current);
        let after = current.checked_add_months(Months::new(1)).unwrap_or(current);
        let start = first.and_time(NaiveTime::MIN).and_utc();
        let end = after.and_time(NaiveTime::MIN).and_utc().max(now + Duration::milliseconds(1));
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        // Friday
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 25, 0).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_calendar_aligned_starts() {
        let now = now();
        assert_eq!(PeriodKey::Day.period_start(now), midnight(2026, 10, 16));
        assert_eq!(PeriodKey::Week.period_start(now), midnight(2026, 10, 12));
        assert_eq!(PeriodKey::Month.period_start(now), midnight(2026, 10, 1));
        assert_eq!(PeriodKey::Quarter.period_start(now), midnight(2026, 10, 1));
        assert_eq!(PeriodKey::Year.period_start(now), midnight(2026, 1, 1));
    }

    #[test]
    fn test_quarter_start_mid_quarter() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        assert_eq!(PeriodKey::Quarter.period_start(now), midnight(2026, 7, 1));
    }

    #[test]
    fn test_range_includes_now_and_is_half_open() {
        let now = now();
        let range = resolve_period("month", now).unwrap();
        assert!(range.start < range.end);
        assert!(range.contains(now));
        assert!(range.contains(range.start));
        assert!(!range.contains(range.end));
    }

    #[test]
    fn test_range_at_exact_period_boundary() {
        let now = midnight(2026, 10, 1);
        let range = PeriodKey::Month.resolve(now);
        assert_eq!(range.start, now);
        assert!(range.start < range.end);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let err = resolve_period("fortnight", now()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPeriod(ref key) if key == "fortnight"));
        assert_eq!(" Week ".parse::<PeriodKey>().unwrap(), PeriodKey::Week);
    }

    #[test]
    fn test_deterministic_for_fixed_now() {
        let now = now();
        assert_eq!(resolve_period("year", now).unwrap(), resolve_period("year", now).unwrap());
    }

    #[test]
    fn test_new_rejects_empty_range() {
        let t = now();
        assert!(PeriodRange::new(t, t).is_err());
        assert!(PeriodRange::new(t, t + Duration::seconds(1)).is_ok());
    }

    #[test]
    fn test_history_window() {
        let range = PeriodRange::history(6, now());
        assert_eq!(range.start, midnight(2026, 5, 1));
        assert_eq!(range.end, midnight(2026, 11, 1));

        let current_only = PeriodRange::history(0, now());
        assert_eq!(current_only.start, midnight(2026, 10, 1));
    }
}
