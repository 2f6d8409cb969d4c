//! Dashboard data models
//!
//! Derived values rebuilt on every dashboard load; none of them is persisted.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::stats::chart::TYPE_PALETTE;
use crate::stats::format::Locale;
use crate::stats::time_bucket::{month_start, trailing_months};

/// Summary card values for a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total_interventions: u64,
    pub active_sites: u64,
    pub avg_duration_minutes: f64,
    pub completion_rate_percent: f64,
}

impl GlobalStats {
    pub fn is_empty(&self) -> bool {
        self.total_interventions == 0
    }
}

/// Interventions counted per site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRollup {
    pub site_id: String,
    pub site_name: String,
    pub intervention_count: u64,
}

/// Interventions counted per (normalized) type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRollup {
    pub type_label: String,
    pub count: u64,
    pub color_index: usize,
}

impl TypeRollup {
    pub fn color(&self) -> &'static str {
        TYPE_PALETTE[self.color_index % TYPE_PALETTE.len()]
    }
}

/// Raw monthly history row as returned by a store; may be sparse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// First day of the month
    pub month: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: NaiveDate,
    pub month_label: String,
    pub count: u64,
}

/// Dense monthly series, oldest bucket first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub buckets: Vec<MonthlyBucket>,
}

impl MonthlySeries {
    /// Build exactly `months_back` buckets ending with the month of `now`.
    ///
    /// Rows outside the window are ignored, missing months count zero and
    /// rows sharing a month are summed.
    pub fn from_history(
        history: &[MonthCount],
        months_back: u32,
        now: DateTime<Utc>,
        locale: Locale,
    ) -> Self {
        let buckets = trailing_months(now, months_back)
            .into_iter()
            .map(|month| MonthlyBucket {
                month,
                month_label: locale.month_abbrev(month.month()).to_string(),
                count: history
                    .iter()
                    .filter(|row| month_start(row.month) == month)
                    .map(|row| row.count)
                    .sum(),
            })
            .collect();
        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Generic chart input: one label per point, one value list per data set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<Vec<f64>>,
}

/// One bar of the type distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub value: u64,
    pub color: &'static str,
}
