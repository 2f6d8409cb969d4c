use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::StoreError;
use crate::stats::{
    BarEntry, ChartSeries, GlobalStats, Locale, MonthCount, MonthlySeries, PeriodKey, PeriodRange,
    SiteRollup, TypeRollup, format_duration, format_percent, to_bar_entries, to_chart_series,
};

/// Message shown when any fetch failed; store details stay in the logs.
pub const LOAD_ERROR_MESSAGE: &str = "Impossible de charger les données du tableau de bord";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    /// All fetches succeeded and returned data
    Ready,
    /// All fetches succeeded but the period holds no interventions
    Empty,
    /// At least one fetch failed; the other sections are still filled
    Failed,
}

/// Everything the presentation layer needs for one dashboard render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub period: PeriodKey,
    pub range: PeriodRange,
    pub generated_at: DateTime<Utc>,
    pub global_stats: GlobalStats,
    pub top_sites: Vec<SiteRollup>,
    pub type_stats: Vec<TypeRollup>,
    pub monthly_series: MonthlySeries,
    pub chart: ChartSeries,
    pub bars: Vec<BarEntry>,
    pub status: DashboardStatus,
    pub error: Option<String>,
}

/// Raw results of the four concurrent fetches
pub(crate) struct FetchResults {
    pub global_stats: Result<GlobalStats, StoreError>,
    pub top_sites: Result<Vec<SiteRollup>, StoreError>,
    pub type_stats: Result<Vec<TypeRollup>, StoreError>,
    pub history: Result<Vec<MonthCount>, StoreError>,
}

impl DashboardView {
    pub(crate) fn assemble(
        period: PeriodKey,
        range: PeriodRange,
        now: DateTime<Utc>,
        months_back: u32,
        locale: Locale,
        results: FetchResults,
    ) -> Self {
        let mut failed = false;
        let global_stats = take_or_default("global_stats", results.global_stats, &mut failed);
        let top_sites = take_or_default("top_sites", results.top_sites, &mut failed);
        let type_stats = take_or_default("type_stats", results.type_stats, &mut failed);
        let history = take_or_default("monthly_history", results.history, &mut failed);

        let monthly_series = MonthlySeries::from_history(&history, months_back, now, locale);
        let status = if failed {
            DashboardStatus::Failed
        } else if global_stats.is_empty() && top_sites.is_empty() && type_stats.is_empty() {
            DashboardStatus::Empty
        } else {
            DashboardStatus::Ready
        };

        Self {
            period,
            range,
            generated_at: now,
            chart: to_chart_series(&monthly_series),
            bars: to_bar_entries(&type_stats),
            global_stats,
            top_sites,
            type_stats,
            monthly_series,
            status,
            error: failed.then(|| LOAD_ERROR_MESSAGE.to_string()),
        }
    }

    pub fn avg_duration_label(&self) -> String {
        format_duration(self.global_stats.avg_duration_minutes)
    }

    pub fn completion_label(&self) -> String {
        format_percent(self.global_stats.completion_rate_percent)
    }
}

fn take_or_default<T: Default>(fetch: &str, result: Result<T, StoreError>, failed: &mut bool) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(fetch, error = %e, "Dashboard fetch failed");
            *failed = true;
            T::default()
        }
    }
}
