//! Dashboard statistics for intervention reports
//!
//! Aggregates interventions per period: global totals, busiest sites,
//! intervention types and a trailing monthly series. Saved reports are
//! mirrored into a SQLite index (`<data_dir>/stats.db`) that answers the
//! dashboard fetches without reloading the whole report list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  ReportStore    │     │   fieldcri      │
//! │ (cri_list.json) │     │   reindex       │
//! └────────┬────────┘     └────────┬────────┘
//!          │ record_report         │ rebuild
//!          └───────────┬───────────┘
//!                      ▼
//!             <data_dir>/stats.db ──▶ StatsQuery (DashboardStore)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let stats = StatsManager::open(&data_dir.join("stats.db"))?;
//!
//! // Index a saved report
//! stats.recorder().record_report(&report)?;
//!
//! // Query for the dashboard
//! let range = resolve_period("month", Utc::now())?;
//! let totals = stats.query().query_global_stats(&range)?;
//! ```

pub mod aggregate;
mod chart;
mod db;
mod format;
mod models;
mod period;
mod queries;
mod recorder;
mod time_bucket;

pub use aggregate::{global_stats, monthly_history, monthly_series, top_sites, type_stats};
pub use chart::{TYPE_PALETTE, to_bar_entries, to_chart_series};
pub use db::StatsDb;
pub use format::{Locale, format_duration, format_duration_opt, format_percent};
pub use models::{
    BarEntry, ChartSeries, GlobalStats, MonthCount, MonthlyBucket, MonthlySeries, SiteRollup,
    TypeRollup,
};
pub use period::{PeriodKey, PeriodRange, resolve_period};
pub use queries::StatsQuery;
pub use recorder::StatsRecorder;
pub use time_bucket::{month_bucket, trailing_months};

use anyhow::Result;

/// Central manager for statistics tracking
///
/// Coordinates recording and querying of statistics.
/// Thread-safe through internal mutex on the database connection.
#[derive(Clone)]
pub struct StatsManager {
    db: StatsDb,
}

impl StatsManager {
    /// Open the stats index at `path`, creating it if needed
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let db = StatsDb::open(path)?;
        Ok(Self { db })
    }

    /// Get a recorder for writing statistics
    pub fn recorder(&self) -> StatsRecorder {
        StatsRecorder::new(self.db.clone())
    }

    /// Get a query interface for reading statistics
    pub fn query(&self) -> StatsQuery {
        StatsQuery::new(self.db.clone())
    }

    /// Reset all statistics (delete all data)
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CriKind, CriReport};
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::tempdir;

    fn report(id: &str, site: &str) -> CriReport {
        let mut report = CriReport::new(CriKind::Projet, serde_json::Map::new());
        report.id = id.to_string();
        report.created_at = Some(chrono::Utc.with_ymd_and_hms(2026, 10, 5, 8, 0, 0).unwrap());
        report.fields.insert("site".into(), json!(site));
        report.fields.insert("type_intervention".into(), json!("maintenance"));
        report
    }

    #[test]
    fn test_stats_manager_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = StatsManager::open(&dir.path().join("test_stats.db")).unwrap();
        let now = chrono::Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        manager.recorder().record_report(&report("r1", "Usine Nord")).unwrap();
        manager.recorder().record_report(&report("r2", "Usine Sud")).unwrap();
        // Re-recording replaces the previous row
        manager.recorder().record_report(&report("r2", "Usine Sud")).unwrap();

        let range = resolve_period("month", now).unwrap();
        let totals = manager.query().query_global_stats(&range).unwrap();
        assert_eq!(totals.total_interventions, 2);
        assert_eq!(totals.active_sites, 2);

        assert!(manager.recorder().remove_report("r1").unwrap());
        assert!(!manager.recorder().remove_report("r1").unwrap());
        assert_eq!(manager.query().count_all().unwrap(), 1);

        let rebuilt = manager.recorder().rebuild(&[report("r3", "Usine Est")]).unwrap();
        assert_eq!(rebuilt, 1);
        let sites = manager.query().query_top_sites(&range, 5).unwrap();
        assert_eq!(sites[0].site_name, "Usine Est");

        manager.reset_all().unwrap();
        assert_eq!(manager.query().count_all().unwrap(), 0);
    }
}
