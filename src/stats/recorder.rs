//! Stats recorder - writes interventions to the stats index
//!
//! Handles indexing of saved reports, removal of deleted ones and full
//! rebuilds from the report list.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::aggregate::normalize_type_label;
use super::db::StatsDb;
use super::time_bucket::month_bucket;
use crate::domain::{CriReport, InterventionRecord};

/// Records interventions to the database
#[derive(Clone)]
pub struct StatsRecorder {
    db: StatsDb,
}

impl StatsRecorder {
    pub fn new(db: StatsDb) -> Self {
        Self { db }
    }

    /// Index a saved report. Re-indexing updates the row in place, so the
    /// report keeps its first-seen position.
    pub fn record_report(&self, report: &CriReport) -> Result<()> {
        self.record_intervention(&report.id, &report.to_record())
    }

    /// Index a single intervention under `report_id`
    pub fn record_intervention(&self, report_id: &str, record: &InterventionRecord) -> Result<()> {
        let conn = self.db.conn();
        Self::insert(&conn, report_id, record)
            .with_context(|| format!("Failed to index report {report_id}"))
    }

    /// Drop a report from the index; returns whether a row existed
    pub fn remove_report(&self, report_id: &str) -> Result<bool> {
        let conn = self.db.conn();
        let removed = conn.execute("DELETE FROM interventions WHERE report_id = ?1", [report_id])?;
        Ok(removed > 0)
    }

    /// Replace the whole index with `reports`, in order
    pub fn rebuild(&self, reports: &[CriReport]) -> Result<usize> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM interventions", [])?;
        for report in reports {
            Self::insert(&tx, &report.id, &report.to_record())?;
        }
        tx.commit()?;
        tracing::info!(count = reports.len(), "Rebuilt stats index");
        Ok(reports.len())
    }

    fn insert(conn: &Connection, report_id: &str, record: &InterventionRecord) -> Result<()> {
        let created_at = record.created_at.map(|ts| ts.timestamp_millis());
        let month = created_at.and_then(month_bucket);
        let type_label = record
            .intervention_type
            .as_deref()
            .and_then(normalize_type_label);

        conn.execute(
            r#"INSERT INTO interventions
               (report_id, site_id, site_name, type_label, started_at, ended_at,
                completed, created_at, month_bucket)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
               ON CONFLICT(report_id) DO UPDATE SET
                   site_id = excluded.site_id, site_name = excluded.site_name,
                   type_label = excluded.type_label, started_at = excluded.started_at,
                   ended_at = excluded.ended_at, completed = excluded.completed,
                   created_at = excluded.created_at, month_bucket = excluded.month_bucket"#,
            rusqlite::params![
                report_id,
                record.site_id(),
                record.site_name(),
                type_label,
                record.start_time.map(|ts| ts.timestamp_millis()),
                record.end_time.map(|ts| ts.timestamp_millis()),
                record.completed as i32,
                created_at,
                month,
            ],
        )?;
        Ok(())
    }
}
