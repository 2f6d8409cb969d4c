//! Stats query functions for reading indexed interventions
//!
//! Each `query_*` method answers one dashboard fetch with a single SQL
//! statement and returns the same values as the in-memory aggregation in
//! [`crate::stats::aggregate`].

mod dashboard;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

use super::aggregate::{completion_rate, rank_types};
use super::db::StatsDb;
use super::models::{GlobalStats, MonthCount, SiteRollup, TypeRollup};
use super::period::PeriodRange;
use super::time_bucket::{format_month_bucket, parse_month_bucket, trailing_months};
use crate::dashboard::StoreError;
use crate::domain::InterventionRecord;

/// Query interface for statistics
#[derive(Clone)]
pub struct StatsQuery {
    db: StatsDb,
}

impl StatsQuery {
    pub fn new(db: StatsDb) -> Self {
        Self { db }
    }

    /// Indexed interventions created inside `range`, in indexing order
    pub fn load_records(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT site_id, site_name, type_label, started_at, ended_at, completed, created_at
               FROM interventions
               WHERE created_at >= ?1 AND created_at < ?2
               ORDER BY id"#,
        )?;
        let records = stmt
            .query_map(params![range.start_ms(), range.end_ms()], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of indexed interventions, all periods included
    pub fn count_all(&self) -> Result<u64, StoreError> {
        let conn = self.db.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM interventions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn query_global_stats(&self, range: &PeriodRange) -> Result<GlobalStats, StoreError> {
        let conn = self.db.conn();
        let (total, active_sites, avg_duration, completed): (u64, u64, Option<f64>, u64) = conn
            .query_row(
                r#"SELECT
                       COUNT(*),
                       COUNT(DISTINCT site_id),
                       AVG(CASE WHEN started_at IS NOT NULL AND ended_at IS NOT NULL
                                THEN ABS(ended_at - started_at) / 60000.0 END),
                       COALESCE(SUM(completed), 0)
                   FROM interventions
                   WHERE created_at >= ?1 AND created_at < ?2"#,
                params![range.start_ms(), range.end_ms()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;

        if total == 0 {
            return Ok(GlobalStats::default());
        }
        Ok(GlobalStats {
            total_interventions: total,
            active_sites,
            avg_duration_minutes: avg_duration.unwrap_or(0.0),
            completion_rate_percent: completion_rate(completed, total),
        })
    }

    pub fn query_top_sites(
        &self,
        range: &PeriodRange,
        limit: usize,
    ) -> Result<Vec<SiteRollup>, StoreError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT
                   i.site_id,
                   COALESCE(
                       (SELECT n.site_name FROM interventions n
                        WHERE n.site_id = i.site_id AND n.site_name IS NOT NULL
                          AND n.created_at >= ?1 AND n.created_at < ?2
                        ORDER BY n.id LIMIT 1),
                       i.site_id
                   ) AS name,
                   COUNT(*) AS cnt
               FROM interventions i
               WHERE i.site_id IS NOT NULL AND i.created_at >= ?1 AND i.created_at < ?2
               GROUP BY i.site_id
               ORDER BY cnt DESC, name ASC, i.site_id ASC
               LIMIT ?3"#,
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let sites = stmt
            .query_map(params![range.start_ms(), range.end_ms(), limit], |row| {
                Ok(SiteRollup {
                    site_id: row.get(0)?,
                    site_name: row.get(1)?,
                    intervention_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sites)
    }

    pub fn query_type_stats(&self, range: &PeriodRange) -> Result<Vec<TypeRollup>, StoreError> {
        let conn = self.db.conn();
        // First-seen order drives color assignment
        let mut stmt = conn.prepare(
            r#"SELECT type_label, COUNT(*)
               FROM interventions
               WHERE type_label IS NOT NULL AND created_at >= ?1 AND created_at < ?2
               GROUP BY type_label
               ORDER BY MIN(id)"#,
        )?;
        let groups = stmt
            .query_map(params![range.start_ms(), range.end_ms()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rank_types(groups, None))
    }

    pub fn query_monthly_history(
        &self,
        months_back: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthCount>, StoreError> {
        let months = trailing_months(now, months_back);
        let (Some(first), Some(last)) = (months.first(), months.last()) else {
            return Ok(Vec::new());
        };

        let conn = self.db.conn();
        let counts = month_counts(&conn, &format_month_bucket(*first), &format_month_bucket(*last))?;

        Ok(months
            .into_iter()
            .map(|month| MonthCount {
                month,
                count: counts
                    .iter()
                    .find(|(bucket, _)| *bucket == month)
                    .map_or(0, |(_, count)| *count),
            })
            .collect())
    }
}

fn month_counts(
    conn: &Connection,
    first: &str,
    last: &str,
) -> Result<Vec<(chrono::NaiveDate, u64)>, StoreError> {
    let mut stmt = conn.prepare(
        r#"SELECT month_bucket, COUNT(*)
           FROM interventions
           WHERE month_bucket >= ?1 AND month_bucket <= ?2
           GROUP BY month_bucket"#,
    )?;
    let rows = stmt
        .query_map(params![first, last], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows
        .into_iter()
        .filter_map(|(bucket, count)| parse_month_bucket(&bucket).map(|month| (month, count)))
        .collect())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InterventionRecord> {
    let millis = |idx: usize| -> rusqlite::Result<Option<DateTime<Utc>>> {
        Ok(row
            .get::<_, Option<i64>>(idx)?
            .and_then(DateTime::from_timestamp_millis))
    };
    Ok(InterventionRecord {
        site_id: row.get(0)?,
        site_name: row.get(1)?,
        intervention_type: row.get(2)?,
        start_time: millis(3)?,
        end_time: millis(4)?,
        completed: row.get::<_, i64>(5)? != 0,
        created_at: millis(6)?,
    })
}
