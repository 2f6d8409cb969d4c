//! SQLite database connection and schema management for the stats index
//!
//! Manages `<data_dir>/stats.db`, a queryable copy of the report list used
//! by the dashboard.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Database wrapper sharing one connection
#[derive(Clone)]
pub struct StatsDb {
    conn: Arc<Mutex<Connection>>,
}

impl StatsDb {
    /// Open or create the stats database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create stats dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open stats db: {}", path.display()))?;

        // WAL lets the CLI read while another process records
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        tracing::debug!(path = %path.display(), "Opened stats db");
        Ok(db)
    }

    /// Get a reference to the connection (for queries)
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite itself consistent
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize stats schema")?;
        Ok(())
    }

    /// Delete all indexed interventions
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM interventions", [])?;
        Ok(())
    }
}

/// SQL schema for the stats database
const SCHEMA_SQL: &str = r#"
-- One row per saved report
CREATE TABLE IF NOT EXISTS interventions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id TEXT NOT NULL UNIQUE,
    site_id TEXT,
    site_name TEXT,
    type_label TEXT,
    started_at INTEGER,
    ended_at INTEGER,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER,
    month_bucket TEXT
);
CREATE INDEX IF NOT EXISTS idx_interventions_created_at ON interventions(created_at);
CREATE INDEX IF NOT EXISTS idx_interventions_month ON interventions(month_bucket);
CREATE INDEX IF NOT EXISTS idx_interventions_site ON interventions(site_id);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
