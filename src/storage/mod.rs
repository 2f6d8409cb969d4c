//! Report persistence
//!
//! Reports live in a single JSON list (`<data_dir>/cri_list.json`). Every
//! write rewrites the list atomically under an exclusive lock (see
//! [`crate::atomic_file`]), so the CLI and another process never interleave
//! writes or hand out the same number twice.
//!
//! Entries that cannot be read as a report are skipped with a warning and
//! written back untouched, so one damaged row never hides the others.

mod numbering;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::atomic_file::{with_exclusive_lock, write_atomic};
use crate::dashboard::{DashboardStore, StoreError, filter_range};
use crate::domain::{CriKind, CriReport, InterventionRecord};
use crate::stats::PeriodRange;

pub use numbering::{format_number, next_number};

/// File name of the report list inside the data directory
pub const REPORT_LIST_FILE: &str = "cri_list.json";

/// Parsed report list plus the entries that did not parse
#[derive(Debug, Default)]
struct StoredList {
    reports: Vec<CriReport>,
    unreadable: Vec<Value>,
}

impl StoredList {
    fn parse(entries: Vec<Value>) -> Self {
        let mut list = Self::default();
        for (position, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<CriReport>(entry.clone()) {
                Ok(report) => list.reports.push(report),
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping unreadable report entry");
                    list.unreadable.push(entry);
                }
            }
        }
        list
    }

    /// Every report number in use, readable entries or not
    fn numbers(&self) -> impl Iterator<Item = &str> {
        self.reports.iter().map(|r| r.numero_cri.as_str()).chain(
            self.unreadable
                .iter()
                .filter_map(|entry| entry.get("numero_cri").and_then(Value::as_str)),
        )
    }

    fn to_json(&self) -> Result<String> {
        let mut entries = Vec::with_capacity(self.reports.len() + self.unreadable.len());
        for report in &self.reports {
            entries.push(serde_json::to_value(report).with_context(|| "Failed to serialize report")?);
        }
        entries.extend(self.unreadable.iter().cloned());
        serde_json::to_string_pretty(&entries).with_context(|| "Failed to serialize reports")
    }
}

#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    /// Open the report list in `data_dir`, creating the directory if needed
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            path: data_dir.join(REPORT_LIST_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable reports in insertion order; a missing file is an empty list
    pub fn all(&self) -> Result<Vec<CriReport>> {
        Ok(self.load()?.reports)
    }

    pub fn get(&self, id: &str) -> Result<Option<CriReport>> {
        Ok(self.all()?.into_iter().find(|r| r.id == id))
    }

    /// Reports of one kind, newest first; undated reports come last
    pub fn list(&self, kind: Option<CriKind>) -> Result<Vec<CriReport>> {
        let mut reports: Vec<CriReport> = self
            .all()?
            .into_iter()
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Insert or replace a report.
    ///
    /// A missing id gets a fresh uuid and a missing number the next free one
    /// for the report's kind and creation day (today for undated reports).
    /// Both are assigned under the write lock.
    pub fn save(&self, mut report: CriReport) -> Result<CriReport> {
        self.update(|list| {
            if report.id.trim().is_empty() {
                report.id = uuid::Uuid::new_v4().to_string();
            }
            if report.numero_cri.trim().is_empty() {
                let day = report.created_at.unwrap_or_else(Utc::now).date_naive();
                report.numero_cri = next_number(report.kind, day, list.numbers());
            }

            match list.reports.iter_mut().find(|r| r.id == report.id) {
                Some(existing) => *existing = report.clone(),
                None => list.reports.push(report.clone()),
            }
            Ok(())
        })?;

        tracing::info!(id = %report.id, numero = %report.numero_cri, kind = %report.kind, "Saved report");
        Ok(report)
    }

    /// Remove a report; returns whether it existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.update(|list| {
            let before = list.reports.len();
            list.reports.retain(|r| r.id != id);
            Ok(list.reports.len() != before)
        })?;
        if removed {
            tracing::info!(id, "Deleted report");
        }
        Ok(removed)
    }

    /// Number the next report of `kind` created on `date` would get
    pub fn next_number(&self, kind: CriKind, date: NaiveDate) -> Result<String> {
        let list = self.load()?;
        Ok(next_number(kind, date, list.numbers()))
    }

    /// Dashboard records for every readable report
    pub fn records(&self) -> Result<Vec<InterventionRecord>> {
        Ok(self.all()?.iter().map(CriReport::to_record).collect())
    }

    fn load(&self) -> Result<StoredList> {
        if !self.path.exists() {
            return Ok(StoredList::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read report list: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(StoredList::default());
        }
        // Only a file that is not a JSON array at all is an error
        let entries: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report list: {}", self.path.display()))?;
        Ok(StoredList::parse(entries))
    }

    /// Read-modify-write the list under an exclusive lock
    fn update<T>(&self, f: impl FnOnce(&mut StoredList) -> Result<T>) -> Result<T> {
        with_exclusive_lock(&self.path, || {
            let mut list = self.load()?;
            let result = f(&mut list)?;
            write_atomic(&self.path, list.to_json()?.as_bytes())?;
            Ok(result)
        })
    }
}

#[async_trait]
impl DashboardStore for ReportStore {
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        let store = self.clone();
        let range = *range;
        tokio::task::spawn_blocking(move || {
            let records = store
                .records()
                .map_err(|e| StoreError::Backend(format!("{e:#}")))?;
            Ok::<_, StoreError>(filter_range(&records, &range))
        })
        .await?
    }
}
