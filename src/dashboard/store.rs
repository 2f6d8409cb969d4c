//! Record store seam for the dashboard

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StoreError;
use crate::domain::InterventionRecord;
use crate::stats::aggregate;
use crate::stats::{GlobalStats, MonthCount, PeriodRange, SiteRollup, TypeRollup};

/// Source of intervention records for the dashboard
///
/// Only `records_between` is required. The four fetches default to
/// aggregating its output in memory; indexed stores override them with
/// native queries that must return the same values.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Records whose `created_at` falls inside `range`, in store order.
    /// Records without a creation time are never returned.
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError>;

    async fn fetch_global_stats(&self, range: &PeriodRange) -> Result<GlobalStats, StoreError> {
        let records = self.records_between(range).await?;
        Ok(aggregate::global_stats(&records))
    }

    async fn fetch_top_sites(
        &self,
        range: &PeriodRange,
        limit: usize,
    ) -> Result<Vec<SiteRollup>, StoreError> {
        let records = self.records_between(range).await?;
        Ok(aggregate::top_sites(&records, limit))
    }

    async fn fetch_type_stats(&self, range: &PeriodRange) -> Result<Vec<TypeRollup>, StoreError> {
        let records = self.records_between(range).await?;
        Ok(aggregate::type_stats(&records, None))
    }

    async fn fetch_monthly_history(
        &self,
        months_back: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthCount>, StoreError> {
        let window = PeriodRange::history(months_back, now);
        let records = self.records_between(&window).await?;
        Ok(aggregate::monthly_history(&records, months_back, now))
    }
}

/// Store over an owned list of records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<InterventionRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<InterventionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        Ok(filter_range(&self.records, range))
    }
}

/// Records created inside `range`, keeping input order
pub(crate) fn filter_range(records: &[InterventionRecord], range: &PeriodRange) -> Vec<InterventionRecord> {
    records
        .iter()
        .filter(|r| r.created_at.is_some_and(|ts| range.contains(ts)))
        .cloned()
        .collect()
}
