//! [`DashboardStore`] backed by the stats index
//!
//! SQLite calls block, so each fetch runs on the blocking pool with its own
//! handle to the shared connection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StatsQuery;
use crate::dashboard::{DashboardStore, StoreError};
use crate::domain::InterventionRecord;
use crate::stats::models::{GlobalStats, MonthCount, SiteRollup, TypeRollup};
use crate::stats::period::PeriodRange;

impl StatsQuery {
    async fn blocking<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&StatsQuery) -> Result<T, StoreError> + Send + 'static,
    {
        let query = self.clone();
        tokio::task::spawn_blocking(move || f(&query)).await?
    }
}

#[async_trait]
impl DashboardStore for StatsQuery {
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        let range = *range;
        self.blocking(move |q| q.load_records(&range)).await
    }

    async fn fetch_global_stats(&self, range: &PeriodRange) -> Result<GlobalStats, StoreError> {
        let range = *range;
        self.blocking(move |q| q.query_global_stats(&range)).await
    }

    async fn fetch_top_sites(
        &self,
        range: &PeriodRange,
        limit: usize,
    ) -> Result<Vec<SiteRollup>, StoreError> {
        let range = *range;
        self.blocking(move |q| q.query_top_sites(&range, limit)).await
    }

    async fn fetch_type_stats(&self, range: &PeriodRange) -> Result<Vec<TypeRollup>, StoreError> {
        let range = *range;
        self.blocking(move |q| q.query_type_stats(&range)).await
    }

    async fn fetch_monthly_history(
        &self,
        months_back: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthCount>, StoreError> {
        self.blocking(move |q| q.query_monthly_history(months_back, now)).await
    }
}
