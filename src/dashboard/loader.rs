//! Dashboard load pipeline
//!
//! ```text
//! period key ─▶ resolve ─▶ ┌ fetch_global_stats ┐
//!                          ├ fetch_top_sites    ├─▶ assemble ─▶ publish
//!                          ├ fetch_type_stats   │
//!                          └ fetch_monthly_hist ┘
//! ```
//!
//! Each load takes a ticket. A result is published only while its ticket
//! is still the newest one issued, so a slow load that finishes after a
//! later refresh never overwrites fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::error::DashboardError;
use super::store::DashboardStore;
use super::view::{DashboardView, FetchResults};
use crate::config::DashboardSettings;
use crate::stats::{Locale, PeriodKey};

/// Tuning for a dashboard load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub top_sites_limit: usize,
    pub months_back: u32,
    pub locale: Locale,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_sites_limit: 5,
            months_back: 6,
            locale: Locale::Fr,
        }
    }
}

impl From<&DashboardSettings> for DashboardOptions {
    fn from(settings: &DashboardSettings) -> Self {
        Self {
            top_sites_limit: settings.top_sites_limit,
            months_back: settings.months_back,
            locale: settings.locale,
        }
    }
}

/// Result of one load call
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The view was published and is now current
    Applied(DashboardView),
    /// A newer load was issued while this one ran; its result was dropped
    Superseded { ticket: u64, latest: u64 },
}

struct Published {
    ticket: u64,
    view: Option<DashboardView>,
}

pub struct DashboardLoader {
    store: Arc<dyn DashboardStore>,
    options: DashboardOptions,
    issued: AtomicU64,
    current: Mutex<Published>,
}

impl DashboardLoader {
    pub fn new(store: Arc<dyn DashboardStore>, options: DashboardOptions) -> Self {
        Self {
            store,
            options,
            issued: AtomicU64::new(0),
            current: Mutex::new(Published { ticket: 0, view: None }),
        }
    }

    /// Load the dashboard for `period_key` as of now
    pub async fn load(&self, period_key: &str) -> Result<LoadOutcome, DashboardError> {
        self.load_at(period_key, Utc::now()).await
    }

    /// Load the dashboard for `period_key` as of `now`
    ///
    /// Only an unknown period key is an error. Store failures are logged
    /// and reported through the view's status and message.
    pub async fn load_at(
        &self,
        period_key: &str,
        now: DateTime<Utc>,
    ) -> Result<LoadOutcome, DashboardError> {
        let period: PeriodKey = period_key.parse()?;
        let range = period.resolve(now);
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(
            ticket,
            period = %period,
            start = %range.start,
            end = %range.end,
            "Loading dashboard"
        );

        let store = self.store.as_ref();
        let (global_stats, top_sites, type_stats, history) = futures::join!(
            store.fetch_global_stats(&range),
            store.fetch_top_sites(&range, self.options.top_sites_limit),
            store.fetch_type_stats(&range),
            store.fetch_monthly_history(self.options.months_back, now),
        );

        let view = DashboardView::assemble(
            period,
            range,
            now,
            self.options.months_back,
            self.options.locale,
            FetchResults {
                global_stats,
                top_sites,
                type_stats,
                history,
            },
        );

        Ok(self.publish(ticket, view))
    }

    /// Latest published view, if any
    pub fn current(&self) -> Option<DashboardView> {
        self.lock_current().view.clone()
    }

    fn publish(&self, ticket: u64, view: DashboardView) -> LoadOutcome {
        let mut current = self.lock_current();
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket != latest || ticket <= current.ticket {
            tracing::debug!(ticket, latest, "Discarding superseded dashboard load");
            return LoadOutcome::Superseded { ticket, latest };
        }

        tracing::info!(
            ticket,
            status = ?view.status,
            interventions = view.global_stats.total_interventions,
            "Dashboard updated"
        );
        current.ticket = ticket;
        current.view = Some(view.clone());
        LoadOutcome::Applied(view)
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Published> {
        // Published state is replaced whole, so a poisoned lock still holds a consistent value
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
