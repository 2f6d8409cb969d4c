//! Dashboard loader behaviour: status selection, partial failures and
//! last-writer-wins publishing.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;

use common::{at, completed, mixed_records, now, record};
use fieldcri::dashboard::{
    DashboardError, DashboardLoader, DashboardOptions, DashboardStatus, DashboardStore,
    LOAD_ERROR_MESSAGE, LoadOutcome, MemoryStore, StoreError,
};
use fieldcri::InterventionRecord;
use fieldcri::stats::{Locale, PeriodKey, PeriodRange, TypeRollup};

fn loader(store: impl DashboardStore + 'static) -> DashboardLoader {
    DashboardLoader::new(Arc::new(store), DashboardOptions::default())
}

fn applied(outcome: LoadOutcome) -> fieldcri::DashboardView {
    match outcome {
        LoadOutcome::Applied(view) => view,
        other => panic!("expected an applied load, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ready_view_for_month() {
    let loader = loader(MemoryStore::new(mixed_records()));
    let view = applied(loader.load_at("month", now()).await.unwrap());

    assert_eq!(view.status, DashboardStatus::Ready);
    assert_eq!(view.error, None);
    assert_eq!(view.period, PeriodKey::Month);
    // Oct 1..=16 dated records; the Oct 20 one is past `now`
    assert_eq!(view.global_stats.total_interventions, 7);
    assert_eq!(view.global_stats.active_sites, 3);
    // Three sites tie at two interventions; names break the tie
    let names: Vec<&str> = view.top_sites.iter().map(|s| s.site_name.as_str()).collect();
    assert_eq!(names, vec!["Dépôt Est", "Usine Nord", "Usine Sud"]);
    assert_eq!(view.type_stats[0].type_label, "maintenance");
    assert_eq!(view.monthly_series.len(), 6);
    assert_eq!(view.chart.labels, vec!["Mai", "Jun", "Jul", "Aoû", "Sep", "Oct"]);
    assert_eq!(view.bars.len(), view.type_stats.len());
    assert_eq!(loader.current(), Some(view));
}

#[tokio::test]
async fn test_empty_store_gives_empty_status() {
    let loader = loader(MemoryStore::default());
    let view = applied(loader.load_at("week", now()).await.unwrap());

    assert_eq!(view.status, DashboardStatus::Empty);
    assert_eq!(view.error, None);
    assert_eq!(view.global_stats.total_interventions, 0);
    assert!(view.top_sites.is_empty());
    assert!(view.type_stats.is_empty());
    assert_eq!(view.monthly_series.len(), 6);
    assert_eq!(view.monthly_series.total(), 0);
    assert_eq!(view.avg_duration_label(), "0 min");
    assert_eq!(view.completion_label(), "0%");
}

#[tokio::test]
async fn test_invalid_period_is_an_error() {
    let loader = loader(MemoryStore::new(mixed_records()));
    let result = loader.load_at("decade", now()).await;

    assert!(matches!(result, Err(DashboardError::InvalidPeriod(ref key)) if key == "decade"));
    assert_eq!(loader.current(), None);
}

#[tokio::test]
async fn test_english_labels_from_options() {
    let options = DashboardOptions { months_back: 3, locale: Locale::En, ..Default::default() };
    let loader = DashboardLoader::new(Arc::new(MemoryStore::new(mixed_records())), options);
    let view = applied(loader.load_at("year", now()).await.unwrap());

    assert_eq!(view.chart.labels, vec!["Aug", "Sep", "Oct"]);
    assert_eq!(view.chart.series, vec![vec![0.0, 1.0, 8.0]]);
}

/// Store whose type fetch always fails
struct BrokenTypes(MemoryStore);

#[async_trait]
impl DashboardStore for BrokenTypes {
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        self.0.records_between(range).await
    }

    async fn fetch_type_stats(&self, _range: &PeriodRange) -> Result<Vec<TypeRollup>, StoreError> {
        Err(StoreError::Backend("disk on fire".into()))
    }
}

#[tokio::test]
async fn test_failed_fetch_keeps_partial_data() {
    let records = vec![
        completed(record("Usine Nord", "maintenance", at(2026, 10, 3, 8), 60)),
        record("Usine Sud", "audit", at(2026, 10, 4, 8), 30),
    ];
    let loader = loader(BrokenTypes(MemoryStore::new(records)));
    let view = applied(loader.load_at("month", now()).await.unwrap());

    assert_eq!(view.status, DashboardStatus::Failed);
    assert_eq!(view.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    // Raw store details stay out of the view
    assert!(!view.error.as_deref().unwrap_or_default().contains("fire"));
    assert!(view.type_stats.is_empty());
    assert!(view.bars.is_empty());
    assert_eq!(view.global_stats.total_interventions, 2);
    assert_eq!(view.top_sites.len(), 2);
    assert_eq!(view.completion_label(), "50%");
}

/// Store that parks every fetch until released while `hold` is set
struct GatedStore {
    inner: MemoryStore,
    hold: AtomicBool,
    gate: Semaphore,
    parked: AtomicUsize,
}

#[async_trait]
impl DashboardStore for GatedStore {
    async fn records_between(&self, range: &PeriodRange) -> Result<Vec<InterventionRecord>, StoreError> {
        if self.hold.load(Ordering::SeqCst) {
            self.parked.fetch_add(1, Ordering::SeqCst);
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        self.inner.records_between(range).await
    }
}

#[tokio::test]
async fn test_slow_load_is_superseded_by_newer_one() {
    let store = Arc::new(GatedStore {
        inner: MemoryStore::new(mixed_records()),
        hold: AtomicBool::new(true),
        gate: Semaphore::new(0),
        parked: AtomicUsize::new(0),
    });
    let loader = Arc::new(DashboardLoader::new(store.clone(), DashboardOptions::default()));
    let when: DateTime<Utc> = now();

    let slow = {
        let loader = loader.clone();
        tokio::spawn(async move { loader.load_at("year", when).await })
    };
    while store.parked.load(Ordering::SeqCst) < 4 {
        tokio::task::yield_now().await;
    }

    store.hold.store(false, Ordering::SeqCst);
    let fresh = applied(loader.load_at("month", when).await.unwrap());
    assert_eq!(fresh.period, PeriodKey::Month);

    store.gate.add_permits(4);
    let outcome = slow.await.unwrap().unwrap();
    assert_eq!(outcome, LoadOutcome::Superseded { ticket: 1, latest: 2 });

    let current = loader.current().unwrap();
    assert_eq!(current.period, PeriodKey::Month);
    assert_eq!(current, fresh);
}

#[tokio::test]
async fn test_sequential_loads_each_publish() {
    let loader = loader(MemoryStore::new(mixed_records()));

    applied(loader.load_at("day", now()).await.unwrap());
    let year = applied(loader.load_at("year", now()).await.unwrap());

    assert_eq!(loader.current().map(|v| v.period), Some(PeriodKey::Year));
    assert!(year.global_stats.total_interventions >= 8);
}
