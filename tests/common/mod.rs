//! Shared builders for dashboard integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use fieldcri::InterventionRecord;

/// Fixed evaluation instant used across tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Record on `site` created at `created`, lasting `minutes`
pub fn record(site: &str, kind: &str, created: DateTime<Utc>, minutes: i64) -> InterventionRecord {
    InterventionRecord {
        site_id: Some(site.to_lowercase()),
        site_name: Some(site.to_string()),
        intervention_type: Some(kind.to_string()),
        start_time: Some(created),
        end_time: Some(created + Duration::minutes(minutes)),
        completed: false,
        created_at: Some(created),
    }
}

pub fn completed(mut record: InterventionRecord) -> InterventionRecord {
    record.completed = true;
    record
}

/// A varied data set covering the awkward cases: blank names, reversed
/// times, underscore labels, missing sites and undated records.
pub fn mixed_records() -> Vec<InterventionRecord> {
    let mut reversed = record("Usine Nord", "maintenance", at(2026, 10, 14, 9), 30);
    std::mem::swap(&mut reversed.start_time, &mut reversed.end_time);

    let mut blank_name = record("Dépôt Est", "mise_en_service", at(2026, 10, 12, 9), 45);
    blank_name.site_name = Some("   ".into());

    let mut no_site = record("x", "audit", at(2026, 10, 10, 9), 15);
    no_site.site_id = None;
    no_site.site_name = None;

    let mut no_times = record("Usine Sud", "  ", at(2026, 10, 11, 9), 0);
    no_times.start_time = None;

    let mut undated = record("Usine Nord", "maintenance", at(2026, 10, 11, 9), 10);
    undated.created_at = None;

    vec![
        completed(record("Usine Nord", "maintenance", at(2026, 10, 1, 8), 90)),
        record("Usine Sud", "mise en service", at(2026, 10, 2, 8), 120),
        blank_name,
        completed(record("Dépôt Est", "maintenance", at(2026, 10, 13, 8), 65)),
        reversed,
        no_site,
        no_times,
        undated,
        completed(record("Usine Sud", "audit", at(2026, 9, 28, 8), 60)),
        record("Usine Nord", "maintenance", at(2026, 7, 3, 8), 20),
        record("Atelier", "formation", at(2026, 1, 8, 8), 240),
        record("Atelier", "formation", at(2025, 12, 30, 8), 240),
        record("Futur", "audit", at(2026, 10, 20, 8), 10),
    ]
}
