//! In-memory aggregation over intervention records
//!
//! Every function here is pure: the same records (in the same order) and
//! the same evaluation instant always give the same result. Grouping keeps
//! first-seen order and every sort is total, so no hash iteration order
//! leaks into the output.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::chart::TYPE_PALETTE;
use super::format::Locale;
use super::models::{GlobalStats, MonthCount, MonthlySeries, SiteRollup, TypeRollup};
use super::time_bucket::{month_start, trailing_months};
use crate::domain::InterventionRecord;

/// Totals, active sites, mean duration and completion rate
pub fn global_stats(records: &[InterventionRecord]) -> GlobalStats {
    if records.is_empty() {
        return GlobalStats::default();
    }

    let total = records.len() as u64;
    let active_sites = records
        .iter()
        .filter_map(InterventionRecord::site_id)
        .collect::<HashSet<_>>()
        .len() as u64;

    let (duration_sum, duration_count) = records
        .iter()
        .filter_map(InterventionRecord::duration_minutes)
        .fold((0.0f64, 0u64), |(sum, n), minutes| (sum + minutes, n + 1));
    let avg_duration_minutes = if duration_count == 0 {
        0.0
    } else {
        duration_sum / duration_count as f64
    };

    let completed = records.iter().filter(|r| r.completed).count() as u64;

    GlobalStats {
        total_interventions: total,
        active_sites,
        avg_duration_minutes,
        completion_rate_percent: completion_rate(completed, total),
    }
}

/// Percentage of completed interventions, 0 when there are none
pub fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (completed as f64 / total as f64) * 100.0
    }
}

/// Busiest sites, most interventions first
///
/// Records without a site are skipped. A site is named after the first
/// non-blank name seen for it, falling back to its id.
pub fn top_sites(records: &[InterventionRecord], limit: usize) -> Vec<SiteRollup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rollups: Vec<SiteRollup> = Vec::new();

    for record in records {
        let Some(site_id) = record.site_id() else {
            continue;
        };
        let slot = *index.entry(site_id).or_insert_with(|| {
            rollups.push(SiteRollup {
                site_id: site_id.to_string(),
                site_name: String::new(),
                intervention_count: 0,
            });
            rollups.len() - 1
        });

        let rollup = &mut rollups[slot];
        rollup.intervention_count += 1;
        if rollup.site_name.is_empty() {
            if let Some(name) = record.site_name() {
                rollup.site_name = name.to_string();
            }
        }
    }

    for rollup in &mut rollups {
        if rollup.site_name.is_empty() {
            rollup.site_name = rollup.site_id.clone();
        }
    }

    rank_sites(&mut rollups);
    rollups.truncate(limit);
    rollups
}

/// Count descending, then site name, then site id
pub(crate) fn rank_sites(rollups: &mut [SiteRollup]) {
    rollups.sort_by(|a, b| {
        b.intervention_count
            .cmp(&a.intervention_count)
            .then_with(|| a.site_name.cmp(&b.site_name))
            .then_with(|| a.site_id.cmp(&b.site_id))
    });
}

/// Interventions per normalized type, most frequent first
///
/// Colors follow first-seen order so a type keeps its color when counts
/// change rank. `limit` truncates after ranking.
pub fn type_stats(records: &[InterventionRecord], limit: Option<usize>) -> Vec<TypeRollup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, u64)> = Vec::new();

    for record in records {
        let Some(label) = record.intervention_type.as_deref().and_then(normalize_type_label) else {
            continue;
        };
        match index.get(&label) {
            Some(&slot) => groups[slot].1 += 1,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, 1));
            }
        }
    }

    rank_types(groups, limit)
}

/// Assign colors and rank; `groups` must be in first-seen order.
pub(crate) fn rank_types(groups: Vec<(String, u64)>, limit: Option<usize>) -> Vec<TypeRollup> {
    let mut rollups: Vec<TypeRollup> = groups
        .into_iter()
        .enumerate()
        .map(|(position, (type_label, count))| TypeRollup {
            type_label,
            count,
            color_index: position % TYPE_PALETTE.len(),
        })
        .collect();

    // Stable: equal counts stay in first-seen order
    rollups.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        rollups.truncate(limit);
    }
    rollups
}

/// Underscores become spaces, surrounding whitespace is dropped.
/// Blank labels yield `None`.
pub fn normalize_type_label(raw: &str) -> Option<String> {
    let label = raw.replace('_', " ");
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// Per-month counts for the trailing `months_back` months (oldest first,
/// zero months included). Independent of any selected period.
pub fn monthly_history(
    records: &[InterventionRecord],
    months_back: u32,
    now: DateTime<Utc>,
) -> Vec<MonthCount> {
    let months = trailing_months(now, months_back);
    let mut counts = vec![0u64; months.len()];

    for record in records {
        let Some(created_at) = record.created_at else {
            continue;
        };
        let month = month_start(created_at.date_naive());
        if let Ok(slot) = months.binary_search(&month) {
            counts[slot] += 1;
        }
    }

    months
        .into_iter()
        .zip(counts)
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Labelled monthly series ready for charting
pub fn monthly_series(
    records: &[InterventionRecord],
    months_back: u32,
    now: DateTime<Utc>,
    locale: Locale,
) -> MonthlySeries {
    MonthlySeries::from_history(&monthly_history(records, months_back, now), months_back, now, locale)
}
