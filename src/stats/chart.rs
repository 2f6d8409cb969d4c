//! Chart data shaping
//!
//! Structural adapters only: presentation code consumes these shapes and
//! never touches the aggregation types directly.

use super::models::{BarEntry, ChartSeries, MonthlySeries, TypeRollup};

/// Colors for the type distribution, indexed by `TypeRollup::color_index`
pub const TYPE_PALETTE: [&str; 5] = ["#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"];

/// Line chart input: one label and one point per month
pub fn to_chart_series(series: &MonthlySeries) -> ChartSeries {
    ChartSeries {
        labels: series.buckets.iter().map(|b| b.month_label.clone()).collect(),
        series: vec![series.buckets.iter().map(|b| b.count as f64).collect()],
    }
}

/// Bar chart input for the type distribution
pub fn to_bar_entries(types: &[TypeRollup]) -> Vec<BarEntry> {
    types
        .iter()
        .map(|t| BarEntry {
            label: t.type_label.clone(),
            value: t.count,
            color: t.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::format::Locale;
    use crate::stats::models::MonthCount;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_chart_series_is_one_to_one() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let history = vec![MonthCount {
            month: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            count: 7,
        }];
        let series = MonthlySeries::from_history(&history, 6, now, Locale::Fr);

        let chart = to_chart_series(&series);
        assert_eq!(chart.labels, vec!["Mai", "Jun", "Jul", "Aoû", "Sep", "Oct"]);
        assert_eq!(chart.series, vec![vec![0.0, 0.0, 0.0, 0.0, 7.0, 0.0]]);
    }

    #[test]
    fn test_chart_series_empty() {
        let chart = to_chart_series(&MonthlySeries::default());
        assert!(chart.labels.is_empty());
        assert_eq!(chart.series, vec![Vec::<f64>::new()]);
    }

    #[test]
    fn test_bar_entries() {
        let types = vec![
            TypeRollup { type_label: "Audit".into(), count: 3, color_index: 1 },
            TypeRollup { type_label: "Formation".into(), count: 1, color_index: 0 },
        ];
        let bars = to_bar_entries(&types);
        assert_eq!(bars[0], BarEntry { label: "Audit".into(), value: 3, color: "#10B981" });
        assert_eq!(bars[1].color, "#4F46E5");
    }
}
