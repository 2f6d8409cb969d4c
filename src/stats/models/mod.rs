//! Data models for dashboard statistics

mod dashboard;

pub use dashboard::{
    BarEntry, ChartSeries, GlobalStats, MonthCount, MonthlyBucket, MonthlySeries, SiteRollup,
    TypeRollup,
};
