//! fieldcri - intervention report (CRI) dashboard
//!
//! Field technicians file project and service intervention reports. This
//! crate stores them, validates the forms, and computes the dashboard:
//! totals, busiest sites, intervention types and a monthly trend for a
//! selected period.
//!
//! ## Layers
//!
//! 1. **Domain**: reports and the [`InterventionRecord`] view the
//!    dashboard aggregates.
//! 2. **Stats**: period resolution, pure aggregation, chart shaping and a
//!    SQLite index of saved reports.
//! 3. **Dashboard**: concurrent fetches behind the [`DashboardStore`]
//!    seam, with only the newest load allowed to publish.

pub mod atomic_file;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod stats;
pub mod storage;
pub mod validation;

pub use dashboard::{DashboardLoader, DashboardStore, DashboardView};
pub use domain::*;
