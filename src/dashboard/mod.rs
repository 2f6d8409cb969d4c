//! Dashboard loading
//!
//! Glue between a [`DashboardStore`] and the presentation layer: resolves
//! the period, runs the four fetches concurrently, and publishes a complete
//! [`DashboardView`] per load.
//!
//! # Usage
//!
//! ```ignore
//! let stats = StatsManager::open(&data_dir.join("stats.db"))?;
//! let loader = DashboardLoader::new(Arc::new(stats.query()), DashboardOptions::default());
//!
//! if let LoadOutcome::Applied(view) = loader.load("month").await? {
//!     println!("{} interventions", view.global_stats.total_interventions);
//! }
//! ```

mod error;
mod loader;
mod store;
mod view;

pub use error::{DashboardError, StoreError};
pub use loader::{DashboardLoader, DashboardOptions, LoadOutcome};
pub use store::{DashboardStore, MemoryStore};
pub(crate) use store::filter_range;
pub use view::{DashboardStatus, DashboardView, LOAD_ERROR_MESSAGE};
