//! CLI command implementations

pub mod dashboard;
pub mod init;
pub mod reindex;
pub mod report;

use std::path::Path;

use anyhow::Result;

use fieldcri::config::Config;
use fieldcri::stats::StatsManager;
use fieldcri::storage::ReportStore;

/// Stores shared by every command
pub struct AppContext {
    pub config: Config,
    pub reports: ReportStore,
    pub stats: StatsManager,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_from(config_path)?;
        let data_dir = config.data_dir();
        tracing::debug!(data_dir = %data_dir.display(), "Using data directory");

        let reports = ReportStore::open(&data_dir)?;
        let stats = StatsManager::open(&data_dir.join("stats.db"))?;
        Ok(Self { config, reports, stats })
    }
}
