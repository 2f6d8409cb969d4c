//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::{Locale, PeriodKey};

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Period shown when none is given on the command line
    #[serde(default)]
    pub default_period: PeriodKey,

    /// Number of sites in the "top sites" list
    #[serde(default = "default_top_sites_limit")]
    pub top_sites_limit: usize,

    /// Length of the monthly series, current month included
    #[serde(default = "default_months_back")]
    pub months_back: u32,

    /// Language of month labels
    #[serde(default)]
    pub locale: Locale,
}

fn default_top_sites_limit() -> usize {
    5
}

fn default_months_back() -> u32 {
    6
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_period: PeriodKey::default(),
            top_sites_limit: default_top_sites_limit(),
            months_back: default_months_back(),
            locale: Locale::default(),
        }
    }
}

/// Where reports and the stats index are kept
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory; defaults to the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}
