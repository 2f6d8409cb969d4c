//! Configuration loading and management

mod io;
mod settings;

pub use settings::{DashboardSettings, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardSettings,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Directory holding `cri_list.json` and `stats.db`
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Locale, PeriodKey};

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [dashboard]
            default_period = "week"
            locale = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.default_period, PeriodKey::Week);
        assert_eq!(config.dashboard.locale, Locale::En);
        assert_eq!(config.dashboard.top_sites_limit, 5);
        assert_eq!(config.dashboard.months_back, 6);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = Config::default();
        assert_eq!(config.data_dir(), Config::global_config_dir());

        config.storage.data_dir = Some(PathBuf::from("/srv/cri"));
        assert_eq!(config.data_dir(), PathBuf::from("/srv/cri"));
    }

    #[test]
    fn test_unknown_period_rejected() {
        let result: Result<Config, _> = toml::from_str("[dashboard]\ndefault_period = \"decade\"");
        assert!(result.is_err());
    }
}
