//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::atomic_file::write_locked;

impl Config {
    /// Get the global config directory path (~/.fieldcri/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fieldcri")
    }

    /// Get the global config file path (~/.fieldcri/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// Takes an exclusive lock on a sibling `.lock` file, writes a temp file
    /// and renames it over `path`. The parent directory is created if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, content.as_bytes())
            .with_context(|| format!("Failed to save config: {}", path.display()))
    }

    /// Load global configuration from ~/.fieldcri/config.toml
    /// If no config exists, writes one with defaults first.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            Self::default().save_to_file(&global_path)?;
            eprintln!("Created {}", global_path.display());
        }

        Self::from_file(&global_path)
    }

    /// Load from an explicit path, or the global config when `None`.
    ///
    /// An explicit path that does not exist yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Self::load(),
        }
    }
}
