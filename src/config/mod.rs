//! Configuration system for Vitals

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub collector: CollectorConfig,
    pub network: NetworkConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vitals").join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: String,
    pub animations: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "aurora".to_string(),
            animations: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Seconds between metric refreshes.
    pub interval_secs: u64,
    /// How many processes to keep in the snapshot, busiest first.
    pub top_processes: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            top_processes: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Interface whose address is shown as the machine's IP. The notion of
    /// a "primary" adapter is platform lore, so it lives in config.
    pub primary_interface: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let primary = if cfg!(target_os = "macos") { "en0" } else { "eth0" };
        Self {
            primary_interface: primary.to_string(),
        }
    }
}
