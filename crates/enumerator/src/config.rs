//! hid-list configuration management
//!
//! Lookup order: `--config PATH`, then the user config directory, then
//! `/etc`. Defaults apply only when none of these files exist; a file that
//! exists but does not parse is always an error.

use crate::filter::DeviceFilter;
use anyhow::{Context, Result, bail};
use descriptor::IdFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListerConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    /// Identifier formatting policy
    #[serde(default)]
    pub format: IdFormat,
    #[serde(default)]
    pub usb: UsbSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "GeneralSettings::default_log_level")]
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

impl GeneralSettings {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsbSettings {
    /// List HID interfaces only (one record per interface)
    #[serde(default = "UsbSettings::default_hid_only")]
    pub hid_only: bool,
    /// Empty means all devices
    #[serde(default)]
    pub filters: Vec<DeviceFilter>,
    /// Drop records whose identifiers do not fit in 16 bits
    #[serde(default)]
    pub strict: bool,
}

impl Default for UsbSettings {
    fn default() -> Self {
        Self {
            hid_only: Self::default_hid_only(),
            filters: Vec::new(),
            strict: false,
        }
    }
}

impl UsbSettings {
    fn default_hid_only() -> bool {
        true
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl ListerConfig {
    /// Resolve the configuration for this run
    pub fn resolve(explicit: Option<PathBuf>) -> Result<(Self, ConfigSource)> {
        Self::resolve_in(explicit, &Self::search_paths())
    }

    fn resolve_in(explicit: Option<PathBuf>, search: &[PathBuf]) -> Result<(Self, ConfigSource)> {
        let path = match explicit.or_else(|| search.iter().find(|p| p.exists()).cloned()) {
            Some(path) => path,
            None => return Ok((Self::default(), ConfigSource::Defaults)),
        };

        let config = Self::read(&path)?;
        Ok((config, ConfigSource::File(path)))
    }

    /// Read and validate one config file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ListerConfig = toml::from_str(text)?;

        if !LOG_LEVELS.contains(&config.general.log_level.as_str()) {
            bail!(
                "Invalid log level '{}', must be one of: {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(config)
    }

    /// Write this configuration, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        let text = toml::to_string_pretty(self).context("Cannot serialize configuration")?;
        fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))
    }

    /// Standard locations, highest priority first
    pub fn search_paths() -> Vec<PathBuf> {
        vec![
            Self::default_path(),
            PathBuf::from("/etc/hid-descriptors/hid-list.toml"),
        ]
    }

    /// Per-user config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("hid-descriptors")
            .join("hid-list.toml")
    }
}

/// Expand `~` in a user-supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}
