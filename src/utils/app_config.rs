/// Application configuration management
/// Stores user preferences in ~/.config/sysmon-dashboard/config.toml

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::auth::AuthSettings;
use crate::core::thresholds::ThresholdTable;
use crate::core::ticker::DEFAULT_REFRESH_INTERVAL;

pub const APP_DIR_NAME: &str = "sysmon-dashboard";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Metric refresh period, humantime format ("7s", "500ms")
    pub refresh_interval: String,
    /// How long a critical-alert toast stays visible
    pub toast_duration: String,
    /// Simulated sign-in wait
    pub login_delay: String,
    pub thresholds: ThresholdTable,
    pub auth: AuthSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval: humantime::format_duration(DEFAULT_REFRESH_INTERVAL).to_string(),
            toast_duration: "5s".to_string(),
            login_delay: "1s".to_string(),
            thresholds: ThresholdTable::default(),
            auth: AuthSettings::default(),
        }
    }
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine the user config directory"))?
            .join(APP_DIR_NAME);
        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Directory for the session flag and the log file
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("Could not determine the user data directory"))?
            .join(APP_DIR_NAME);

        fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        Ok(data_dir)
    }

    /// Load configuration from a file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.refresh_every()?;
        self.toast_for()?;
        self.login_wait()?;
        Ok(())
    }

    pub fn refresh_every(&self) -> Result<Duration> {
        let period = parse_duration_field("refresh_interval", &self.refresh_interval)?;
        if period.is_zero() {
            return Err(anyhow!("refresh_interval must be greater than zero"));
        }
        Ok(period)
    }

    pub fn toast_for(&self) -> Result<Duration> {
        parse_duration_field("toast_duration", &self.toast_duration)
    }

    pub fn login_wait(&self) -> Result<Duration> {
        parse_duration_field("login_delay", &self.login_delay)
    }
}

fn parse_duration_field(name: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim())
        .with_context(|| format!("Invalid duration for {}: '{}'", name, value))
}
