use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Check intervals, in minutes, the service accepts.
pub const SUPPORTED_RESOLUTIONS: [u32; 5] = [1, 5, 15, 30, 60];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.pingdom.com/api/2.1".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Consecutive failed probes before a notification is sent.
    #[serde(default = "default_notify_after_failures")]
    pub notify_after_failures: u32,
    #[serde(default = "default_resolution")]
    pub default_resolution: u32,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            notify_after_failures: default_notify_after_failures(),
            default_resolution: default_resolution(),
        }
    }
}

fn default_notify_after_failures() -> u32 {
    2
}
fn default_resolution() -> u32 {
    5
}

pub fn is_supported_resolution(minutes: u32) -> bool {
    SUPPORTED_RESOLUTIONS.contains(&minutes)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate api
    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        anyhow::bail!("api.base_url must be an http or https URL, got '{}'", base_url);
    }
    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }

    // Validate alerts
    if config.alerts.notify_after_failures < 1 {
        anyhow::bail!("alerts.notify_after_failures must be >= 1");
    }
    if !is_supported_resolution(config.alerts.default_resolution) {
        anyhow::bail!(
            "alerts.default_resolution must be one of {:?}, got {}",
            SUPPORTED_RESOLUTIONS,
            config.alerts.default_resolution
        );
    }

    Ok(())
}
