use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_submit_delay_ms() -> u64 {
    1500
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated round-trip of the mock login, in milliseconds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// Also send notices as desktop notifications
    #[serde(default)]
    pub notifications: bool,

    /// Check a field as soon as focus leaves it, not only on submit
    #[serde(default)]
    pub validate_on_blur: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            notifications: false,
            validate_on_blur: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("logincard");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Load config from the default location, writing defaults if missing
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Ok(Self::load_from(&path)),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Load config from `path`. Unreadable or invalid files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return AppConfig::default();
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
