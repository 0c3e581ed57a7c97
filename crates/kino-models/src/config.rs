use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub reviews: ReviewsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Capture mouse events (hover over stars, clicks on cards).
    #[serde(default = "default_mouse_capture")]
    pub mouse_capture: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// Author label stamped on the viewer's own reviews.
    #[serde(default = "default_viewer_label")]
    pub viewer_label: String,
    /// chrono format string for the submission date (ru-RU short form).
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_capture: default_mouse_capture(),
        }
    }
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            viewer_label: default_viewer_label(),
            date_format: default_date_format(),
        }
    }
}

fn default_mouse_capture() -> bool {
    true
}

fn default_viewer_label() -> String {
    "Вы".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save() {
                tracing::warn!("could not write default config: {}", e);
            }
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path,
            source,
        })?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            reviews: ReviewsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ui.mouse_capture);
        assert_eq!(config.reviews.viewer_label, "Вы");
        assert_eq!(config.reviews.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[reviews]\nviewer_label = \"Гость\"\n").unwrap();
        assert_eq!(config.reviews.viewer_label, "Гость");
        assert_eq!(config.reviews.date_format, "%d.%m.%Y");
        assert!(config.ui.mouse_capture);
    }
}
