//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HardsubError, HardsubResult};

/// Default Gemini model used for processing insights.
pub const DEFAULT_INSIGHTS_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL of the generative-language API.
pub const DEFAULT_INSIGHTS_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated pipeline timing.
    pub pipeline: PipelineTiming,

    /// Notification surface settings.
    pub notifications: NotificationConfig,

    /// Insights service settings.
    pub insights: InsightsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Timing of the simulated hardsub pipeline, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTiming {
    /// Deterministic lower bound of every step delay.
    pub step_base_ms: u64,

    /// Upper bound (exclusive) of the random component added to each step.
    pub step_jitter_ms: u64,

    /// Pause between the last step and completion.
    pub finalize_ms: u64,
}

/// Notification surface configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays visible.
    pub display_ms: u64,
}

/// Insights service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Whether to call the remote service at all.
    pub enabled: bool,

    /// Model name passed to `generateContent`.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// Environment variable holding the API credential.
    pub api_key_env: String,

    /// Optional HTTP timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hardsub_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            step_base_ms: 1200,
            step_jitter_ms: 1000,
            finalize_ms: 1500,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { display_ms: 4000 }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_INSIGHTS_MODEL.to_string(),
            endpoint: DEFAULT_INSIGHTS_ENDPOINT.to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl InsightsConfig {
    /// Resolve the API credential from the environment.
    ///
    /// The configured variable wins; `GEMINI_API_KEY` is accepted as a fallback.
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), "GEMINI_API_KEY"]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> HardsubResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| HardsubError::config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("hardsub").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = AppConfig::default();
        assert_eq!(config.pipeline.step_base_ms, 1200);
        assert_eq!(config.pipeline.step_jitter_ms, 1000);
        assert_eq!(config.pipeline.finalize_ms, 1500);
        assert_eq!(config.notifications.display_ms, 4000);
        assert_eq!(config.insights.model, DEFAULT_INSIGHTS_MODEL);
        assert!(config.insights.timeout_secs.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "pipeline": { "finalize_ms": 10 } }"#).unwrap();
        assert_eq!(parsed.pipeline.finalize_ms, 10);
        assert_eq!(parsed.pipeline.step_base_ms, 1200);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let dir = std::env::temp_dir().join("hardsub_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.insights.enabled = false;
        config.notifications.display_ms = 250;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(!loaded.insights.enabled);
        assert_eq!(loaded.notifications.display_ms, 250);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let dir = std::env::temp_dir().join("hardsub_test_bad_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HardsubError::Config { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }
}
