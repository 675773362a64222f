//! Application configuration
//!
//! Loaded from `classgrid.toml` in the data directory. Every field has a
//! default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::GridWindow;
use crate::history::DEFAULT_HISTORY_WINDOW;
use crate::partition::{PartitionOptions, DEFAULT_SEARCH_ATTEMPTS};

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "classgrid.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid grid hours {start}..{end}")]
    InvalidGridHours { start: u8, end: u8 },
    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

/// Root of `classgrid.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub groups: GroupConfig,
    pub share: ShareConfig,
}

/// Schedule grid section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_hour: u8,
    pub end_hour: u8,
    /// Pixels per hour
    pub hour_height: f32,
    pub show_weekend: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        let window = GridWindow::default();
        Self {
            start_hour: window.start_hour,
            end_hour: window.end_hour,
            hour_height: window.hour_height,
            show_weekend: false,
        }
    }
}

/// Group generator section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Past sessions kept for pair avoidance
    pub history_window: usize,
    /// Candidates tried per generation when history exists
    pub search_attempts: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            search_attempts: DEFAULT_SEARCH_ATTEMPTS,
        }
    }
}

/// Share link section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://classgrid.app".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default config path inside a data directory
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        GridWindow::new(
            self.grid.start_hour,
            self.grid.end_hour,
            self.grid.hour_height,
        )
        .map_err(|_| ConfigError::InvalidGridHours {
            start: self.grid.start_hour,
            end: self.grid.end_hour,
        })?;

        if self.groups.search_attempts == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "groups.search_attempts",
                reason: "must be at least 1".into(),
            });
        }

        if self.share.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                field: "share.base_url",
                reason: "must not be empty".into(),
            });
        }

        Ok(())
    }

    pub fn grid_window(&self) -> GridWindow {
        GridWindow::new(
            self.grid.start_hour,
            self.grid.end_hour,
            self.grid.hour_height,
        )
        .unwrap_or_default()
    }

    pub fn partition_options(&self) -> PartitionOptions {
        PartitionOptions {
            attempts: self.groups.search_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.grid.start_hour, 7);
        assert_eq!(config.grid.end_hour, 22);
        assert_eq!(config.groups.history_window, 20);
        assert_eq!(config.partition_options().attempts, 30);
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
[grid]
start_hour = 8
show_weekend = true

[groups]
history_window = 5
"#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.grid.start_hour, 8);
        assert_eq!(config.grid.end_hour, 22);
        assert!(config.grid.show_weekend);
        assert_eq!(config.groups.history_window, 5);
        assert_eq!(config.groups.search_attempts, 30);
        assert_eq!(config.grid_window().total_height(), 14.0 * 60.0);
    }

    #[test]
    fn test_rejects_inverted_hours() {
        let toml = "[grid]\nstart_hour = 20\nend_hour = 9\n";
        assert!(matches!(
            AppConfig::from_toml(toml),
            Err(ConfigError::InvalidGridHours { start: 20, end: 9 })
        ));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let toml = "[groups]\nsearch_attempts = 0\n";
        assert!(matches!(
            AppConfig::from_toml(toml),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AppConfig::from_toml("[grid\nstart_hour = "),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempdir().unwrap();
        let path = AppConfig::path_in(dir.path());
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());

        std::fs::write(&path, "[share]\nbase_url = \"https://example.edu/grid\"\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.share.base_url, "https://example.edu/grid");
    }
}
