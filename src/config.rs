// ABOUTME: Application configuration loaded from a TOML file in the platform config directory
// A missing file yields defaults; malformed files and colors are reported as ConfigError

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::components::notification_list::DEFAULT_SOURCE;
use crate::theme::{Theme, ThemeError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid theme configuration: {0}")]
    Theme(#[from] ThemeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source label stamped on every notification.
    pub source_label: String,
    pub theme: String,
    /// Oldest notifications beyond this count are evicted.
    pub max_notifications: usize,
    pub log_filter: String,
    /// Color token overrides, e.g. `"notifications.background" = "#1e1e1e"`.
    pub colors: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_label: DEFAULT_SOURCE.to_string(),
            theme: "dark".to_string(),
            max_notifications: 50,
            log_filter: "notification_center=info".to_string(),
            colors: HashMap::new(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "notification-center", "notification-center")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads from `path`, or from the default location when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    debug!("No config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The named built-in theme with color overrides applied.
    pub fn resolve_theme(&self, name: &str) -> Result<Theme, ConfigError> {
        let mut theme = Theme::builtin(name)?;
        theme.apply_overrides(&self.colors)?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorTheme, ColorToken};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
source_label = "Editor Core"
max_notifications = 3

[colors]
"notifications.background" = "#1e1e1e"
"##,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.source_label, "Editor Core");
        assert_eq!(config.max_notifications, 3);
        assert_eq!(config.theme, "dark");

        let theme = config.resolve_theme(&config.theme).unwrap();
        assert_eq!(
            theme.get_color(ColorToken::NotificationsBackground).map(|c| c.to_string()),
            Some("#1e1e1e".to_string())
        );
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_notifications = \"many\"").unwrap();

        assert!(matches!(AppConfig::load(Some(&path)), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_bad_color_override_is_reported() {
        let mut config = AppConfig::default();
        config.colors.insert("widget.shadow".to_string(), "black".to_string());
        assert!(matches!(config.resolve_theme("dark"), Err(ConfigError::Theme(ThemeError::InvalidColor(_)))));
    }
}
