//! Runtime settings loaded from the user's config directory.
//!
//! Everything is optional: a missing or malformed config file falls back to
//! defaults with a warning, never an error.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{
    CATALOG_FILE_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_SECS,
};

/// User-tunable settings from `~/.courier/config.yaml`
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Explicit path to the saved-request catalog file
    pub catalog_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalog_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, defaulting on any failure
    pub fn load() -> Settings {
        let path = config_dir().join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the catalog file: explicit setting, then the config
    /// directory, then the working directory.
    pub fn catalog_path(&self) -> PathBuf {
        if let Some(path) = &self.catalog_file {
            return path.clone();
        }
        let home_catalog = config_dir().join(CATALOG_FILE_NAME);
        if home_catalog.exists() {
            home_catalog
        } else {
            PathBuf::from(CATALOG_FILE_NAME)
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(settings.catalog_file.is_none());
    }

    #[test]
    fn yaml_overrides_are_honored() {
        let settings: Settings =
            serde_yaml::from_str("timeout_secs: 5\ncatalog_file: /tmp/reqs.txt\n").unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.catalog_path(), PathBuf::from("/tmp/reqs.txt"));
    }

    #[test]
    fn explicit_catalog_file_takes_precedence() {
        let settings = Settings {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalog_file: Some(PathBuf::from("custom.txt")),
        };
        assert_eq!(settings.catalog_path(), PathBuf::from("custom.txt"));
    }
}
