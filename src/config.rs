//! Configuration management
//!
//! The pipeline is configured from a TOML file with a `[manage_file]`
//! section. Missing files, unreadable files, and absent keys all fall back
//! to the defaults from `constants`.

use crate::constants::{
    DEFAULT_LOG_DIR, DEFAULT_MAX_PENDING, DEFAULT_MIN_FLUSH, DEFAULT_TIME_ROTATE_SECS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub manage_file: ManageFileConfig,
}

/// File management settings (`[manage_file]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManageFileConfig {
    /// Bounded queue capacity; a full queue suspends producers
    pub max_pending: usize,

    /// Directory receiving the timestamped output files
    pub path: PathBuf,

    /// Active file lifetime before rotation (seconds)
    pub time_rotate: u64,

    /// Writer iterations between forced flushes
    pub min_flush: u32,
}

impl Default for ManageFileConfig {
    fn default() -> Self {
        Self {
            max_pending: DEFAULT_MAX_PENDING,
            path: PathBuf::from(DEFAULT_LOG_DIR),
            time_rotate: DEFAULT_TIME_ROTATE_SECS,
            min_flush: DEFAULT_MIN_FLUSH,
        }
    }
}

impl Config {
    /// Load config from file, or fall back to defaults
    pub fn load(path: &Path) -> Config {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config parse error in {:?}: {}, using defaults", path, e);
                    Config::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config {:?}: {}, using defaults", path, e);
                Config::default()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manage_file_values() {
        let config = ManageFileConfig::default();

        assert_eq!(config.max_pending, DEFAULT_MAX_PENDING);
        assert_eq!(config.path, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(config.time_rotate, DEFAULT_TIME_ROTATE_SECS);
        assert_eq!(config.min_flush, DEFAULT_MIN_FLUSH);
    }

    #[test]
    fn test_config_empty_file() {
        // Completely empty config should use all defaults
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.manage_file.max_pending, DEFAULT_MAX_PENDING);
        assert_eq!(config.manage_file.time_rotate, DEFAULT_TIME_ROTATE_SECS);
    }

    #[test]
    fn test_config_partial_section() {
        // Config with only some keys - rest should use defaults
        let partial_toml = r#"
[manage_file]
max_pending = 32
time_rotate = 5
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.manage_file.max_pending, 32);
        assert_eq!(config.manage_file.time_rotate, 5);
        assert_eq!(config.manage_file.path, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(config.manage_file.min_flush, DEFAULT_MIN_FLUSH);
    }

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let config = Config {
            manage_file: ManageFileConfig {
                max_pending: 64,
                path: PathBuf::from("/var/log/botlog"),
                time_rotate: 120,
                min_flush: 4,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(restored.manage_file.max_pending, 64);
        assert_eq!(restored.manage_file.path, PathBuf::from("/var/log/botlog"));
        assert_eq!(restored.manage_file.time_rotate, 120);
        assert_eq!(restored.manage_file.min_flush, 4);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/botlog/config.toml"));

        assert_eq!(config.manage_file.max_pending, DEFAULT_MAX_PENDING);
        assert_eq!(config.manage_file.path, PathBuf::from(DEFAULT_LOG_DIR));
    }
}
