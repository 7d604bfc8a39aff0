//! Configuration management for LazyHub.
//!
//! Settings live in a TOML file in the platform configuration directory:
//! - Linux: `~/.config/lazyhub/config.toml`
//! - macOS: `~/Library/Application Support/lazyhub/config.toml`
//! - Windows: `C:\Users\<User>\AppData\Roaming\lazyhub\config.toml`
//!
//! `LAZYHUB_CONFIG` points at a different file. A missing file means
//! defaults. API tokens are never written here; they live in the OS keyring.

mod repository;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use repository::RepositorySlug;
pub use settings::{Settings, DEFAULT_API_BASE_URL, DEFAULT_UPDATE_REPOSITORY};

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "LAZYHUB_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file is not valid TOML for these settings.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete on-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load the configuration from `path`, using defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.settings.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Get the configuration file path.
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if the platform directory is unknown.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("lazyhub").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[settings]\nshow_pull_requests_by_default = true\nupdate_repository = \"octo/tool\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.settings.show_pull_requests_by_default);
        assert_eq!(loaded.settings.update_repository, "octo/tool");
        assert_eq!(loaded.settings.tick_rate_ms, Settings::default().tick_rate_ms);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings\nnope").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\napi_base_url = \"ftp://x\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    #[serial]
    fn test_config_path_ends_with_file_name() {
        let original = std::env::var_os(CONFIG_ENV);
        std::env::remove_var(CONFIG_ENV);

        let path = config_path().unwrap();
        assert!(path.ends_with("lazyhub/config.toml"));

        if let Some(value) = original {
            std::env::set_var(CONFIG_ENV, value);
        }
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("custom.toml");
        let original = std::env::var_os(CONFIG_ENV);
        std::env::set_var(CONFIG_ENV, &custom);

        assert_eq!(config_path().unwrap(), custom);

        match original {
            Some(value) => std::env::set_var(CONFIG_ENV, value),
            None => std::env::remove_var(CONFIG_ENV),
        }
    }
}
