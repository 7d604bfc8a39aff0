//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, RepositorySlug, Result};

/// Default GitHub API address.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Repository whose releases announce new LazyHub versions.
pub const DEFAULT_UPDATE_REPOSITORY: &str = "lazyhub/lazyhub";

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The GitHub API base address. Also the keyring key for the token.
    pub api_base_url: String,
    /// Whether pull requests are listed when the browser opens.
    pub show_pull_requests_by_default: bool,
    /// Validate the stored token at startup and abort if it is rejected.
    pub strict_credential_check: bool,
    /// Whether to look for a newer LazyHub release on startup.
    pub check_for_updates: bool,
    /// Distribution repository for update checks, as `owner/name`.
    pub update_repository: String,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            show_pull_requests_by_default: false,
            strict_credential_check: false,
            check_for_updates: true,
            update_repository: DEFAULT_UPDATE_REPOSITORY.to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_base_url cannot be empty".to_string(),
            ));
        }

        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ConfigError::ValidationError(format!(
                "api_base_url '{}' must start with http:// or https://",
                self.api_base_url
            )));
        }

        self.update_repository_slug()?;

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The update repository parsed as `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is not a repository slug.
    pub fn update_repository_slug(&self) -> Result<RepositorySlug> {
        self.update_repository.parse().map_err(|e| {
            ConfigError::ValidationError(format!("update_repository: {}", e))
        })
    }
}
