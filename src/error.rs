//! Centralized error types for LazyHub.
//!
//! Each layer has its own `thiserror` enum; `AppError` aggregates them and
//! turns them into messages suitable for the status line and message box.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::update::UpdateError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Issue download errors.
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Update check errors.
    #[error("{0}")]
    Update(#[from] UpdateError),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => api_user_message(e),
            AppError::Fetch(FetchError::Api(e)) => api_user_message(e),
            AppError::Fetch(FetchError::Cancelled) => "Download cancelled.".to_string(),
            AppError::Update(UpdateError::Api(e)) => {
                format!("Could not check for updates: {}", api_user_message(e))
            }
            AppError::Update(UpdateError::InvalidTag { tag, .. }) => {
                format!("The latest release tag '{}' is not a version.", tag)
            }
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Api(ApiError::Unauthorized | ApiError::InvalidCredentials) => {
                Some("Run 'lazyhub auth set' to store a new token.")
            }
            AppError::Api(ApiError::RateLimited(_))
            | AppError::Fetch(FetchError::Api(ApiError::RateLimited(_))) => {
                Some("Wait for the rate limit to reset or store a token with 'lazyhub auth set'.")
            }
            AppError::Config(ConfigError::ParseError(_) | ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file and start again.")
            }
            _ => None,
        }
    }
}

fn api_user_message(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized => {
            "Authentication failed. Please check your GitHub token.".to_string()
        }
        ApiError::Forbidden => {
            "Access denied. You don't have permission to access this resource.".to_string()
        }
        ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
        ApiError::RateLimited(msg) => format!("GitHub rate limit reached: {}", msg),
        ApiError::ServerError(_) => "GitHub server error. Please try again later.".to_string(),
        ApiError::Network(_) => {
            "Connection failed. Please check your internet connection.".to_string()
        }
        ApiError::InvalidResponse(_) => {
            "Unexpected response from GitHub.".to_string()
        }
        ApiError::Keyring(_) => "Could not access secure storage.".to_string(),
        ApiError::InvalidCredentials => "The stored GitHub token was rejected.".to_string(),
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_fetch_error() {
        let app_err: AppError = FetchError::Api(ApiError::Unauthorized).into();
        assert!(app_err.user_message().contains("Authentication failed"));
    }

    #[test]
    fn test_user_message_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited("API rate limit exceeded".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("rate limit"));
        assert!(err.suggested_action().unwrap().contains("auth set"));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("octo/hello".to_string()));
        assert!(err.user_message().contains("octo/hello"));
    }

    #[test]
    fn test_user_message_invalid_tag() {
        let err = AppError::Update(UpdateError::InvalidTag {
            tag: "nightly".to_string(),
            reason: "unexpected character".to_string(),
        });
        assert!(err.user_message().contains("nightly"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad url".to_string()));
        assert!(err.user_message().contains("bad url"));
    }

    #[test]
    fn test_terminal_error_message() {
        assert_eq!(
            AppError::terminal("test error").user_message(),
            "Terminal error: test error"
        );
    }

    #[test]
    fn test_suggested_action_for_bad_config() {
        let err = AppError::Config(ConfigError::ValidationError("bad url".to_string()));
        assert!(err.suggested_action().unwrap().contains("configuration file"));
        assert!(AppError::terminal("x").suggested_action().is_none());
    }
}
