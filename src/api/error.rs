//! API error types for the GitHub client.

use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - the token was rejected.
    #[error("Authentication failed: check your API token")]
    Unauthorized,

    /// Permission denied - the token lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The API quota is exhausted.
    #[error("{0}")]
    RateLimited(String),

    /// GitHub server error.
    #[error("GitHub server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The stored token failed validation.
    #[error("API token is not valid")]
    InvalidCredentials,
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Message used when GitHub reports an exhausted quota without a body.
const DEFAULT_RATE_LIMIT_MESSAGE: &str = "API rate limit exceeded";

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited(rate_limit_message(context)),
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }

    /// Create an error from a failed response, detecting quota exhaustion.
    ///
    /// GitHub signals an exhausted quota with `403` or `429` and either
    /// `x-ratelimit-remaining: 0` or a message mentioning the rate limit.
    pub fn from_response_parts(
        status: reqwest::StatusCode,
        ratelimit_remaining: Option<&str>,
        message: &str,
    ) -> Self {
        let code = status.as_u16();
        let quota_exhausted = ratelimit_remaining.map(str::trim) == Some("0");
        let mentions_limit = message.to_lowercase().contains("rate limit");

        if (code == 403 || code == 429) && (quota_exhausted || mentions_limit) {
            return ApiError::RateLimited(rate_limit_message(message));
        }

        Self::from_status(status, message)
    }

    /// Whether this error means the API quota is exhausted.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited(_))
    }
}

fn rate_limit_message(message: &str) -> String {
    if message.trim().is_empty() {
        DEFAULT_RATE_LIMIT_MESSAGE.to_string()
    } else {
        message.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_401() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "test");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "repo o/r");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "repo o/r"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_status_429() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), DEFAULT_RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_error_from_status_500() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "test");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_forbidden_with_exhausted_quota_is_rate_limited() {
        let err = ApiError::from_response_parts(
            StatusCode::FORBIDDEN,
            Some("0"),
            "API rate limit exceeded for 10.0.0.1.",
        );
        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), "API rate limit exceeded for 10.0.0.1.");
    }

    #[test]
    fn test_forbidden_with_rate_limit_message_is_rate_limited() {
        let err = ApiError::from_response_parts(
            StatusCode::FORBIDDEN,
            None,
            "You have exceeded a secondary rate limit.",
        );
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_plain_forbidden_is_not_rate_limited() {
        let err = ApiError::from_response_parts(
            StatusCode::FORBIDDEN,
            Some("4999"),
            "Resource not accessible by integration",
        );
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.to_string(), "Authentication failed: check your API token");

        let err = ApiError::NotFound("o/r".to_string());
        assert_eq!(err.to_string(), "Resource not found: o/r");
    }
}
