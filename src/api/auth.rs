//! Authentication handling for the GitHub API.
//!
//! Personal access tokens are kept in the OS keyring, keyed by the API base
//! address so that tokens for github.com and GitHub Enterprise hosts do not
//! collide. When no token is stored, requests are made unauthenticated.

use tracing::debug;

use super::error::{ApiError, Result};

/// The keyring service name for LazyHub tokens.
const KEYRING_SERVICE: &str = "lazyhub";

/// Token credentials for GitHub.
#[derive(Clone)]
pub struct Auth {
    /// The complete `Authorization` header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a personal access token.
    pub fn new(token: &str) -> Self {
        Self {
            auth_header: format!("Bearer {}", token.trim()),
        }
    }

    /// Look up the token stored for `base_url`.
    ///
    /// Returns `Ok(None)` when the keyring holds no entry for this address.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring itself cannot be accessed.
    pub fn from_keyring(base_url: &str) -> Result<Option<Self>> {
        match get_token(base_url)? {
            Some(token) if !token.trim().is_empty() => Ok(Some(Self::new(&token))),
            _ => {
                debug!("No stored token, using unauthenticated requests");
                Ok(None)
            }
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth").field("auth_header", &"<redacted>").finish()
    }
}

/// Normalize a base address so lookups are stable across trailing slashes.
fn keyring_user(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_lowercase()
}

fn entry(base_url: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(base_url))
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))
}

/// Store an API token in the OS keyring for a base address.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(base_url: &str, token: &str) -> Result<()> {
    entry(base_url)?
        .set_password(token.trim())
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))
}

/// Retrieve the API token for a base address from the OS keyring.
///
/// Returns `Ok(None)` if no token has been stored for this address.
///
/// # Errors
///
/// Returns an error if the keyring cannot be read.
pub fn get_token(base_url: &str) -> Result<Option<String>> {
    match entry(base_url)?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(ApiError::Keyring(format!("failed to retrieve token: {}", e))),
    }
}

/// Delete the API token for a base address from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_token(base_url: &str) -> Result<()> {
    entry(base_url)?
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_is_bearer() {
        let auth = Auth::new("ghp_secret");
        assert_eq!(auth.header_value(), "Bearer ghp_secret");
    }

    #[test]
    fn test_auth_trims_token() {
        let auth = Auth::new("  ghp_secret\n");
        assert_eq!(auth.header_value(), "Bearer ghp_secret");
    }

    #[test]
    fn test_auth_does_not_expose_token() {
        let auth = Auth::new("ghp_secret");
        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains("ghp_secret"));
    }

    #[test]
    fn test_keyring_user_normalization() {
        assert_eq!(keyring_user("https://api.github.com/"), "https://api.github.com");
        assert_eq!(keyring_user("HTTPS://API.GITHUB.COM"), "https://api.github.com");
    }
}
