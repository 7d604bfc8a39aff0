//! GitHub API client implementation.
//!
//! This module provides the client used to talk to the GitHub REST API v3.
//! It handles credentials, request/response processing and error mapping.
//! Failed requests are reported to the caller as-is; nothing is retried.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::source::IssueSource;
use super::types::{CurrentUser, Issue, RateLimitResponse, RateLimitStatus, Release};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type recommended by GitHub for REST v3 requests.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// The GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, e.g. `https://api.github.com`.
    base_url: String,
    /// Optional token credentials.
    auth: Option<Auth>,
}

impl GitHubClient {
    /// Create a client for `base_url`, attaching the token stored for that
    /// address in the OS keyring if there is one.
    ///
    /// An unreadable keyring (e.g. no secret service on a headless box) only
    /// downgrades to unauthenticated requests, unless `strict` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, or if `strict`
    /// is set and the keyring cannot be read.
    #[instrument]
    pub fn from_keyring(base_url: &str, strict: bool) -> Result<Self> {
        let auth = stored_auth(Auth::from_keyring(base_url), strict)?;
        if auth.is_some() {
            info!("Using stored API token");
        } else {
            info!("No API token stored, using unauthenticated requests");
        }
        Self::with_auth(base_url, auth)
    }

    /// Create a client with explicit (optional) credentials.
    ///
    /// Does NOT validate the credentials.
    pub fn with_auth(base_url: &str, auth: Option<Auth>) -> Result<Self> {
        Ok(Self {
            client: Self::build_http_client()?,
            base_url: normalize_base_url(base_url),
            auth,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("lazyhub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)
    }

    /// Whether a token is attached to requests.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the authenticated user.
    ///
    /// Calls `GET /user`.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        let url = format!("{}/user", self.base_url);
        self.get(&url).await
    }

    /// Perform a GET request with credentials and error handling.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE);

        if let Some(auth) = &self.auth {
            request = request.header(header::AUTHORIZATION, auth.header_value());
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(
                status,
                remaining.as_deref(),
                &url,
                &error_body,
            ))
        }
    }

    /// Create an appropriate error from an HTTP response.
    fn error_from_response(
        status: StatusCode,
        ratelimit_remaining: Option<&str>,
        url: &str,
        body: &str,
    ) -> ApiError {
        // GitHub error bodies look like {"message": "...", "documentation_url": "..."}
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| url.to_string());

        ApiError::from_response_parts(status, ratelimit_remaining, &message)
    }
}

impl IssueSource for GitHubClient {
    #[instrument(skip(self))]
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Issue>> {
        let url = format!(
            "{}/repos/{}/{}/issues?per_page={}&page={}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            per_page,
            page
        );

        let issues: Vec<Issue> = self.get(&url).await.map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound(format!("Repository {}/{}", owner, repo)),
            other => other,
        })?;
        debug!(count = issues.len(), "Fetched issue page");
        Ok(issues)
    }

    #[instrument(skip(self))]
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        self.get(&url).await
    }

    #[instrument(skip(self))]
    async fn rate_limit(&self) -> Result<RateLimitStatus> {
        let url = format!("{}/rate_limit", self.base_url);
        let response: RateLimitResponse = self.get(&url).await?;
        Ok(response.into())
    }

    #[instrument(skip(self))]
    async fn validate_credentials(&self) -> Result<bool> {
        if !self.is_authenticated() {
            return Ok(false);
        }

        match self.get_current_user().await {
            Ok(user) => {
                info!(login = %user.login, "API token is valid");
                Ok(true)
            }
            Err(ApiError::Unauthorized) => {
                warn!("API token was rejected");
                Ok(false)
            }
            Err(e) => {
                error!("Credential validation failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Settle a keyring lookup, tolerating failures outside strict mode.
fn stored_auth(lookup: Result<Option<Auth>>, strict: bool) -> Result<Option<Auth>> {
    match lookup {
        Ok(auth) => Ok(auth),
        Err(e) if strict => Err(e),
        Err(e) => {
            warn!("Could not read stored token, continuing unauthenticated: {}", e);
            Ok(None)
        }
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
