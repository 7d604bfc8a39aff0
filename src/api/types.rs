//! GitHub API response types.
//!
//! Only the fields the issue browser consumes are modelled; everything else in
//! the GitHub payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitHub account reference (issue author or assignee).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// The account login.
    pub login: String,
}

impl User {
    /// Create a user reference from a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// Marker present on issues that are actually pull requests.
///
/// GitHub's issues endpoint returns pull requests too; they carry a
/// `pull_request` object with links to the PR resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestRef {
    /// API URL of the pull request.
    #[serde(default)]
    pub url: Option<String>,
    /// Browser URL of the pull request.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A GitHub issue (or pull request) as returned by
/// `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// The issue number, unique within the repository.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// The account that opened the issue.
    pub user: User,
    /// The assigned account, if any.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Present when this record is a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
    /// URL to view the issue in a browser.
    pub html_url: String,
    /// Whether the user marked this issue as fixed during the session.
    #[serde(skip_deserializing, default)]
    pub checked: bool,
}

impl Issue {
    /// Create an issue record with no assignee that is not a pull request.
    pub fn new(number: u64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            user: User::new(author),
            assignee: None,
            pull_request: None,
            html_url: format!("https://github.com/issues/{}", number),
            checked: false,
        }
    }

    /// Set the assignee.
    pub fn with_assignee(mut self, login: impl Into<String>) -> Self {
        self.assignee = Some(User::new(login));
        self
    }

    /// Mark this record as a pull request.
    pub fn as_pull_request(mut self) -> Self {
        self.pull_request = Some(PullRequestRef::default());
        self
    }

    /// Get the author login.
    pub fn author(&self) -> &str {
        &self.user.login
    }

    /// Get the assignee login, if assigned.
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_ref().map(|u| u.login.as_str())
    }

    /// Whether this record is a pull request rather than a plain issue.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number, self.title)
    }
}

/// A published release, as returned by `GET /repos/{owner}/{repo}/releases/latest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Release {
    /// The release tag, e.g. `v1.2.3`.
    pub tag_name: String,
    /// URL of the release page.
    pub html_url: String,
}

/// Core API quota, extracted from `GET /rate_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests left in the current window.
    pub remaining: u32,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl fmt::Display for RateLimitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remaining, self.limit)
    }
}

/// Raw shape of the `/rate_limit` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateLimitResources {
    pub core: RateLimitWindow,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateLimitWindow {
    pub limit: u32,
    pub remaining: u32,
}

impl From<RateLimitResponse> for RateLimitStatus {
    fn from(response: RateLimitResponse) -> Self {
        Self {
            remaining: response.resources.core.remaining,
            limit: response.resources.core.limit,
        }
    }
}

/// The authenticated account, returned by `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    /// The account login.
    pub login: String,
}
