//! GitHub API client and types.
//!
//! This module provides the interface for communicating with the GitHub REST API.

pub mod auth;
mod client;
pub mod error;
mod source;
pub mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use error::ApiError;
pub use source::IssueSource;
pub use types::{Issue, RateLimitStatus, Release};

#[cfg(test)]
pub(crate) use source::fake;
