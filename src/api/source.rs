//! The remote issue source abstraction.
//!
//! The fetch loop, the update checker and the dialog controller only talk to
//! the network through this trait, so they can be exercised against an
//! in-memory source in tests.

use std::future::Future;
use std::sync::Arc;

use super::error::Result;
use super::types::{Issue, RateLimitStatus, Release};

/// A provider of paged issue records and release metadata.
pub trait IssueSource {
    /// Fetch one page of issues for `owner/repo`.
    ///
    /// Pages are 1-based. An empty vector means there are no more pages.
    fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Issue>>> + Send;

    /// Fetch the latest published release of `owner/repo`.
    fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Release>> + Send;

    /// Fetch the current core API quota.
    fn rate_limit(&self) -> impl Future<Output = Result<RateLimitStatus>> + Send;

    /// Check that the attached credentials are accepted.
    ///
    /// Returns `Ok(false)` when no credentials are attached.
    fn validate_credentials(&self) -> impl Future<Output = Result<bool>> + Send;
}

impl<S: IssueSource + Send + Sync + ?Sized> IssueSource for Arc<S> {
    fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Issue>>> + Send {
        (**self).list_issues(owner, repo, per_page, page)
    }

    fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Release>> + Send {
        (**self).latest_release(owner, repo)
    }

    fn rate_limit(&self) -> impl Future<Output = Result<RateLimitStatus>> + Send {
        (**self).rate_limit()
    }

    fn validate_credentials(&self) -> impl Future<Output = Result<bool>> + Send {
        (**self).validate_credentials()
    }
}
