//! The paged fetch loop.
//!
//! Issues are requested one fixed-size page at a time, starting at page 1,
//! until the source returns an empty page. Each page is handed to the caller
//! before the next request goes out, so partial results can be shown while
//! the rest are still downloading. Only one request is ever in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, Issue, IssueSource};

/// Number of issues requested per page.
pub const PAGE_SIZE: u32 = 50;

/// The first page number.
pub const FIRST_PAGE: u32 = 1;

/// Errors that end a fetch loop early.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The issue source failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The loop was cancelled between pages.
    #[error("Download cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether this failure is an exhausted API quota.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Api(e) if e.is_rate_limited())
    }
}

/// Totals reported by a completed fetch loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Requests issued, including the final empty page.
    pub pages_requested: u32,
    /// Issues received across all pages.
    pub issues_fetched: usize,
}

/// Shared flag used to stop a fetch loop between pages.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Fetch every page of issues for `owner/repo`.
///
/// `on_page` receives each non-empty page in order. Pages already delivered
/// stay delivered when a later request fails.
///
/// # Errors
///
/// Returns [`FetchError::Api`] for the first failed request and
/// [`FetchError::Cancelled`] if `cancel` was set before a request.
#[instrument(skip(source, cancel, on_page))]
pub async fn fetch_all_pages<S, F>(
    source: &S,
    owner: &str,
    repo: &str,
    cancel: &CancelFlag,
    mut on_page: F,
) -> Result<FetchSummary, FetchError>
where
    S: IssueSource + ?Sized,
    F: FnMut(Vec<Issue>),
{
    let mut summary = FetchSummary::default();
    let mut page = FIRST_PAGE;

    loop {
        if cancel.is_cancelled() {
            debug!(page, "Fetch cancelled before request");
            return Err(FetchError::Cancelled);
        }

        summary.pages_requested += 1;
        let issues = source.list_issues(owner, repo, PAGE_SIZE, page).await?;
        info!(page, count = issues.len(), "Got issues");

        if issues.is_empty() {
            break;
        }

        summary.issues_fetched += issues.len();
        on_page(issues);
        page += 1;
    }

    Ok(summary)
}

/// Log the current API quota; failures are logged and otherwise ignored.
pub async fn log_rate_limit<S: IssueSource + ?Sized>(source: &S) {
    match source.rate_limit().await {
        Ok(status) => info!(rate_limit = %status, "Rate limit"),
        Err(e) => warn!("Could not query rate limit: {}", e),
    }
}

/// Reject credentials the API does not accept.
///
/// # Errors
///
/// Returns [`ApiError::InvalidCredentials`] if the source reports the
/// attached token as invalid, or the error of the validation request.
pub async fn check_credentials<S: IssueSource + ?Sized>(source: &S) -> Result<(), ApiError> {
    if source.validate_credentials().await? {
        debug!("Credentials accepted");
        Ok(())
    } else {
        warn!("Stored credentials were rejected");
        Err(ApiError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeSource, PageResponse};

    #[tokio::test]
    async fn test_pages_until_empty() {
        let source = FakeSource::with_page_sizes(&[50, 50, 13, 0]);
        let mut collected = Vec::new();

        let summary = fetch_all_pages(&source, "o", "r", &CancelFlag::new(), |page| {
            collected.extend(page)
        })
        .await
        .unwrap();

        assert_eq!(collected.len(), 113);
        assert_eq!(source.page_requests(), 4);
        assert_eq!(summary.pages_requested, 4);
        assert_eq!(summary.issues_fetched, 113);
    }

    #[tokio::test]
    async fn test_requests_fixed_page_size_from_first_page() {
        let source = FakeSource::with_page_sizes(&[50, 2, 0]);
        fetch_all_pages(&source, "o", "r", &CancelFlag::new(), |_| {})
            .await
            .unwrap();

        let requested = source.requested_pages.lock().unwrap().clone();
        assert_eq!(requested, vec![(50, 1), (50, 2), (50, 3)]);
    }

    #[tokio::test]
    async fn test_empty_repository_issues_single_request() {
        let source = FakeSource::with_page_sizes(&[0]);
        let mut pages = 0;
        let summary = fetch_all_pages(&source, "o", "r", &CancelFlag::new(), |_| pages += 1)
            .await
            .unwrap();

        assert_eq!(pages, 0);
        assert_eq!(summary.pages_requested, 1);
        assert_eq!(summary.issues_fetched, 0);
    }

    #[tokio::test]
    async fn test_rate_limit_keeps_delivered_pages() {
        let first: Vec<Issue> = (1..=50).map(|n| Issue::new(n, "t", "u")).collect();
        let source = FakeSource::new(vec![
            PageResponse::Page(first),
            PageResponse::RateLimited("API rate limit exceeded".to_string()),
        ]);
        let mut collected = Vec::new();

        let err = fetch_all_pages(&source, "o", "r", &CancelFlag::new(), |page| {
            collected.extend(page)
        })
        .await
        .unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(collected.len(), 50);
        assert_eq!(source.page_requests(), 2);
    }

    #[tokio::test]
    async fn test_generic_failure_is_not_rate_limited() {
        let source = FakeSource::new(vec![PageResponse::Failure("boom".to_string())]);
        let err = fetch_all_pages(&source, "o", "r", &CancelFlag::new(), |_| {})
            .await
            .unwrap_err();

        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_cancel_stops_between_pages() {
        let source = FakeSource::with_page_sizes(&[50, 50, 50, 0]);
        let cancel = CancelFlag::new();
        let flag = cancel.clone();
        let mut pages = 0;

        let err = fetch_all_pages(&source, "o", "r", &cancel, |_| {
            pages += 1;
            flag.cancel();
        })
        .await
        .unwrap_err();

        assert!(matches!(err, FetchError::Cancelled));
        assert_eq!(pages, 1);
        assert_eq!(source.page_requests(), 1);
    }

    #[tokio::test]
    async fn test_check_credentials() {
        let valid = FakeSource::new(vec![]).with_valid_credentials(true);
        assert!(check_credentials(&valid).await.is_ok());

        let invalid = FakeSource::new(vec![]);
        let err = check_credentials(&invalid).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }
}
