//! Async task management for non-blocking API operations.
//!
//! Network work runs in background tokio tasks while the UI keeps rendering.
//! Tasks report back through an unbounded channel that the main loop drains
//! with `try_recv()` once per iteration, so all state changes still happen on
//! the event loop.
//!
//! # Adding New Task Types
//!
//! 1. Add a variant to `ApiMessage` for the result
//! 2. Add a spawn method to `TaskSpawner`
//! 3. Handle the message in `App::handle_api_message`

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Issue, IssueSource, Release};
use crate::fetch::{fetch_all_pages, log_rate_limit, CancelFlag, FetchError, FetchSummary};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// One non-empty page of issues, in fetch order.
    IssuePageFetched(Vec<Issue>),

    /// The fetch loop ended. Sent exactly once per fetch task.
    IssueFetchFinished(Result<FetchSummary, FetchError>),

    /// The latest release lookup finished.
    ReleaseFetched(Result<Release, ApiError>),
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn the paged fetch loop for `owner/repo`.
    ///
    /// Every page is forwarded as soon as it arrives. With `probe_rate_limit`
    /// the API quota is logged before and after the loop.
    pub fn spawn_fetch_issues<S>(
        &self,
        source: &S,
        owner: String,
        repo: String,
        cancel: CancelFlag,
        probe_rate_limit: bool,
    ) where
        S: IssueSource + Clone + Send + Sync + 'static,
    {
        let tx = self.tx.clone();
        let source = source.clone();
        tokio::spawn(async move {
            if probe_rate_limit {
                log_rate_limit(&source).await;
            }

            let page_tx = tx.clone();
            let result = fetch_all_pages(&source, &owner, &repo, &cancel, move |issues| {
                let _ = page_tx.send(ApiMessage::IssuePageFetched(issues));
            })
            .await;

            if probe_rate_limit {
                log_rate_limit(&source).await;
            }

            if tx.send(ApiMessage::IssueFetchFinished(result)).is_err() {
                debug!("Event loop gone before fetch finished");
            }
        });
    }

    /// Spawn a lookup of the latest release of `owner/repo`.
    pub fn spawn_check_release<S>(&self, source: &S, owner: String, repo: String)
    where
        S: IssueSource + Clone + Send + Sync + 'static,
    {
        let tx = self.tx.clone();
        let source = source.clone();
        tokio::spawn(async move {
            let result = source.latest_release(&owner, &repo).await;
            let _ = tx.send(ApiMessage::ReleaseFetched(result));
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeSource, PageResponse};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fetch_task_streams_pages_then_finishes() {
        let (mut rx, spawner) = create_task_channel();
        let source = Arc::new(FakeSource::with_page_sizes(&[50, 7, 0]));

        spawner.spawn_fetch_issues(
            &source,
            "o".to_string(),
            "r".to_string(),
            CancelFlag::new(),
            false,
        );

        let mut sizes = Vec::new();
        loop {
            match rx.recv().await.unwrap() {
                ApiMessage::IssuePageFetched(issues) => sizes.push(issues.len()),
                ApiMessage::IssueFetchFinished(result) => {
                    assert_eq!(result.unwrap().issues_fetched, 57);
                    break;
                }
                other => panic!("Unexpected message: {:?}", other),
            }
        }
        assert_eq!(sizes, vec![50, 7]);
        assert_eq!(source.rate_limit_requests.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_task_reports_error_once() {
        let (mut rx, spawner) = create_task_channel();
        let source = Arc::new(FakeSource::new(vec![PageResponse::RateLimited(
            "API rate limit exceeded".to_string(),
        )]));

        spawner.spawn_fetch_issues(&source, "o".into(), "r".into(), CancelFlag::new(), true);

        match rx.recv().await.unwrap() {
            ApiMessage::IssueFetchFinished(Err(e)) => assert!(e.is_rate_limited()),
            other => panic!("Unexpected message: {:?}", other),
        }
        assert_eq!(source.rate_limit_requests.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_release_task() {
        let (mut rx, spawner) = create_task_channel();
        let source = Arc::new(FakeSource::new(vec![]).with_release("v0.9.0"));

        spawner.spawn_check_release(&source, "lazyhub".into(), "lazyhub".into());

        match rx.recv().await.unwrap() {
            ApiMessage::ReleaseFetched(Ok(release)) => assert_eq!(release.tag_name, "v0.9.0"),
            other => panic!("Unexpected message: {:?}", other),
        }
    }
}
