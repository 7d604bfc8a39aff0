//! The issue browser controller.
//!
//! [`IssueDialog`] holds every piece of session state the browser needs (the
//! fetched issues, the filter inputs, the selection, control enablement, the
//! status line and the update notification) independently of any terminal
//! rendering. The terminal shell drives it from key presses and background
//! task messages; library callers and tests can drive it directly.

use tracing::{debug, error, info, warn};

use crate::api::{ApiError, Issue, IssueSource, Release};
use crate::collection::IssueCollection;
use crate::fetch::{fetch_all_pages, CancelFlag, FetchError, FetchSummary};
use crate::filter::FilterEngine;
use crate::update::{ReleaseState, UpdateChecker, UpdateStatus};

/// Status text while pages are downloading.
pub const STATUS_DOWNLOADING: &str = "Downloading issues…";

/// Status text when idle.
pub const STATUS_READY: &str = "Ready";

/// What the browser is opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogParams {
    /// Repository owner login.
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Initial state of the pull-request toggle.
    pub show_pull_requests_by_default: bool,
}

impl DialogParams {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            show_pull_requests_by_default: false,
        }
    }

    pub fn show_pull_requests(mut self, show: bool) -> Self {
        self.show_pull_requests_by_default = show;
        self
    }
}

/// How the status line is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusTone {
    #[default]
    Normal,
    /// Drawn in red.
    Error,
}

/// The inline status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub tone: StatusTone,
}

impl Status {
    fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Normal,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }
}

/// Side effects the controller asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Open this URL in the external browser.
    OpenUrl(String),
    /// Open this URL, then close the browser.
    OpenUrlAndClose(String),
}

/// Answers to the "update available" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChoice {
    /// Open the release page and close the browser.
    Yes,
    /// Hide the notification for the rest of the session.
    No,
    /// Dismiss the prompt only.
    Cancel,
}

/// Issue browser session state.
#[derive(Debug)]
pub struct IssueDialog {
    params: DialogParams,
    collection: IssueCollection,
    query: String,
    include_pull_requests: bool,
    visible: Vec<usize>,
    selected: Option<usize>,
    reload_enabled: bool,
    search_enabled: bool,
    busy: bool,
    status: Status,
    error_message: Option<String>,
    cancel: CancelFlag,
    updates: Option<UpdateChecker>,
    available_update: Option<UpdateStatus>,
    update_notification_visible: bool,
    update_prompt_open: bool,
    update_check_attempted: bool,
    should_close: bool,
}

impl IssueDialog {
    /// Create a browser for `params`. No fetch is started.
    pub fn new(params: DialogParams) -> Self {
        let include_pull_requests = params.show_pull_requests_by_default;
        Self {
            params,
            collection: IssueCollection::new(),
            query: String::new(),
            include_pull_requests,
            visible: Vec::new(),
            selected: None,
            reload_enabled: true,
            search_enabled: true,
            busy: false,
            status: Status::normal(STATUS_READY),
            error_message: None,
            cancel: CancelFlag::new(),
            updates: None,
            available_update: None,
            update_notification_visible: false,
            update_prompt_open: false,
            update_check_attempted: false,
            should_close: false,
        }
    }

    /// Enable the update notification using `checker`.
    pub fn with_update_checker(mut self, checker: UpdateChecker) -> Self {
        self.updates = Some(checker);
        self
    }

    pub fn params(&self) -> &DialogParams {
        &self.params
    }

    /// `owner/repository` for display.
    pub fn repository_name(&self) -> String {
        format!("{}/{}", self.params.owner, self.params.repository)
    }

    pub fn collection(&self) -> &IssueCollection {
        &self.collection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn include_pull_requests(&self) -> bool {
        self.include_pull_requests
    }

    pub fn reload_enabled(&self) -> bool {
        self.reload_enabled
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Message of the blocking error box, if one is open.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Prepare for a fresh download.
    ///
    /// Clears the search text and the collection, disables reload and shows
    /// the busy indicator. Fixed marks are carried over to the refetched
    /// issues. Returns the cancel flag the fetch loop must poll, or `None`
    /// if a download or the release lookup is already running.
    pub fn begin_fetch(&mut self) -> Option<CancelFlag> {
        if self.busy {
            debug!("Fetch already running, ignoring request");
            return None;
        }
        if self.release_lookup_running() {
            debug!("Release lookup running, ignoring fetch request");
            return None;
        }

        self.query.clear();
        self.collection.restart();
        self.reload_enabled = false;
        self.busy = true;
        self.status = Status::normal(STATUS_DOWNLOADING);
        self.cancel = CancelFlag::new();
        self.refilter();

        info!(repository = %self.repository_name(), "Downloading issues");
        Some(self.cancel.clone())
    }

    /// Start a download on user request, if reloading is allowed.
    pub fn request_reload(&mut self) -> Option<CancelFlag> {
        if !self.reload_enabled {
            return None;
        }
        self.begin_fetch()
    }

    /// Append a downloaded page and refresh the visible subset.
    pub fn apply_page(&mut self, issues: Vec<Issue>) {
        self.collection.append_page(issues);
        self.refilter();
    }

    /// Finish a download.
    ///
    /// Reload, busy indicator and status are always restored; an error then
    /// goes through [`show_error`](Self::show_error). Cancellation is silent.
    pub fn finish_fetch(&mut self, result: Result<FetchSummary, FetchError>) {
        self.reload_enabled = true;
        self.busy = false;
        self.status = Status::normal(STATUS_READY);

        match result {
            Ok(summary) => {
                info!(
                    pages = summary.pages_requested,
                    issues = summary.issues_fetched,
                    "Download complete"
                );
            }
            Err(FetchError::Cancelled) => {
                debug!("Download cancelled");
            }
            Err(e) if e.is_rate_limited() => {
                warn!("Rate limit exceeded: {}", e);
                self.show_error(e.to_string());
            }
            Err(e) => {
                error!("Failed to download issues: {}", e);
                self.show_error(e.to_string());
            }
        }
    }

    /// Put the browser in its terminal error state.
    ///
    /// Search and reload stay disabled for the rest of the session.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();

        self.query.clear();
        self.search_enabled = false;
        self.reload_enabled = false;
        self.busy = false;
        self.status = Status::error(format!("Error: {}", message));
        self.error_message = Some(message);
        self.refilter();
    }

    /// Close the blocking error box. The status line keeps the error.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Download every page from `source` into this browser.
    pub async fn load_issues<S: IssueSource + ?Sized>(&mut self, source: &S) {
        let Some(cancel) = self.begin_fetch() else {
            return;
        };
        let owner = self.params.owner.clone();
        let repo = self.params.repository.clone();

        let result = fetch_all_pages(source, &owner, &repo, &cancel, |page| {
            self.apply_page(page)
        })
        .await;

        self.finish_fetch(result);
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Replace the search text. Ignored while search is disabled.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if !self.search_enabled {
            return;
        }
        self.query = query.into();
        self.refilter();
    }

    pub fn push_query_char(&mut self, c: char) {
        if !self.search_enabled {
            return;
        }
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_query_char(&mut self) {
        if !self.search_enabled {
            return;
        }
        self.query.pop();
        self.refilter();
    }

    pub fn set_include_pull_requests(&mut self, include: bool) {
        self.include_pull_requests = include;
        self.refilter();
    }

    pub fn toggle_pull_requests(&mut self) {
        self.set_include_pull_requests(!self.include_pull_requests);
    }

    /// The filter for the current inputs.
    pub fn filter(&self) -> FilterEngine {
        FilterEngine::new(&self.query, self.include_pull_requests)
    }

    /// Recompute the visible subset, keeping the selected issue if it is
    /// still visible and otherwise clamping the selection into range.
    fn refilter(&mut self) {
        let selected_number = self.selected_issue().map(|i| i.number);
        self.visible = self.filter().visible_indices(self.collection.issues());

        if self.visible.is_empty() {
            self.selected = None;
            return;
        }

        let kept = selected_number.and_then(|number| {
            self.visible
                .iter()
                .position(|&i| self.collection.issues()[i].number == number)
        });
        self.selected = Some(match (kept, self.selected) {
            (Some(position), _) => position,
            (None, Some(old)) => old.min(self.visible.len() - 1),
            (None, None) => 0,
        });
    }

    /// Issues passing the filter, in fetch order.
    pub fn visible_issues(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.visible
            .iter()
            .filter_map(|&i| self.collection.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Position of the selection within the visible subset.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected
            .and_then(|s| self.visible.get(s))
            .and_then(|&i| self.collection.get(i))
    }

    pub fn select_next(&mut self) {
        if let Some(s) = self.selected {
            if s + 1 < self.visible.len() {
                self.selected = Some(s + 1);
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(s) = self.selected {
            self.selected = Some(s.saturating_sub(1));
        }
    }

    pub fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(self.visible.len() - 1);
        }
    }

    /// Whether "open in browser" is available.
    pub fn can_open(&self) -> bool {
        self.selected_issue().is_some()
    }

    /// Ask the host to open the selected issue.
    pub fn open_selected(&self) -> Option<DialogAction> {
        let issue = self.selected_issue()?;
        info!(number = issue.number, "Opening issue in browser");
        Some(DialogAction::OpenUrl(issue.html_url.clone()))
    }

    /// Flip the "fixed" mark of the selected issue.
    pub fn toggle_fixed_selected(&mut self) -> Option<bool> {
        let number = self.selected_issue()?.number;
        let checked = self.collection.toggle_checked(number)?;
        debug!(number, checked, "Toggled fixed");
        Some(checked)
    }

    /// Every issue marked fixed, in fetch order, whatever the filter shows.
    pub fn fixed_issues(&self) -> Vec<Issue> {
        self.collection.checked()
    }

    /// Consume the browser, returning the issues marked fixed.
    pub fn into_fixed_issues(self) -> Vec<Issue> {
        self.collection.checked()
    }

    /// Close the browser, stopping any running download between pages.
    pub fn close(&mut self) {
        self.cancel.cancel();
        self.should_close = true;
    }

    // ------------------------------------------------------------------
    // Update notification
    // ------------------------------------------------------------------

    /// Claim the session's single release lookup.
    ///
    /// Network work is serialized, so nothing is claimed while issues are
    /// downloading or after the browser closed. Returns the distribution
    /// repository `(owner, repo)` to query, or `None` if checks are disabled,
    /// blocked, or one was already attempted.
    pub fn begin_update_check(&mut self) -> Option<(String, String)> {
        if self.busy || self.should_close || self.update_check_attempted {
            return None;
        }
        let checker = self.updates.as_mut()?;
        if !checker.begin() {
            return None;
        }
        self.update_check_attempted = true;
        Some((checker.owner().to_string(), checker.repo().to_string()))
    }

    fn release_lookup_running(&self) -> bool {
        self.updates
            .as_ref()
            .is_some_and(|checker| checker.state() == &ReleaseState::Checking)
    }

    /// Record the release lookup started by
    /// [`begin_update_check`](Self::begin_update_check).
    pub fn finish_update_check(&mut self, result: Result<Release, ApiError>) {
        let Some(checker) = self.updates.as_mut() else {
            return;
        };
        match checker.complete(result) {
            Ok(status) => self.apply_update_status(status),
            Err(e) => warn!("Update check failed: {}", e),
        }
    }

    /// Run the update check inline against `source`.
    pub async fn check_for_update<S: IssueSource + ?Sized>(&mut self, source: &S) {
        let Some(checker) = self.updates.as_mut() else {
            return;
        };
        match checker.check(source).await {
            Ok(Some(status)) => self.apply_update_status(status),
            Ok(None) => {}
            Err(e) => warn!("Update check failed: {}", e),
        }
    }

    fn apply_update_status(&mut self, status: UpdateStatus) {
        if status.is_available() {
            info!("Newer release available");
            self.update_notification_visible = true;
            self.available_update = Some(status);
        } else {
            debug!("Running the latest release");
        }
    }

    /// The available update, while its notification is shown.
    pub fn available_update(&self) -> Option<&UpdateStatus> {
        if self.update_notification_visible {
            self.available_update.as_ref()
        } else {
            None
        }
    }

    pub fn update_notification_visible(&self) -> bool {
        self.update_notification_visible
    }

    pub fn update_prompt_open(&self) -> bool {
        self.update_prompt_open
    }

    /// Open the Yes/No/Cancel prompt for the notified update.
    pub fn open_update_prompt(&mut self) -> bool {
        if self.available_update().is_none() {
            return false;
        }
        self.update_prompt_open = true;
        true
    }

    /// Apply the user's answer to the update prompt.
    pub fn answer_update_prompt(&mut self, choice: UpdateChoice) -> Option<DialogAction> {
        if !self.update_prompt_open {
            return None;
        }
        self.update_prompt_open = false;

        match choice {
            UpdateChoice::Yes => {
                let url = match self.available_update.as_ref()? {
                    UpdateStatus::Available { html_url, .. } => html_url.clone(),
                    UpdateStatus::UpToDate => return None,
                };
                self.close();
                Some(DialogAction::OpenUrlAndClose(url))
            }
            UpdateChoice::No => {
                self.update_notification_visible = false;
                None
            }
            UpdateChoice::Cancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeSource, PageResponse};
    use semver::Version;

    fn dialog() -> IssueDialog {
        IssueDialog::new(DialogParams::new("octo", "hello"))
    }

    fn numbers<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Vec<u64> {
        issues.into_iter().map(|i| i.number).collect()
    }

    #[tokio::test]
    async fn test_load_collects_every_page() {
        let source = FakeSource::with_page_sizes(&[50, 50, 13, 0]);
        let mut dialog = dialog();

        dialog.load_issues(&source).await;

        assert_eq!(dialog.collection().len(), 113);
        assert_eq!(dialog.visible_len(), 113);
        assert_eq!(source.page_requests(), 4);
        assert!(dialog.reload_enabled());
        assert!(!dialog.is_busy());
        assert_eq!(dialog.status().text, STATUS_READY);
    }

    #[test]
    fn test_begin_fetch_clears_state() {
        let mut dialog = dialog();
        dialog.apply_page(vec![Issue::new(1, "Old", "u")]);
        dialog.set_query("old");

        let cancel = dialog.begin_fetch();

        assert!(cancel.is_some());
        assert_eq!(dialog.query(), "");
        assert!(dialog.collection().is_empty());
        assert!(!dialog.reload_enabled());
        assert!(dialog.is_busy());
        assert_eq!(dialog.status().text, STATUS_DOWNLOADING);
    }

    #[test]
    fn test_second_fetch_refused_while_busy() {
        let mut dialog = dialog();
        assert!(dialog.begin_fetch().is_some());
        assert!(dialog.begin_fetch().is_none());
        assert!(dialog.request_reload().is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_after_first_page() {
        let first: Vec<Issue> = (1..=50).map(|n| Issue::new(n, "t", "u")).collect();
        let source = FakeSource::new(vec![
            PageResponse::Page(first),
            PageResponse::RateLimited("API rate limit exceeded".to_string()),
        ]);
        let mut dialog = dialog();

        dialog.load_issues(&source).await;

        assert_eq!(dialog.collection().len(), 50);
        assert_eq!(dialog.status().text, "Error: API rate limit exceeded");
        assert_eq!(dialog.status().tone, StatusTone::Error);
        assert_eq!(dialog.error_message(), Some("API rate limit exceeded"));
        assert!(!dialog.reload_enabled());
        assert!(!dialog.search_enabled());
        assert!(!dialog.is_busy());
        assert!(dialog.request_reload().is_none());
    }

    #[tokio::test]
    async fn test_generic_failure_takes_same_path() {
        let source = FakeSource::new(vec![PageResponse::Failure("bad gateway".to_string())]);
        let mut dialog = dialog();

        dialog.load_issues(&source).await;

        assert_eq!(dialog.status().tone, StatusTone::Error);
        assert!(dialog.status().text.starts_with("Error: "));
        assert!(!dialog.reload_enabled());
        assert!(!dialog.search_enabled());
    }

    #[test]
    fn test_search_ignored_after_error() {
        let mut dialog = dialog();
        dialog.apply_page(vec![Issue::new(1, "Crash", "u")]);
        dialog.show_error("boom");

        dialog.set_query("crash");
        dialog.push_query_char('x');

        assert_eq!(dialog.query(), "");
        dialog.dismiss_error();
        assert!(dialog.error_message().is_none());
        assert_eq!(dialog.status().tone, StatusTone::Error);
    }

    #[test]
    fn test_cancelled_fetch_shows_no_error() {
        let mut dialog = dialog();
        dialog.begin_fetch();
        dialog.finish_fetch(Err(FetchError::Cancelled));

        assert_eq!(dialog.status().tone, StatusTone::Normal);
        assert!(dialog.error_message().is_none());
        assert!(dialog.reload_enabled());
    }

    #[tokio::test]
    async fn test_fixed_issues_ignore_filter() {
        let source = FakeSource::with_page_sizes(&[10, 0]);
        let mut dialog = dialog();
        dialog.load_issues(&source).await;

        dialog.set_query("Issue 4");
        assert_eq!(dialog.toggle_fixed_selected(), Some(true));
        dialog.set_query("Issue 9");
        assert_eq!(dialog.toggle_fixed_selected(), Some(true));

        dialog.set_query("nothing matches");
        assert_eq!(dialog.visible_len(), 0);

        assert_eq!(numbers(&dialog.fixed_issues()), vec![4, 9]);
        dialog.close();
        assert_eq!(numbers(&dialog.into_fixed_issues()), vec![4, 9]);
    }

    #[test]
    fn test_reload_keeps_fixed_marks() {
        let page = || -> Vec<Issue> {
            [3, 4, 9]
                .iter()
                .map(|&n| Issue::new(n, format!("Issue {}", n), "u"))
                .collect()
        };
        let mut dialog = dialog();
        dialog.begin_fetch();
        dialog.apply_page(page());
        dialog.finish_fetch(Ok(FetchSummary::default()));

        dialog.select_next();
        dialog.toggle_fixed_selected();
        dialog.select_last();
        dialog.toggle_fixed_selected();
        assert_eq!(numbers(&dialog.fixed_issues()), vec![4, 9]);

        assert!(dialog.request_reload().is_some());
        assert!(dialog.fixed_issues().is_empty());
        dialog.apply_page(page());
        dialog.finish_fetch(Ok(FetchSummary::default()));

        assert_eq!(numbers(&dialog.fixed_issues()), vec![4, 9]);
    }

    #[test]
    fn test_pull_request_toggle() {
        let mut dialog = dialog();
        dialog.apply_page(vec![
            Issue::new(1, "Bug", "u"),
            Issue::new(2, "Fix bug", "u").as_pull_request(),
        ]);

        assert_eq!(numbers(dialog.visible_issues()), vec![1]);
        dialog.toggle_pull_requests();
        assert_eq!(numbers(dialog.visible_issues()), vec![1, 2]);
    }

    #[test]
    fn test_show_pull_requests_by_default() {
        let mut dialog = IssueDialog::new(DialogParams::new("o", "r").show_pull_requests(true));
        dialog.apply_page(vec![Issue::new(2, "Fix", "u").as_pull_request()]);
        assert!(dialog.include_pull_requests());
        assert_eq!(dialog.visible_len(), 1);
    }

    #[test]
    fn test_selection_follows_issue_through_refilter() {
        let mut dialog = dialog();
        dialog.apply_page(vec![
            Issue::new(1, "alpha", "u"),
            Issue::new(2, "beta", "u"),
            Issue::new(3, "alphabet", "u"),
        ]);
        dialog.select_last();
        assert_eq!(dialog.selected_issue().map(|i| i.number), Some(3));

        dialog.set_query("alpha");
        assert_eq!(dialog.selected_issue().map(|i| i.number), Some(3));
        assert_eq!(dialog.selected_index(), Some(1));
    }

    #[test]
    fn test_selection_clamped_into_range() {
        let mut dialog = dialog();
        dialog.apply_page(vec![
            Issue::new(1, "alpha", "u"),
            Issue::new(2, "beta", "u"),
            Issue::new(3, "gamma", "u"),
        ]);
        dialog.select_last();
        dialog.set_query("a");
        dialog.set_query("alpha");
        assert_eq!(dialog.selected_index(), Some(0));

        dialog.set_query("zzz");
        assert_eq!(dialog.selected_index(), None);
        assert!(!dialog.can_open());
        assert!(dialog.open_selected().is_none());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut dialog = dialog();
        dialog.apply_page(vec![Issue::new(1, "a", "u"), Issue::new(2, "b", "u")]);

        dialog.select_previous();
        assert_eq!(dialog.selected_index(), Some(0));
        dialog.select_next();
        dialog.select_next();
        assert_eq!(dialog.selected_index(), Some(1));
        dialog.select_first();
        assert_eq!(dialog.selected_index(), Some(0));
    }

    #[test]
    fn test_open_selected_yields_issue_url() {
        let mut dialog = dialog();
        dialog.apply_page(vec![Issue::new(7, "a", "u")]);

        assert!(dialog.can_open());
        assert_eq!(
            dialog.open_selected(),
            Some(DialogAction::OpenUrl("https://github.com/issues/7".to_string()))
        );
    }

    #[test]
    fn test_close_cancels_running_fetch() {
        let mut dialog = dialog();
        let cancel = dialog.begin_fetch().unwrap();
        dialog.close();
        assert!(cancel.is_cancelled());
        assert!(dialog.should_close());
    }

    fn dialog_with_updates() -> IssueDialog {
        dialog().with_update_checker(UpdateChecker::new(
            "lazyhub",
            "lazyhub",
            Version::new(1, 2, 2),
        ))
    }

    #[tokio::test]
    async fn test_update_check_runs_once() {
        let source = FakeSource::new(vec![]).with_release("v1.2.3");
        let mut dialog = dialog_with_updates();

        dialog.check_for_update(&source).await;
        dialog.check_for_update(&source).await;

        assert_eq!(source.release_requests(), 1);
        assert!(dialog.update_notification_visible());
        assert!(dialog.begin_update_check().is_none());
    }

    #[tokio::test]
    async fn test_no_notification_when_current() {
        let source = FakeSource::new(vec![]).with_release("v1.2.2");
        let mut dialog = dialog_with_updates();

        dialog.check_for_update(&source).await;

        assert!(!dialog.update_notification_visible());
        assert!(!dialog.open_update_prompt());
    }

    #[test]
    fn test_update_prompt_answers() {
        let release = Release {
            tag_name: "v2.0.0".to_string(),
            html_url: "https://example.invalid/v2".to_string(),
        };
        let mut dialog = dialog_with_updates();
        assert_eq!(
            dialog.begin_update_check(),
            Some(("lazyhub".to_string(), "lazyhub".to_string()))
        );
        dialog.finish_update_check(Ok(release));

        assert!(dialog.open_update_prompt());
        assert_eq!(dialog.answer_update_prompt(UpdateChoice::Cancel), None);
        assert!(dialog.update_notification_visible());
        assert!(!dialog.should_close());

        assert!(dialog.open_update_prompt());
        assert_eq!(dialog.answer_update_prompt(UpdateChoice::No), None);
        assert!(!dialog.update_notification_visible());
        assert!(!dialog.open_update_prompt());
    }

    #[test]
    fn test_update_prompt_yes_opens_and_closes() {
        let mut dialog = dialog_with_updates();
        dialog.begin_update_check();
        dialog.finish_update_check(Ok(Release {
            tag_name: "v2.0.0".to_string(),
            html_url: "https://example.invalid/v2".to_string(),
        }));

        dialog.open_update_prompt();
        assert_eq!(
            dialog.answer_update_prompt(UpdateChoice::Yes),
            Some(DialogAction::OpenUrlAndClose(
                "https://example.invalid/v2".to_string()
            ))
        );
        assert!(dialog.should_close());
    }

    #[test]
    fn test_failed_update_check_is_quiet() {
        let mut dialog = dialog_with_updates();
        dialog.begin_update_check();
        dialog.finish_update_check(Err(ApiError::NotFound("no release".to_string())));

        assert!(!dialog.update_notification_visible());
        assert_eq!(dialog.status().tone, StatusTone::Normal);
    }

    #[test]
    fn test_release_lookup_never_overlaps_download() {
        let mut dialog = dialog_with_updates();

        dialog.begin_fetch();
        assert!(dialog.begin_update_check().is_none());
        dialog.finish_fetch(Ok(FetchSummary::default()));

        assert!(dialog.begin_update_check().is_some());
        assert!(dialog.request_reload().is_none());
        assert!(!dialog.is_busy());

        dialog.finish_update_check(Ok(Release {
            tag_name: "v1.2.2".to_string(),
            html_url: "https://example.invalid/v1".to_string(),
        }));
        assert!(dialog.request_reload().is_some());
    }

    #[test]
    fn test_failed_update_check_not_retried() {
        let mut dialog = dialog_with_updates();
        assert!(dialog.begin_update_check().is_some());
        dialog.finish_update_check(Err(ApiError::NotFound("no release".to_string())));

        assert!(dialog.begin_update_check().is_none());
        assert!(dialog.request_reload().is_some());
    }

    #[test]
    fn test_no_update_check_after_close() {
        let mut dialog = dialog_with_updates();
        dialog.close();
        assert!(dialog.begin_update_check().is_none());
    }

    #[test]
    fn test_update_check_disabled_without_checker() {
        let mut dialog = dialog();
        assert!(dialog.begin_update_check().is_none());
    }
}
