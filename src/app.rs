//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: `update` takes
//! terminal events and task messages, `view` draws the current state. Work
//! that needs the network or the OS is not done here; it is queued as
//! pending requests that the run loop in `main` picks up and spawns.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::api::Issue;
use crate::dialog::{DialogAction, IssueDialog, STATUS_DOWNLOADING};
use crate::events::Event;
use crate::fetch::CancelFlag;
use crate::tasks::ApiMessage;
use crate::ui::{
    browse_hints, render_help_bar, render_search_bar, render_status_line, ErrorDialog, ListView,
    LoadingIndicator, Notification, NotificationManager, NotificationType, UpdatePrompt,
    SEARCH_HINTS,
};
use crate::update::UpdateStatus;

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and commands.
    #[default]
    Browse,
    /// Typing into the search line.
    Search,
}

/// A download the run loop should spawn.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub owner: String,
    pub repo: String,
    pub cancel: CancelFlag,
}

/// The main application struct that holds all state.
pub struct App {
    dialog: IssueDialog,
    mode: InputMode,
    list_view: ListView,
    loading: LoadingIndicator,
    notifications: NotificationManager,
    pending_fetch: Option<FetchRequest>,
    pending_release_check: Option<(String, String)>,
    pending_urls: Vec<String>,
}

impl App {
    /// Create an application around `dialog`.
    pub fn new(dialog: IssueDialog) -> Self {
        Self {
            dialog,
            mode: InputMode::default(),
            list_view: ListView::new(),
            loading: LoadingIndicator::new(),
            notifications: NotificationManager::new(),
            pending_fetch: None,
            pending_release_check: None,
            pending_urls: Vec::new(),
        }
    }

    /// Queue the initial download.
    ///
    /// The session's update check follows once the download has finished,
    /// so the two never hit the network at the same time.
    pub fn start(&mut self) {
        self.queue_fetch(|dialog| dialog.begin_fetch());
    }

    pub fn dialog(&self) -> &IssueDialog {
        &self.dialog
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub fn should_quit(&self) -> bool {
        self.dialog.should_close()
    }

    /// Consume the application, returning the issues marked fixed.
    pub fn into_fixed_issues(self) -> Vec<Issue> {
        self.dialog.into_fixed_issues()
    }

    /// Take the download the run loop should spawn, if any.
    pub fn take_pending_fetch(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    /// Take the release lookup the run loop should spawn, if any.
    pub fn take_pending_release_check(&mut self) -> Option<(String, String)> {
        self.pending_release_check.take()
    }

    /// Take the URLs the run loop should open in the browser.
    pub fn take_pending_urls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_urls)
    }

    /// Report that opening `url` failed.
    pub fn report_open_failure(&mut self, url: &str, error: &std::io::Error) {
        warn!(url, "Could not open browser: {}", error);
        self.notifications
            .error(format!("Could not open browser: {}", error));
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    /// Apply a message from a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::IssuePageFetched(issues) => {
                debug!(count = issues.len(), "Applying page");
                self.dialog.apply_page(issues);
                self.loading.start_with_message(format!(
                    "{} ({} so far)",
                    STATUS_DOWNLOADING,
                    self.dialog.collection().len()
                ));
            }
            ApiMessage::IssueFetchFinished(result) => {
                self.dialog.finish_fetch(result);
                if self.dialog.error_message().is_some() {
                    self.mode = InputMode::Browse;
                }
                self.sync_loading();
                if let Some(repository) = self.dialog.begin_update_check() {
                    self.pending_release_check = Some(repository);
                }
            }
            ApiMessage::ReleaseFetched(result) => {
                self.dialog.finish_update_check(result);
                if let Some(UpdateStatus::Available { latest, .. }) =
                    self.dialog.available_update()
                {
                    self.notifications.push(Notification::update(format!(
                        "LazyHub {} is available. Press u for details.",
                        latest
                    )));
                }
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Interrupted");
            self.dialog.close();
            return;
        }

        // The message box blocks all other input
        if self.dialog.error_message().is_some() {
            if ErrorDialog::is_dismiss_key(&key) {
                self.dialog.dismiss_error();
            }
            return;
        }

        if self.dialog.update_prompt_open() {
            if let Some(choice) = UpdatePrompt::choice_for_key(&key) {
                debug!(?choice, "Update prompt answered");
                let action = self.dialog.answer_update_prompt(choice);
                if !self.dialog.update_notification_visible() {
                    self.notifications.dismiss(NotificationType::Update);
                }
                if let Some(action) = action {
                    self.perform(action);
                }
            }
            return;
        }

        match self.mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.dialog.set_query("");
                self.mode = InputMode::Browse;
            }
            KeyCode::Enter => self.mode = InputMode::Browse,
            KeyCode::Backspace => self.dialog.pop_query_char(),
            KeyCode::Down => self.dialog.select_next(),
            KeyCode::Up => self.dialog.select_previous(),
            KeyCode::Char(c) => self.dialog.push_query_char(c),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("Closing issue browser");
                self.dialog.close();
            }
            KeyCode::Char('j') | KeyCode::Down => self.dialog.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.dialog.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.dialog.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.dialog.select_last(),
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(action) = self.dialog.open_selected() {
                    self.perform(action);
                }
            }
            KeyCode::Char(' ') => {
                self.dialog.toggle_fixed_selected();
            }
            KeyCode::Char('p') => self.dialog.toggle_pull_requests(),
            KeyCode::Char('r') => {
                if !self.queue_fetch(|dialog| dialog.request_reload()) {
                    debug!("Reload unavailable");
                }
            }
            KeyCode::Char('u') => {
                self.dialog.open_update_prompt();
            }
            KeyCode::Char('/') => {
                if self.dialog.search_enabled() {
                    self.mode = InputMode::Search;
                }
            }
            _ => {}
        }
    }

    /// Start a download through `begin`, queueing it for the run loop.
    fn queue_fetch(&mut self, begin: impl FnOnce(&mut IssueDialog) -> Option<CancelFlag>) -> bool {
        let Some(cancel) = begin(&mut self.dialog) else {
            return false;
        };
        let params = self.dialog.params();
        self.pending_fetch = Some(FetchRequest {
            owner: params.owner.clone(),
            repo: params.repository.clone(),
            cancel,
        });
        self.mode = InputMode::Browse;
        self.sync_loading();
        true
    }

    fn perform(&mut self, action: DialogAction) {
        match action {
            DialogAction::OpenUrl(url) | DialogAction::OpenUrlAndClose(url) => {
                self.pending_urls.push(url);
            }
        }
    }

    fn sync_loading(&mut self) {
        if self.dialog.is_busy() {
            self.loading.start_with_message(STATUS_DOWNLOADING);
        } else {
            self.loading.stop();
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(1), // Search line
                Constraint::Min(3),    // Issue table
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        render_search_bar(
            frame,
            chunks[1],
            self.dialog.query(),
            self.mode == InputMode::Search,
            self.dialog.search_enabled(),
        );
        self.list_view.render(frame, chunks[2], &self.dialog);
        render_status_line(frame, chunks[3], &self.dialog);
        self.loading.render(frame, chunks[3]);
        let hints = match self.mode {
            InputMode::Browse => browse_hints(self.dialog.update_notification_visible()),
            InputMode::Search => SEARCH_HINTS.to_string(),
        };
        render_help_bar(frame, chunks[4], &hints);

        self.notifications.render(frame, area);

        if self.dialog.update_prompt_open() {
            if let Some(UpdateStatus::Available {
                current, latest, ..
            }) = self.dialog.available_update()
            {
                UpdatePrompt::new(&current.to_string(), &latest.to_string()).render(frame, area);
            }
        }

        if let Some(message) = self.dialog.error_message() {
            ErrorDialog::new("Error", message).render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "LazyHub ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.dialog.repository_name()),
        ];
        if self.dialog.update_notification_visible() {
            spans.push(Span::styled(
                "  [u] update available",
                Style::default().fg(Color::Magenta),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }
}
