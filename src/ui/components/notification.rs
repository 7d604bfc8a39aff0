//! Toast notifications.
//!
//! Toasts stack in the bottom-right corner above the status line. Error
//! toasts fade after a few seconds; the update notice stays until the user
//! answers the update prompt.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const ERROR_LIFETIME: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 3;
const TOAST_WIDTH: u16 = 50;

/// What a toast reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// A failure that does not end the session.
    Error,
    /// A newer release is available.
    Update,
}

impl NotificationType {
    fn icon(self) -> &'static str {
        match self {
            NotificationType::Error => "✗",
            NotificationType::Update => "↑",
        }
    }

    fn color(self) -> Color {
        match self {
            NotificationType::Error => Color::Red,
            NotificationType::Update => Color::Magenta,
        }
    }

    fn lifetime(self) -> Option<Duration> {
        match self {
            NotificationType::Error => Some(ERROR_LIFETIME),
            NotificationType::Update => None,
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationType,
    shown_at: Instant,
    /// `None` keeps the toast until it is dismissed.
    lifetime: Option<Duration>,
}

impl Notification {
    fn new(message: impl Into<String>, kind: NotificationType) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            lifetime: kind.lifetime(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// A sticky update notice.
    pub fn update(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Update)
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime
            .is_some_and(|lifetime| self.shown_at.elapsed() > lifetime)
    }

    /// Rows needed to show the message at `inner_width`, borders included.
    fn height(&self, inner_width: usize) -> u16 {
        // Icon and space come before the message
        let chars = self.message.chars().count() + 2;
        let lines = chars.div_ceil(inner_width.max(1)).max(1);
        lines as u16 + 2
    }
}

/// The visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct NotificationManager {
    toasts: VecDeque<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, dropping the oldest once more than three are up.
    pub fn push(&mut self, notification: Notification) {
        self.toasts.push_back(notification);
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Remove every toast of `kind`.
    pub fn dismiss(&mut self, kind: NotificationType) {
        self.toasts.retain(|n| n.kind != kind);
    }

    /// Drop expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.toasts.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() {
            return;
        }

        let width = TOAST_WIDTH.min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4) as usize;
        let heights: Vec<u16> = self.toasts.iter().map(|n| n.height(inner_width)).collect();
        let stack_height = heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));

        // Two rows up so the status line and key hints stay readable
        let stack = Rect::new(
            area.x + area.width.saturating_sub(width + 2),
            area.y + area.height.saturating_sub(stack_height + 2),
            width,
            stack_height,
        );
        let slots = Layout::vertical(heights.iter().map(|&h| Constraint::Length(h))).split(stack);

        for (toast, slot) in self.toasts.iter().zip(slots.iter()) {
            render_toast(frame, *slot, toast);
        }
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Notification) {
    let style = Style::default().fg(toast.kind.color());
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), style),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .wrap(Wrap { trim: true }),
        area,
    );
}
