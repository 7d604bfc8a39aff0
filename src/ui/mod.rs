//! User interface components and views.
//!
//! Rendering only reads controller state; every change goes through
//! `App::update`.

mod components;
mod views;

pub use components::{
    browse_hints, centered_rect, highlight_text, highlight_text_with_style, render_help_bar,
    render_search_bar, ErrorDialog, LoadingIndicator, Notification, NotificationManager,
    NotificationType, UpdatePrompt, SEARCH_HINTS,
};
pub use views::{render_status_line, ListView};
