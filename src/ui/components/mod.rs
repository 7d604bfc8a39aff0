//! Reusable UI components.

mod help_bar;
mod loading;
mod modal;
mod notification;
mod search_bar;

pub use help_bar::{browse_hints, render_help_bar, SEARCH_HINTS};
pub use loading::LoadingIndicator;
pub use modal::{centered_rect, ErrorDialog, UpdatePrompt};
pub use notification::{Notification, NotificationManager, NotificationType};
pub use search_bar::{highlight_text, highlight_text_with_style, render_search_bar};
