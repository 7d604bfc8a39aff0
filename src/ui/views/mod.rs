//! Full-screen views.

mod list;

pub use list::{render_status_line, ListView};
