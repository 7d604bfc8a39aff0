//! Key hint line.
//!
//! Hints are written as `[key] description` and the bracketed keys are drawn
//! in a different color.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hints while browsing.
pub const BROWSE_HINTS: &str =
    "[j/k] move  [o] open  [Space] fixed  [p] pull requests  [/] search  [r] reload  [q] close";

/// Extra hint while the update badge is shown.
const UPDATE_HINT: &str = "  [u] update";

/// Browse hints, with the update key while a newer release is announced.
pub fn browse_hints(update_available: bool) -> String {
    if update_available {
        format!("{}{}", BROWSE_HINTS, UPDATE_HINT)
    } else {
        BROWSE_HINTS.to_string()
    }
}

/// Hints while typing a search.
pub const SEARCH_HINTS: &str = "[Enter] done  [Esc] clear  [Backspace] delete";

/// Render a hint line.
pub fn render_help_bar(frame: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(parse_hints_to_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(
                    std::mem::take(&mut current),
                    Style::default().fg(Color::Cyan),
                ));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(Color::DarkGray)));
    }

    spans
}
