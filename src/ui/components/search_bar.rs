//! Search line and match highlighting.
//!
//! Typing after `/` edits the filter query live. The query itself lives in
//! the dialog controller; this component only draws it.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Highlight every case-insensitive occurrence of `query` in `text`.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    highlight_text_with_style(text, query, Style::default())
}

/// Like [`highlight_text`], using `base` for the unmatched parts.
pub fn highlight_text_with_style(text: &str, query: &str, base: Style) -> Line<'static> {
    let ranges = match_ranges(text, query);
    if ranges.is_empty() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let highlight = Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (start, end) in ranges {
        if start > last_end {
            spans.push(Span::styled(text[last_end..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight));
        last_end = end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base));
    }

    Line::from(spans)
}

/// Byte ranges of non-overlapping case-insensitive matches in `text`.
///
/// Compares char by char so that case folding which changes byte lengths
/// cannot split a UTF-8 sequence.
fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let folded: Vec<(usize, char)> = text
        .char_indices()
        .flat_map(|(i, c)| c.to_lowercase().map(move |l| (i, l)))
        .collect();

    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= folded.len() {
        let window = &folded[pos..pos + needle.len()];
        if window.iter().map(|&(_, c)| c).eq(needle.iter().copied()) {
            let start = window[0].0;
            let end = folded
                .get(pos + needle.len())
                .map_or(text.len(), |&(i, _)| i);
            // A folded char may expand to several; never split one
            if ranges.last().map_or(true, |&(_, prev_end)| start >= prev_end) && end > start {
                ranges.push((start, end));
            }
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    ranges
}

/// Render the search line.
///
/// Shows `/query` while editing, the committed query otherwise, and a
/// disabled hint once search is no longer available.
pub fn render_search_bar(frame: &mut Frame, area: Rect, query: &str, editing: bool, enabled: bool) {
    let (text, style) = if !enabled {
        (
            "/ search unavailable".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if editing {
        (format!("/{}", query), Style::default().fg(Color::Yellow))
    } else if query.is_empty() {
        (
            "/ to search".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (format!("/{}", query), Style::default().fg(Color::Gray))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);

    if editing && enabled {
        frame.set_cursor_position(Position::new(
            area.x + 1 + query.chars().count() as u16,
            area.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_text_empty_query() {
        let line = highlight_text("Hello World", "");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line_text(&line), "Hello World");
    }

    #[test]
    fn test_highlight_text_no_match() {
        let line = highlight_text("Hello World", "xyz");
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn test_highlight_text_single_match() {
        let line = highlight_text("Fix the login bug", "login");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "login");
    }

    #[test]
    fn test_highlight_text_keeps_original_case() {
        let line = highlight_text("Crash on STARTUP", "startup");
        assert_eq!(line.spans.last().unwrap().content, "STARTUP");
        assert_eq!(line_text(&line), "Crash on STARTUP");
    }

    #[test]
    fn test_highlight_text_multiple_matches() {
        let line = highlight_text("test a test", "test");
        let highlighted: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::Yellow))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec!["test", "test"]);
    }

    #[test]
    fn test_highlight_text_non_ascii() {
        let line = highlight_text("Überprüfung der Äpfel", "äpfel");
        assert_eq!(line_text(&line), "Überprüfung der Äpfel");
        assert_eq!(line.spans.last().unwrap().content, "Äpfel");
    }

    #[test]
    fn test_match_ranges_at_edges() {
        assert_eq!(match_ranges("abc", "a"), vec![(0, 1)]);
        assert_eq!(match_ranges("abc", "c"), vec![(2, 3)]);
        assert_eq!(match_ranges("aaa", "aa"), vec![(0, 2)]);
    }
}
