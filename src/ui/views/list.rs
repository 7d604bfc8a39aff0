//! Issue list view.
//!
//! Draws the filtered issues as a table with a "fixed" checkbox column and
//! search matches highlighted in the title.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Issue;
use crate::dialog::{IssueDialog, StatusTone};
use crate::ui::components::highlight_text_with_style;

/// Table and scroll state for the issue list.
#[derive(Debug, Default)]
pub struct ListView {
    table_state: TableState,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the visible issues of `dialog`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, dialog: &IssueDialog) {
        self.table_state.select(dialog.selected_index());

        let query = dialog.query();
        let rows: Vec<Row> = dialog
            .visible_issues()
            .map(|issue| issue_row(issue, query))
            .collect();

        let title = format!(
            " Issues {}/{}{} ",
            dialog.visible_len(),
            dialog.collection().len(),
            if dialog.include_pull_requests() {
                " · with pull requests"
            } else {
                ""
            }
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(16),
            ],
        )
        .header(
            Row::new(vec!["", "#", "Title", "Author", "Assignee"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);

        if dialog.visible_len() == 0 && !dialog.is_busy() {
            let message = if dialog.collection().is_empty() {
                "No issues"
            } else {
                "No issues match the current filter"
            };
            let inner = Rect::new(
                area.x + 1,
                area.y + area.height / 2,
                area.width.saturating_sub(2),
                1,
            );
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(ratatui::layout::Alignment::Center),
                inner,
            );
        }
    }
}

fn issue_row(issue: &Issue, query: &str) -> Row<'static> {
    let checkbox = if issue.checked { "[x]" } else { "[ ]" };
    let title_style = if issue.is_pull_request() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(checkbox).style(Style::default().fg(if issue.checked {
            Color::Green
        } else {
            Color::DarkGray
        })),
        Cell::from(format!("#{}", issue.number)),
        Cell::from(highlight_text_with_style(&issue.title, query, title_style)),
        Cell::from(issue.author().to_string()),
        Cell::from(issue.assignee().unwrap_or("").to_string()),
    ])
}

/// Render the one-line status bar: status text, fixed count and busy state.
pub fn render_status_line(frame: &mut Frame, area: Rect, dialog: &IssueDialog) {
    let status = dialog.status();
    let style = match status.tone {
        StatusTone::Normal => Style::default().fg(Color::Black).bg(Color::Cyan),
        StatusTone::Error => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", status.text), style),
        Span::raw(" "),
        Span::styled(
            format!("{} marked fixed", dialog.collection().checked_count()),
            Style::default().fg(Color::Green),
        ),
    ];
    if !dialog.reload_enabled() && !dialog.is_busy() {
        spans.push(Span::styled(
            "  reload disabled",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
