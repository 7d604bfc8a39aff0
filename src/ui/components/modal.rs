//! Blocking message box and the update prompt.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::dialog::UpdateChoice;

/// A centered error message box dismissed with Enter or Esc.
pub struct ErrorDialog<'a> {
    title: &'a str,
    message: &'a str,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message }
    }

    /// Whether `key` closes the box.
    pub fn is_dismiss_key(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 60.min(area.width.saturating_sub(4));
        let inner = width.saturating_sub(4).max(1) as usize;
        let lines = (self.message.chars().count().div_ceil(inner)) as u16;
        let popup = centered_rect(width, lines + 5, area);

        frame.render_widget(Clear, popup);

        let text = vec![
            Line::from(Span::styled(
                self.message.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup);
    }
}

/// The "newer release available" Yes/No/Cancel prompt.
pub struct UpdatePrompt<'a> {
    current: &'a str,
    latest: &'a str,
}

impl<'a> UpdatePrompt<'a> {
    pub fn new(current: &'a str, latest: &'a str) -> Self {
        Self { current, latest }
    }

    /// Map a key press to an answer.
    pub fn choice_for_key(key: &KeyEvent) -> Option<UpdateChoice> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(UpdateChoice::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(UpdateChoice::No),
            KeyCode::Char('c') | KeyCode::Esc => Some(UpdateChoice::Cancel),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(56, 9, area);
        frame.render_widget(Clear, popup);

        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(Color::DarkGray);

        let text = vec![
            Line::from(format!(
                "LazyHub {} is available (you have {}).",
                self.latest, self.current
            )),
            Line::raw(""),
            Line::from("Open the release page and quit?"),
            Line::raw(""),
            Line::from(vec![
                Span::styled("[y]", key),
                Span::styled(" yes  ", hint),
                Span::styled("[n]", key),
                Span::styled(" don't remind me  ", hint),
                Span::styled("[Esc]", key),
                Span::styled(" cancel", hint),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(" Update available ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup);
    }
}

/// A `width` x `height` rectangle centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
