//! Field rendering utilities for forms

use crate::state::forms::{Field, FieldValue};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: the bordered input plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a wizard field with its inline error message underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: Field,
    value: &FieldValue,
    is_active: bool,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let accent = if error.is_some() {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let content = match value {
        FieldValue::Toggle(on) => toggle_line(*on, is_active),
        FieldValue::Text(text) if field.is_choice() => choice_line(field, text, is_active),
        FieldValue::Text(text) => text_line(field, text, is_active),
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Paragraph::new(content).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}

fn text_line(field: Field, text: &str, is_active: bool) -> Line<'static> {
    let cursor = if is_active { "▌" } else { "" };
    let value = if text.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text.to_string(), value_style(is_active))
    };
    if is_active && text.is_empty() {
        // Cursor goes before the placeholder
        return Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            value,
        ]);
    }
    Line::from(vec![
        value,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn toggle_line(on: bool, is_active: bool) -> Line<'static> {
    let (mark, label) = if on { ("[x]", "Active") } else { ("[ ]", "Inactive") };
    Line::from(vec![
        Span::styled(format!("{mark} {label}"), value_style(is_active)),
        hint_span(is_active, "  Space:toggle"),
    ])
}

fn choice_line(field: Field, text: &str, is_active: bool) -> Line<'static> {
    let value = if text.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text.to_string(), value_style(is_active))
    };
    Line::from(vec![
        Span::styled("◀ ", value_style(is_active)),
        value,
        Span::styled(" ▶", value_style(is_active)),
        hint_span(is_active, "  ←/→:choose"),
    ])
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn hint_span(is_active: bool, hint: &'static str) -> Span<'static> {
    if is_active {
        Span::styled(hint, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    }
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
