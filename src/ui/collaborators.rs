//! Collaborator list view

use super::widgets::render_scrollable_table;
use crate::app::App;
use crate::state::Collaborator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Draw the collaborator table
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let collaborators = &app.state.collaborators;

    let block = Block::default()
        .title(format!(" Collaborators ({}) ", collaborators.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    draw_header(frame, chunks[0], app);

    if collaborators.is_empty() {
        let content = Paragraph::new(vec![
            Line::from("No collaborators registered yet."),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled(
                    "n",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" to register the first one."),
            ]),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        frame.render_widget(content, chunks[1]);
        return;
    }

    let header = Row::new(["", "Name", "E-mail", "Department", "Status"])
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = collaborators.iter().map(collaborator_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▸");

    render_scrollable_table(frame, chunks[1], table, app.state.selected_index);
}

/// Title line with the last load time
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let loaded = match app.state.loaded_at {
        Some(at) => format!("Loaded at {}", at.format("%H:%M:%S")),
        None => "Not loaded".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Collaborators",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {loaded}"), Style::default().fg(Color::DarkGray)),
        Span::styled("  [r]eload [n]ew", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

fn collaborator_row(collaborator: &Collaborator) -> Row<'_> {
    // Avatars are images in the store; the terminal shows initials instead
    let avatar = Span::styled(
        format!("({})", collaborator.initials()),
        Style::default().fg(Color::Magenta),
    );

    Row::new(vec![
        Cell::from(avatar),
        Cell::from(collaborator.title.as_str()),
        Cell::from(collaborator.email.as_str()),
        Cell::from(collaborator.department.as_str()),
        Cell::from(status_badge(collaborator)),
    ])
}

/// Green "Active" or red "Inactive" label
fn status_badge(collaborator: &Collaborator) -> Span<'static> {
    let color = if collaborator.active {
        Color::Green
    } else {
        Color::Red
    };
    Span::styled(
        format!(" {} ", collaborator.status_label()),
        Style::default().fg(Color::Black).bg(color),
    )
}
