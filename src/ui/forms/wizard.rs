//! Collaborator registration wizard

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::forms::{Step, WizardButton, WizardForm};
use crate::state::View;
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Width of the step indicator column
const STEPS_WIDTH: u16 = 26;

/// Draw the registration wizard
pub fn draw_create_collaborator(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = app.state.wizard.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Breadcrumb
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Steps and form
        ])
        .split(area);

    draw_breadcrumb(frame, chunks[0]);
    draw_progress(frame, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(STEPS_WIDTH), Constraint::Min(30)])
        .split(chunks[2]);

    draw_step_indicator(frame, body[0], wizard.step());
    draw_step_form(frame, body[1], wizard);
}

fn draw_breadcrumb(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", View::Collaborators.title()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" • ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            View::CreateCollaborator.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let percent = app.state.progress.current().clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(f64::from(percent) / 100.0)
        .label(format!("{}%", percent.round() as u8));
    frame.render_widget(gauge, area);
}

/// Numbered list of steps; finished ones get a check mark
fn draw_step_indicator(frame: &mut Frame, area: Rect, current: Step) {
    let lines: Vec<Line> = Step::ALL
        .iter()
        .map(|step| {
            let (marker, style) = if step.index() < current.index() {
                ("✔", Style::default().fg(Color::Green))
            } else if *step == current {
                (
                    "●",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(format!("{}. {}", step.number(), step.label()), style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Steps ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_step_form(frame: &mut Frame, area: Rect, wizard: &WizardForm) {
    let step = wizard.step();
    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            step.number(),
            Step::ALL.len(),
            step.heading()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = step.fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Buttons
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (idx, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            *field,
            &wizard.draft().get(*field),
            wizard.active_field_index == idx,
            wizard.errors().get(*field),
        );
    }

    draw_buttons(frame, chunks[fields.len()], wizard);

    let help = format!(
        "Tab:next  Shift-Tab:prev  ←/→:buttons  Enter:activate  {SUBMIT_SHORTCUT}:{}  Esc:cancel",
        if step.is_last() { "finish" } else { "next" }
    );
    draw_help_text(frame, chunks[fields.len() + 2], &help);
}

fn draw_buttons(frame: &mut Frame, area: Rect, wizard: &WizardForm) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(2),
            Constraint::Length(16),
            Constraint::Min(0),
        ])
        .split(area);

    let on_buttons = wizard.is_buttons_row_active();
    let submitting = wizard.is_submitting();
    let step = wizard.step();

    render_action_button(
        frame,
        chunks[0],
        "Back",
        on_buttons && wizard.selected_button == WizardButton::Back,
        step.prev().is_some() && !submitting,
        Color::Gray,
    );

    let forward_label = if submitting {
        "Saving…"
    } else if step.is_last() {
        "Finish"
    } else {
        "Next"
    };
    render_action_button(
        frame,
        chunks[2],
        forward_label,
        on_buttons && wizard.selected_button == WizardButton::Forward,
        !submitting,
        Color::Green,
    );
}
