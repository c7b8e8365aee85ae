//! UI module for rendering the TUI

mod collaborators;
mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match app.state.current_view() {
        View::Collaborators => collaborators::draw_list(frame, main_area, app),
        View::CreateCollaborator => forms::draw_create_collaborator(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Errors are modal and drawn on top of everything
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.errors.len());
    }
}
