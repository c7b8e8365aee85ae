//! Application state definitions

use super::collaborator::Collaborator;
use super::forms::{CollaboratorSchema, Navigator, WizardForm};
use super::progress_animation::ProgressAnimation;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Collaborator table
    #[default]
    Collaborators,
    /// Two-step registration wizard
    CreateCollaborator,
}

impl View {
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::CreateCollaborator)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Collaborators => "Collaborators",
            View::CreateCollaborator => "Register Collaborator",
        }
    }
}

/// Current view plus the history used by "back"
#[derive(Debug, Default)]
pub struct Navigation {
    pub current_view: View,
    pub view_history: Vec<View>,
}

impl Navigation {
    /// Navigate to a new view. Reaching the home view starts the history over.
    pub fn navigate(&mut self, view: View) {
        if view == self.current_view {
            return;
        }
        if view == View::default() {
            self.view_history.clear();
        } else {
            self.view_history.push(self.current_view);
        }
        self.current_view = view;
    }

    /// Go back to the previous non-form view, or the home view when history runs out
    pub fn go_back(&mut self) {
        while let Some(view) = self.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.current_view = view;
            return;
        }
        self.current_view = View::default();
    }
}

impl Navigator for Navigation {
    fn go_to(&mut self, view: View) {
        self.navigate(view);
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub nav: Navigation,

    // Data
    pub collaborators: Vec<Collaborator>,
    pub loaded_at: Option<DateTime<Local>>,

    // Selection
    pub selected_index: usize,

    // UI state
    pub store_connected: bool,
    pub status_message: Option<String>,
    pub errors: VecDeque<String>,

    // Wizard session, present while the wizard view is mounted
    pub wizard: Option<WizardForm>,
    pub progress: ProgressAnimation,
}

impl AppState {
    pub fn current_view(&self) -> View {
        self.nav.current_view
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.collaborators.len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Replace the collaborator list, keeping the selection in range
    pub fn set_collaborators(&mut self, collaborators: Vec<Collaborator>) {
        self.collaborators = collaborators;
        self.loaded_at = Some(Local::now());
        if self.selected_index >= self.collaborators.len() {
            self.selected_index = self.collaborators.len().saturating_sub(1);
        }
    }

    pub fn selected_collaborator(&self) -> Option<&Collaborator> {
        self.collaborators.get(self.selected_index)
    }

    // Error queue

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    // Wizard session

    /// Start a fresh wizard session
    pub fn mount_wizard(&mut self, schema: CollaboratorSchema) {
        let wizard = WizardForm::new(schema);
        self.progress = ProgressAnimation::settled(wizard.step().progress());
        self.wizard = Some(wizard);
    }

    /// Drop the wizard session when its view is no longer showing
    pub fn discard_wizard_if_hidden(&mut self) {
        if self.nav.current_view != View::CreateCollaborator {
            self.wizard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collaborator(id: &str) -> Collaborator {
        Collaborator {
            id: id.to_string(),
            title: format!("Person {id}"),
            email: format!("{id}@example.com"),
            department: "IT".to_string(),
            active: true,
            avatar: None,
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_view_is_list() {
            let nav = Navigation::default();
            assert_eq!(nav.current_view, View::Collaborators);
        }

        #[test]
        fn test_navigate_saves_history() {
            let mut nav = Navigation::default();
            nav.navigate(View::CreateCollaborator);
            assert_eq!(nav.current_view, View::CreateCollaborator);
            assert_eq!(nav.view_history, vec![View::Collaborators]);
        }

        #[test]
        fn test_navigate_to_same_view_is_noop() {
            let mut nav = Navigation::default();
            nav.navigate(View::Collaborators);
            assert!(nav.view_history.is_empty());
        }

        #[test]
        fn test_go_back_skips_form_views() {
            let mut nav = Navigation {
                current_view: View::CreateCollaborator,
                view_history: vec![View::Collaborators, View::CreateCollaborator],
            };
            nav.go_back();
            assert_eq!(nav.current_view, View::Collaborators);
            assert!(nav.view_history.is_empty());
        }

        #[test]
        fn test_returning_home_clears_history() {
            let mut nav = Navigation::default();
            for _ in 0..5 {
                nav.navigate(View::CreateCollaborator);
                nav.go_to(View::Collaborators);
            }
            assert_eq!(nav.current_view, View::Collaborators);
            assert!(nav.view_history.is_empty());

            nav.navigate(View::CreateCollaborator);
            assert_eq!(nav.view_history, vec![View::Collaborators]);
        }

        #[test]
        fn test_go_back_with_empty_history_goes_home() {
            let mut nav = Navigation {
                current_view: View::CreateCollaborator,
                view_history: Vec::new(),
            };
            nav.go_back();
            assert_eq!(nav.current_view, View::Collaborators);
        }

        #[test]
        fn test_navigator_impl_navigates() {
            let mut nav = Navigation::default();
            nav.navigate(View::CreateCollaborator);
            nav.go_to(View::Collaborators);
            assert_eq!(nav.current_view, View::Collaborators);
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_selection_bounds() {
            let mut state = AppState::default();
            state.set_collaborators(vec![collaborator("a"), collaborator("b")]);
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down();
            state.move_selection_down();
            assert_eq!(state.selected_index, 1);
            assert_eq!(state.selected_collaborator().unwrap().id, "b");
        }

        #[test]
        fn test_set_collaborators_clamps_selection() {
            let mut state = AppState::default();
            state.set_collaborators(vec![collaborator("a"), collaborator("b")]);
            state.selected_index = 1;
            state.set_collaborators(vec![collaborator("a")]);
            assert_eq!(state.selected_index, 0);
            assert!(state.loaded_at.is_some());
        }

        #[test]
        fn test_move_down_on_empty_list() {
            let mut state = AppState::default();
            state.move_selection_down();
            assert_eq!(state.selected_index, 0);
            assert!(state.selected_collaborator().is_none());
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_are_shown_in_order() {
            let mut state = AppState::default();
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod wizard_session {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_mount_creates_fresh_session() {
            let mut state = AppState::default();
            state.mount_wizard(CollaboratorSchema::default());
            let wizard = state.wizard.as_ref().unwrap();
            assert_eq!(wizard.draft().title, "");
            assert_eq!(state.progress.target(), 0);
        }

        #[test]
        fn test_session_discarded_when_view_hidden() {
            let mut state = AppState::default();
            state.nav.navigate(View::CreateCollaborator);
            state.mount_wizard(CollaboratorSchema::default());
            state.discard_wizard_if_hidden();
            assert!(state.wizard.is_some());

            state.nav.go_back();
            state.discard_wizard_if_hidden();
            assert!(state.wizard.is_none());
        }
    }
}
