//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform;
use crate::state::forms::{
    CompletedInsert, Step, StepChange, SubmitOutcome, SubmitRejected, WizardButton, WizardForm,
    COMPLETE_PROGRESS, SUCCESS_NOTICE,
};
use crate::state::{AppState, ProgressAnimation, View};
use crate::store::{GrpcRecordStore, InMemoryRecordStore, RecordStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shown when a step or the submission is blocked by validation
const FIX_FIELDS_MESSAGE: &str = "Fix the highlighted fields to continue";

/// What a wizard key asks the app to do beyond editing the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WizardCommand {
    Forward,
    Back,
    Cancel,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Record store holding the collaborators
    store: Arc<dyn RecordStore>,
    config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
    /// Finished inserts travel back to the event loop on this channel
    submissions_tx: mpsc::UnboundedSender<CompletedInsert>,
    submissions_rx: mpsc::UnboundedReceiver<CompletedInsert>,
}

impl App {
    /// Create a new App instance, connect to the configured store and load the list
    pub async fn new(config: TuiConfig) -> Self {
        let store: Arc<dyn RecordStore> = if config.use_memory_store() {
            tracing::info!("Using in-memory record store");
            Arc::new(InMemoryRecordStore::new())
        } else {
            Arc::new(GrpcRecordStore::connect(config.store_address()).await)
        };

        let mut app = Self::with_store(config, store);
        app.reload_collaborators().await;
        app
    }

    /// Create an App around an existing store without loading anything
    pub fn with_store(config: TuiConfig, store: Arc<dyn RecordStore>) -> Self {
        let (submissions_tx, submissions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            store,
            config,
            quit: false,
            submissions_tx,
            submissions_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the UI needs fast redraws (progress easing or a running insert)
    pub fn is_animating(&self) -> bool {
        self.state.progress.is_running()
            || self
                .state
                .wizard
                .as_ref()
                .is_some_and(WizardForm::is_submitting)
    }

    /// Reload the collaborator list from the store
    pub async fn reload_collaborators(&mut self) {
        let collection = self.config.collection();
        let selected_id = self.state.selected_collaborator().map(|c| c.id.clone());
        match self.store.list_all(collection).await {
            Ok(collaborators) => {
                tracing::info!("Loaded {} collaborators from {collection}", collaborators.len());
                self.state.store_connected = true;
                self.state.set_collaborators(collaborators);
                // Keep the cursor on the same record when it is still there
                if let Some(id) = selected_id {
                    self.select_collaborator(&id);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load collaborators: {e}");
                self.state.store_connected = false;
                self.state
                    .push_error(format!("Failed to load collaborators: {e}"));
            }
        }
    }

    fn select_collaborator(&mut self, id: &str) {
        if let Some(index) = self.state.collaborators.iter().position(|c| c.id == id) {
            self.state.selected_index = index;
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.nav.navigate(view);
        self.sync_wizard_session();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.nav.go_back();
        self.sync_wizard_session();
    }

    /// Mount a fresh wizard when its view shows up, drop it when the view goes away
    fn sync_wizard_session(&mut self) {
        if self.state.current_view() == View::CreateCollaborator {
            if self.state.wizard.is_none() {
                self.state.mount_wizard(self.config.schema());
            }
        } else {
            self.state.discard_wizard_if_hidden();
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view() {
            View::Collaborators => self.handle_collaborators_key(key).await?,
            View::CreateCollaborator => self.handle_wizard_key(key)?,
        }

        Ok(())
    }

    async fn handle_collaborators_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('n') => self.navigate(View::CreateCollaborator),
            KeyCode::Char('r') => {
                self.reload_collaborators().await;
                if self.state.store_connected {
                    self.state.status_message = Some("Collaborators reloaded".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return Ok(());
        };

        // The form is frozen until the running insert answers
        if wizard.is_submitting() {
            return Ok(());
        }

        let command = if platform::is_submit_shortcut(&key) {
            Some(WizardCommand::Forward)
        } else {
            wizard_key(wizard, key)
        };

        match command {
            Some(WizardCommand::Forward) => self.wizard_forward(),
            Some(WizardCommand::Back) => self.wizard_back(),
            Some(WizardCommand::Cancel) => self.cancel_wizard(),
            None => {}
        }
        Ok(())
    }

    /// Next on intermediate steps, submission on the last one
    fn wizard_forward(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        if wizard.step().is_last() {
            self.start_submission();
            return;
        }

        match wizard.advance() {
            StepChange::Moved { to, .. } => self.state.progress.retarget(to.progress()),
            StepChange::Blocked => {
                self.state.status_message = Some(FIX_FIELDS_MESSAGE.to_string());
            }
            StepChange::Unchanged => {}
        }
    }

    fn wizard_back(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        if let StepChange::Moved { to, .. } = wizard.retreat() {
            self.state.progress.retarget(to.progress());
        }
    }

    /// Leave the wizard without saving; the draft is discarded
    fn cancel_wizard(&mut self) {
        tracing::debug!("Wizard cancelled");
        self.go_back();
    }

    /// Validate and hand the insert to a background task
    fn start_submission(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        match wizard.prepare_submission(self.config.collection()) {
            Ok(pending) => {
                self.state.status_message = Some(format!("Saving {}…", pending.record().title));
                let store = Arc::clone(&self.store);
                let tx = self.submissions_tx.clone();
                tokio::spawn(async move {
                    let completed = pending.send(store.as_ref()).await;
                    // A closed channel drops the result, which releases the submitting flag
                    let _ = tx.send(completed);
                });
            }
            Err(SubmitRejected::AlreadySubmitting) => {}
            Err(SubmitRejected::Invalid) => {
                // Show the earliest step with a failing field
                let failing = Step::ALL
                    .into_iter()
                    .find(|step| step.fields().iter().any(|f| wizard.errors().has(*f)));
                if let Some(step) = failing {
                    if step != wizard.step() {
                        wizard.set_step(step);
                        self.state.progress.retarget(step.progress());
                    }
                }
                self.state.status_message = Some(FIX_FIELDS_MESSAGE.to_string());
            }
        }
    }

    /// Apply every insert that finished since the last call
    pub async fn poll_submissions(&mut self) {
        while let Ok(completed) = self.submissions_rx.try_recv() {
            self.apply_submission(completed).await;
        }
    }

    async fn apply_submission(&mut self, completed: CompletedInsert) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            tracing::warn!("Insert finished after its wizard session was closed");
            return;
        };

        match wizard.finish_submission(completed, &mut self.state.nav) {
            SubmitOutcome::Created { id } => {
                self.state.progress = ProgressAnimation::settled(COMPLETE_PROGRESS);
                self.state.discard_wizard_if_hidden();
                self.reload_collaborators().await;
                self.select_collaborator(&id);
                self.state.status_message =
                    Some(format!("{COMPLETE_PROGRESS}% {SUCCESS_NOTICE}"));
            }
            SubmitOutcome::Failed { notice } => self.state.push_error(notice),
            SubmitOutcome::Rejected(_) => {}
        }
    }
}

/// Apply a key to the form. Returns the command the app must run, if any.
fn wizard_key(wizard: &mut WizardForm, key: KeyEvent) -> Option<WizardCommand> {
    let field = wizard.active_field();
    match key.code {
        KeyCode::Esc => return Some(WizardCommand::Cancel),
        KeyCode::Tab | KeyCode::Down => wizard.next_focus(),
        KeyCode::BackTab | KeyCode::Up => wizard.prev_focus(),
        KeyCode::Left | KeyCode::Right if field.is_none() => wizard.selected_button.toggle(),
        KeyCode::Left | KeyCode::Right if field.is_some_and(|f| f.is_choice()) => {
            wizard.cycle_department(key.code == KeyCode::Right);
        }
        KeyCode::Enter => match (field, wizard.selected_button) {
            (None, WizardButton::Back) => return Some(WizardCommand::Back),
            (None, WizardButton::Forward) => return Some(WizardCommand::Forward),
            (Some(_), _) => wizard.next_focus(),
        },
        KeyCode::Char(' ') if field.is_some_and(|f| f.is_toggle()) => wizard.toggle_active(),
        KeyCode::Char(' ') if field.is_some_and(|f| f.is_choice()) => {
            wizard.cycle_department(true);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            wizard.input_char(c);
        }
        KeyCode::Backspace => wizard.backspace(),
        _ => {}
    }
    None
}
