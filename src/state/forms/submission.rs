//! Submission of a completed wizard to the record store
//!
//! A submission runs in three phases so the insert can run off the UI task:
//! [`WizardForm::prepare_submission`] claims the submitting flag and validates,
//! [`PendingSubmission::send`] performs the insert, and
//! [`WizardForm::finish_submission`] applies the result. The submitting flag
//! travels with the pending value and is released when the last phase drops it.

use super::form_state::{SubmitGuard, WizardForm};
use super::schema::FieldSelection;
use crate::state::{NewCollaborator, View};
use crate::store::{RecordStore, StoreError};

/// Notice shown after a collaborator was stored
pub const SUCCESS_NOTICE: &str = "Collaborator registered successfully!";

/// Notice shown when the store call failed
pub const FAILURE_NOTICE: &str =
    "The collaborator could not be registered. Your data was kept, please try again.";

/// Moves the user between named views
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn go_to(&mut self, view: View);
}

/// Why a submission did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Another submission from this session is still running
    AlreadySubmitting,
    /// Validation failed; the form's errors were updated
    Invalid,
}

/// Final result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored under the given id; the form was reset and the list view requested
    Created { id: String },
    Rejected(SubmitRejected),
    /// The store call failed; draft and errors are untouched
    Failed { notice: String },
}

/// A validated record waiting to be inserted
#[derive(Debug)]
pub struct PendingSubmission {
    guard: SubmitGuard,
    collection: String,
    record: NewCollaborator,
}

impl PendingSubmission {
    pub fn record(&self) -> &NewCollaborator {
        &self.record
    }

    /// Insert the record. This is the only step of the wizard that suspends.
    pub async fn send(self, store: &dyn RecordStore) -> CompletedInsert {
        tracing::info!(
            "Inserting collaborator into {}: {}",
            self.collection,
            self.record.email
        );
        let result = store.insert(&self.collection, self.record).await;
        CompletedInsert {
            guard: self.guard,
            result,
        }
    }
}

/// The store's answer, still holding the submitting flag
#[derive(Debug)]
pub struct CompletedInsert {
    guard: SubmitGuard,
    result: Result<String, StoreError>,
}

impl WizardForm {
    /// Claim the submitting flag and run full validation.
    ///
    /// On validation failure the errors are replaced and the flag released
    /// before returning; no store call may follow.
    pub fn prepare_submission(
        &mut self,
        collection: &str,
    ) -> Result<PendingSubmission, SubmitRejected> {
        let Some(guard) = self.begin_submit() else {
            tracing::debug!("Submission ignored: one is already running");
            return Err(SubmitRejected::AlreadySubmitting);
        };

        if let Err(errors) = self.schema.validate(FieldSelection::Full, self.draft()) {
            self.replace_errors(errors);
            guard.release();
            return Err(SubmitRejected::Invalid);
        }

        Ok(PendingSubmission {
            guard,
            collection: collection.to_string(),
            record: self.draft().to_record(),
        })
    }

    /// Apply the store's answer to the form.
    ///
    /// Success resets the form and asks for the list view once; failure keeps
    /// the draft for a retry. Either way the submitting flag is cleared last.
    pub fn finish_submission(
        &mut self,
        completed: CompletedInsert,
        navigator: &mut dyn Navigator,
    ) -> SubmitOutcome {
        let CompletedInsert { guard, result } = completed;
        let outcome = match result {
            Ok(id) => {
                tracing::info!("Collaborator stored with id {id}");
                self.reset();
                navigator.go_to(View::Collaborators);
                SubmitOutcome::Created { id }
            }
            Err(e) => {
                tracing::warn!("Failed to store collaborator: {e}");
                SubmitOutcome::Failed {
                    notice: FAILURE_NOTICE.to_string(),
                }
            }
        };
        guard.release();
        outcome
    }

    /// Run a whole submission in place
    #[cfg(test)]
    pub async fn submit(
        &mut self,
        collection: &str,
        store: &dyn RecordStore,
        navigator: &mut dyn Navigator,
    ) -> SubmitOutcome {
        let pending = match self.prepare_submission(collection) {
            Ok(pending) => pending,
            Err(rejected) => return SubmitOutcome::Rejected(rejected),
        };
        let completed = pending.send(store).await;
        self.finish_submission(completed, navigator)
    }
}
