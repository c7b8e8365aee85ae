//! Form domain layer
//!
//! The collaborator wizard: draft values and field errors ([`WizardForm`]),
//! validation rules ([`CollaboratorSchema`]), step transitions and progress
//! ([`Step`]), and the submission lifecycle ([`PendingSubmission`]).

mod draft;
mod field;
mod form_state;
mod schema;
mod step;
mod submission;

pub use draft::{CollaboratorDraft, FormError};
pub use field::{Field, FieldValue};
pub use form_state::{SubmitGuard, WizardButton, WizardForm};
pub use schema::{
    is_valid_email, CollaboratorSchema, FieldErrors, FieldSelection, ValidationError,
    DEFAULT_DEPARTMENTS, TITLE_MIN_LEN,
};
pub use step::{progress_at, Step, StepChange, COMPLETE_PROGRESS};
pub use submission::{
    CompletedInsert, Navigator, PendingSubmission, SubmitOutcome, SubmitRejected,
    FAILURE_NOTICE, SUCCESS_NOTICE,
};

#[cfg(test)]
pub use submission::MockNavigator;
