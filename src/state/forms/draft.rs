//! The in-progress collaborator record edited by the wizard

use super::field::{Field, FieldValue};
use crate::state::NewCollaborator;
use thiserror::Error;

/// Errors raised when writing a value into a draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field '{field}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        field: Field,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Unvalidated collaborator data held for one wizard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorDraft {
    pub title: String,
    pub email: String,
    pub department: String,
    pub active: bool,
}

impl Default for CollaboratorDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            email: String::new(),
            department: String::new(),
            active: true,
        }
    }
}

impl CollaboratorDraft {
    /// Text content of a text field; `None` for the toggle
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Email => Some(&self.email),
            Field::Department => Some(&self.department),
            Field::Active => None,
        }
    }

    /// Overwrite a field. The draft is unchanged when the value kind does not fit.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (Field::Title, FieldValue::Text(s)) => self.title = s,
            (Field::Email, FieldValue::Text(s)) => self.email = s,
            (Field::Department, FieldValue::Text(s)) => self.department = s,
            (Field::Active, FieldValue::Toggle(b)) => self.active = b,
            (field, value) => {
                return Err(FormError::TypeMismatch {
                    field,
                    expected: if field.is_toggle() { "boolean" } else { "text" },
                    actual: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Snapshot the draft as the record payload sent to the store
    pub fn to_record(&self) -> NewCollaborator {
        NewCollaborator {
            title: self.title.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            active: self.active,
        }
    }
}
