//! Validation rules for collaborator drafts
//!
//! Every selected field is checked independently and all violations are
//! collected, so the form can show each problem next to its field at once.

use super::draft::CollaboratorDraft;
use super::field::Field;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum number of characters in a title
pub const TITLE_MIN_LEN: usize = 3;

/// Departments offered when the configuration does not list any
pub const DEFAULT_DEPARTMENTS: [&str; 4] = ["Design", "IT", "Finance", "Human Resources"];

/// A single field-level violation. The display string is what the form shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The title must be at least {min} characters long.")]
    TooShort { min: usize },
    #[error("Please enter a valid e-mail address.")]
    InvalidFormat,
    #[error("Select a department.")]
    Required,
    #[error("\"{0}\" is not one of the available departments.")]
    UnknownOption(String),
}

/// Which fields a validation pass looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelection {
    /// Title, e-mail and the active flag; gates leaving the first step
    Partial,
    /// Every field; gates the final submission
    Full,
}

impl FieldSelection {
    pub fn fields(self) -> &'static [Field] {
        match self {
            FieldSelection::Partial => &[Field::Title, Field::Email, Field::Active],
            FieldSelection::Full => &Field::ALL,
        }
    }
}

/// Field name to display message. A missing or empty entry means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    /// Message for a field, if it currently has a non-empty one
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .get(&field)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Remove one field's entry, leaving the others alone
    pub fn clear(&mut self, field: Field) {
        self.entries.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(String::is_empty)
    }

    /// Fields with a non-empty message, in field order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, _)| *f)
    }
}

impl FromIterator<(Field, ValidationError)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, ValidationError)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, error) in iter {
            errors.insert(field, error.to_string());
        }
        errors
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_'%+-]+(?:\.[A-Za-z0-9_'%+-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        )
        .expect("email pattern is a valid regex")
    })
}

/// Whether a string looks like an e-mail address
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Constraints applied to a collaborator draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorSchema {
    departments: Vec<String>,
}

impl Default for CollaboratorSchema {
    fn default() -> Self {
        Self::new(DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect())
    }
}

impl CollaboratorSchema {
    pub fn new(departments: Vec<String>) -> Self {
        Self { departments }
    }

    /// The department options, in display order
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Check one field of the draft
    pub fn check(&self, field: Field, draft: &CollaboratorDraft) -> Option<ValidationError> {
        match field {
            Field::Title => (draft.title.chars().count() < TITLE_MIN_LEN)
                .then_some(ValidationError::TooShort { min: TITLE_MIN_LEN }),
            Field::Email => (!is_valid_email(&draft.email)).then_some(ValidationError::InvalidFormat),
            Field::Department => {
                if draft.department.is_empty() {
                    Some(ValidationError::Required)
                } else if !self.departments.iter().any(|d| *d == draft.department) {
                    Some(ValidationError::UnknownOption(draft.department.clone()))
                } else {
                    None
                }
            }
            // A bool is always a valid flag
            Field::Active => None,
        }
    }

    /// Every violation among the selected fields
    pub fn violations(
        &self,
        selection: FieldSelection,
        draft: &CollaboratorDraft,
    ) -> Vec<(Field, ValidationError)> {
        selection
            .fields()
            .iter()
            .filter_map(|&field| self.check(field, draft).map(|e| (field, e)))
            .collect()
    }

    /// Validate the selected fields, returning the error map when any fail
    pub fn validate(
        &self,
        selection: FieldSelection,
        draft: &CollaboratorDraft,
    ) -> Result<(), FieldErrors> {
        let violations = self.violations(selection, draft);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.into_iter().collect())
        }
    }
}
