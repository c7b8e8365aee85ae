//! Wizard form state: draft values, field errors, current step and the submitting flag

use super::draft::{CollaboratorDraft, FormError};
use super::field::{Field, FieldValue};
use super::schema::{CollaboratorSchema, FieldErrors};
use super::step::Step;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Buttons on the wizard's bottom row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardButton {
    Back,
    /// "Next" on intermediate steps, "Finish" on the last one
    #[default]
    Forward,
}

impl WizardButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Back => Self::Forward,
            Self::Forward => Self::Back,
        };
    }
}

/// Held while a submission is in flight. Dropping it clears the submitting flag.
#[must_use = "dropping the guard ends the submission immediately"]
#[derive(Debug)]
pub struct SubmitGuard {
    flag: Arc<AtomicBool>,
}

impl SubmitGuard {
    /// End the submission explicitly
    pub fn release(self) {}
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// State of one wizard session
#[derive(Debug)]
pub struct WizardForm {
    draft: CollaboratorDraft,
    errors: FieldErrors,
    step: Step,
    submitting: Arc<AtomicBool>,
    pub(super) schema: CollaboratorSchema,
    /// Focus position within the current step; one past the last field is the button row
    pub active_field_index: usize,
    pub selected_button: WizardButton,
}

impl WizardForm {
    pub fn new(schema: CollaboratorSchema) -> Self {
        Self {
            draft: CollaboratorDraft::default(),
            errors: FieldErrors::new(),
            step: Step::first(),
            submitting: Arc::new(AtomicBool::new(false)),
            schema,
            active_field_index: 0,
            selected_button: WizardButton::default(),
        }
    }

    pub fn draft(&self) -> &CollaboratorDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn schema(&self) -> &CollaboratorSchema {
        &self.schema
    }

    /// Overwrite a field and clear that field's error slot.
    ///
    /// Other fields' errors are left as they are; nothing is re-validated.
    pub fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), FormError> {
        self.draft.set(field, value)?;
        self.errors.clear(field);
        Ok(())
    }

    /// Move to a step without any validation
    pub fn set_step(&mut self, step: Step) {
        self.step = step;
        self.active_field_index = 0;
        self.selected_button = WizardButton::Forward;
    }

    /// Replace the whole error map with the result of a validation pass
    pub fn replace_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Draft back to defaults, errors cleared, first step
    pub fn reset(&mut self) {
        self.draft = CollaboratorDraft::default();
        self.errors = FieldErrors::new();
        self.set_step(Step::first());
    }

    /// Claim the submitting flag. Returns `None` when a submission is already running.
    pub fn begin_submit(&self) -> Option<SubmitGuard> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                flag: Arc::clone(&self.submitting),
            })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    // Focus handling

    /// Number of focus positions on the current step (fields plus the button row)
    pub fn focus_count(&self) -> usize {
        self.step.fields().len() + 1
    }

    pub fn next_focus(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.focus_count();
    }

    pub fn prev_focus(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.focus_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    /// The focused field, or `None` when the button row has focus
    pub fn active_field(&self) -> Option<Field> {
        self.step.fields().get(self.active_field_index).copied()
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field().is_none()
    }

    // Editing helpers for keyboard input. All of them go through `set_field`.

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.active_field() else {
            return;
        };
        if field.is_choice() {
            return;
        }
        if let Some(current) = self.draft.text(field) {
            let mut value = current.to_string();
            value.push(c);
            let _ = self.set_field(field, FieldValue::Text(value));
        }
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) {
        let Some(field) = self.active_field() else {
            return;
        };
        if field.is_choice() {
            return;
        }
        if let Some(current) = self.draft.text(field) {
            let mut value = current.to_string();
            if value.pop().is_some() {
                let _ = self.set_field(field, FieldValue::Text(value));
            }
        }
    }

    /// Flip the active flag
    pub fn toggle_active(&mut self) {
        let value = !self.draft.active;
        let _ = self.set_field(Field::Active, FieldValue::Toggle(value));
    }

    /// Select the next (or previous) department option, wrapping around
    pub fn cycle_department(&mut self, forward: bool) {
        let options = self.schema.departments();
        if options.is_empty() {
            return;
        }
        let current = options.iter().position(|d| *d == self.draft.department);
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        let value = options[index].clone();
        let _ = self.set_field(Field::Department, FieldValue::Text(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> WizardForm {
        WizardForm::new(CollaboratorSchema::default())
    }

    mod store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_session_defaults() {
            let form = form();
            assert_eq!(form.draft(), &CollaboratorDraft::default());
            assert!(form.errors().is_empty());
            assert_eq!(form.step(), Step::BasicInfo);
            assert!(!form.is_submitting());
        }

        #[test]
        fn test_set_field_clears_only_that_fields_error() {
            let mut form = form();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Title, "too short");
            errors.insert(Field::Email, "bad address");
            form.replace_errors(errors);

            form.set_field(Field::Title, "X".into()).unwrap();

            assert_eq!(form.draft().title, "X");
            assert!(!form.errors().has(Field::Title));
            assert_eq!(form.errors().get(Field::Email), Some("bad address"));
        }

        #[test]
        fn test_set_field_mismatch_keeps_error() {
            let mut form = form();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Title, "too short");
            form.replace_errors(errors);

            assert!(form.set_field(Field::Title, true.into()).is_err());
            assert!(form.errors().has(Field::Title));
        }

        #[test]
        fn test_set_step_is_unconditional() {
            let mut form = form();
            form.set_step(Step::ProfessionalInfo);
            assert_eq!(form.step(), Step::ProfessionalInfo);
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_replace_errors_is_wholesale() {
            let mut form = form();
            let mut first = FieldErrors::new();
            first.insert(Field::Title, "a");
            form.replace_errors(first);

            let mut second = FieldErrors::new();
            second.insert(Field::Email, "b");
            form.replace_errors(second);

            assert!(!form.errors().has(Field::Title));
            assert!(form.errors().has(Field::Email));
        }

        #[test]
        fn test_reset_restores_defaults() {
            let mut form = form();
            form.set_field(Field::Title, "Ana Silva".into()).unwrap();
            form.set_field(Field::Active, false.into()).unwrap();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Email, "bad");
            form.replace_errors(errors);
            form.set_step(Step::ProfessionalInfo);

            form.reset();

            assert_eq!(form.draft(), &CollaboratorDraft::default());
            assert!(form.errors().is_empty());
            assert_eq!(form.step(), Step::BasicInfo);
        }
    }

    mod submitting_flag {
        use super::*;

        #[test]
        fn test_begin_submit_is_exclusive() {
            let form = form();
            let guard = form.begin_submit().expect("first claim succeeds");
            assert!(form.is_submitting());
            assert!(form.begin_submit().is_none());
            guard.release();
            assert!(!form.is_submitting());
        }

        #[test]
        fn test_guard_drop_releases_flag() {
            let form = form();
            {
                let _guard = form.begin_submit().unwrap();
                assert!(form.is_submitting());
            }
            assert!(!form.is_submitting());
            assert!(form.begin_submit().is_some());
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_first_step_focus_cycle() {
            let mut form = form();
            assert_eq!(form.focus_count(), 4);
            assert_eq!(form.active_field(), Some(Field::Title));
            form.next_focus();
            assert_eq!(form.active_field(), Some(Field::Email));
            form.next_focus();
            assert_eq!(form.active_field(), Some(Field::Active));
            form.next_focus();
            assert!(form.is_buttons_row_active());
            form.next_focus();
            assert_eq!(form.active_field(), Some(Field::Title));
        }

        #[test]
        fn test_prev_focus_wraps_to_buttons() {
            let mut form = form();
            form.prev_focus();
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_button_toggle() {
            let mut button = WizardButton::default();
            assert_eq!(button, WizardButton::Forward);
            button.toggle();
            assert_eq!(button, WizardButton::Back);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_edits_focused_field_and_clears_its_error() {
            let mut form = form();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Title, "too short");
            form.replace_errors(errors);

            for c in "Ana".chars() {
                form.input_char(c);
            }
            form.backspace();

            assert_eq!(form.draft().title, "An");
            assert!(!form.errors().has(Field::Title));
        }

        #[test]
        fn test_typing_on_buttons_row_is_ignored() {
            let mut form = form();
            form.active_field_index = 3;
            form.input_char('x');
            assert_eq!(form.draft(), &CollaboratorDraft::default());
        }

        #[test]
        fn test_backspace_on_empty_field_keeps_error() {
            let mut form = form();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Title, "too short");
            form.replace_errors(errors);
            form.backspace();
            assert!(form.errors().has(Field::Title));
        }

        #[test]
        fn test_toggle_active() {
            let mut form = form();
            form.toggle_active();
            assert!(!form.draft().active);
            form.toggle_active();
            assert!(form.draft().active);
        }

        #[test]
        fn test_cycle_department_wraps_both_ways() {
            let mut form = WizardForm::new(CollaboratorSchema::new(vec![
                "Design".to_string(),
                "IT".to_string(),
            ]));
            form.cycle_department(true);
            assert_eq!(form.draft().department, "Design");
            form.cycle_department(true);
            assert_eq!(form.draft().department, "IT");
            form.cycle_department(true);
            assert_eq!(form.draft().department, "Design");
            form.cycle_department(false);
            assert_eq!(form.draft().department, "IT");
        }

        #[test]
        fn test_cycle_department_clears_department_error() {
            let mut form = form();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Department, "Select a department.");
            form.replace_errors(errors);
            form.cycle_department(false);
            assert_eq!(form.draft().department, "Human Resources");
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_typing_into_department_is_ignored() {
            let mut form = form();
            form.set_step(Step::ProfessionalInfo);
            form.input_char('x');
            assert_eq!(form.draft().department, "");
        }
    }
}
