//! Wizard steps, step transitions and progress

use super::field::Field;
use super::form_state::WizardForm;
use super::schema::{FieldErrors, FieldSelection};

/// Progress shown once the record has been stored
pub const COMPLETE_PROGRESS: u8 = 100;

/// The wizard's steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    BasicInfo,
    ProfessionalInfo,
}

impl Step {
    pub const ALL: [Step; 2] = [Step::BasicInfo, Step::ProfessionalInfo];

    pub fn first() -> Self {
        Self::ALL[0]
    }

    /// Zero-based position in the step sequence
    pub fn index(self) -> usize {
        match self {
            Step::BasicInfo => 0,
            Step::ProfessionalInfo => 1,
        }
    }

    /// One-based step number, as shown to the user
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Short label for the step indicator
    pub fn label(self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Info",
            Step::ProfessionalInfo => "Professional Info",
        }
    }

    /// Heading shown above the step's fields
    pub fn heading(self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Information",
            Step::ProfessionalInfo => "Professional Information",
        }
    }

    /// Fields edited on this step, in focus order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::BasicInfo => &[Field::Title, Field::Email, Field::Active],
            Step::ProfessionalInfo => &[Field::Department],
        }
    }

    /// Fields that must be valid before leaving this step forward
    pub fn gate(self) -> FieldSelection {
        if self.is_last() {
            FieldSelection::Full
        } else {
            FieldSelection::Partial
        }
    }

    /// Completion percentage while this step is showing
    pub fn progress(self) -> u8 {
        progress_at(self.index(), Self::ALL.len())
    }
}

/// Percentage for position `index` of `step_count` steps followed by a completion stage.
///
/// Positions are spread evenly: `0, 100/N, ..., 100`.
pub fn progress_at(index: usize, step_count: usize) -> u8 {
    if step_count == 0 {
        return COMPLETE_PROGRESS;
    }
    let index = index.min(step_count);
    (index * usize::from(COMPLETE_PROGRESS) / step_count) as u8
}

/// Result of asking the wizard to move between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    Moved { from: Step, to: Step },
    /// Validation failed; errors were updated and the step kept
    Blocked,
    /// Nothing to do from the current step
    Unchanged,
}

impl WizardForm {
    /// Move forward one step when the current step's fields validate.
    ///
    /// On the last step this does nothing; leaving it is the submission's job.
    pub fn advance(&mut self) -> StepChange {
        let from = self.step();
        let Some(to) = from.next() else {
            return StepChange::Unchanged;
        };

        match self.schema.validate(from.gate(), self.draft()) {
            Ok(()) => {
                self.replace_errors(FieldErrors::new());
                self.set_step(to);
                tracing::debug!("Wizard advanced from step {} to {}", from.number(), to.number());
                StepChange::Moved { from, to }
            }
            Err(errors) => {
                tracing::debug!(
                    "Wizard blocked on step {}: {:?}",
                    from.number(),
                    errors.fields().collect::<Vec<_>>()
                );
                self.replace_errors(errors);
                StepChange::Blocked
            }
        }
    }

    /// Move back one step. Values and errors stay exactly as they are.
    pub fn retreat(&mut self) -> StepChange {
        let from = self.step();
        match from.prev() {
            Some(to) => {
                self.set_step(to);
                StepChange::Moved { from, to }
            }
            None => StepChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{CollaboratorDraft, CollaboratorSchema, ValidationError};
    use pretty_assertions::assert_eq;

    fn form_with(title: &str, email: &str, department: &str) -> WizardForm {
        let mut form = WizardForm::new(CollaboratorSchema::default());
        form.set_field(Field::Title, title.into()).unwrap();
        form.set_field(Field::Email, email.into()).unwrap();
        form.set_field(Field::Department, department.into()).unwrap();
        form
    }

    mod steps {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_sequence() {
            assert_eq!(Step::first(), Step::BasicInfo);
            assert_eq!(Step::BasicInfo.next(), Some(Step::ProfessionalInfo));
            assert_eq!(Step::ProfessionalInfo.next(), None);
            assert_eq!(Step::ProfessionalInfo.prev(), Some(Step::BasicInfo));
            assert_eq!(Step::BasicInfo.prev(), None);
            assert!(Step::ProfessionalInfo.is_last());
        }

        #[test]
        fn test_numbers() {
            assert_eq!(Step::BasicInfo.number(), 1);
            assert_eq!(Step::ProfessionalInfo.number(), 2);
        }

        #[test]
        fn test_every_field_belongs_to_one_step() {
            let mut fields: Vec<Field> = Step::ALL
                .iter()
                .flat_map(|s| s.fields().iter().copied())
                .collect();
            fields.sort();
            assert_eq!(fields, Field::ALL.to_vec());
        }

        #[test]
        fn test_gates() {
            assert_eq!(Step::BasicInfo.gate(), FieldSelection::Partial);
            assert_eq!(Step::ProfessionalInfo.gate(), FieldSelection::Full);
        }
    }

    mod progress {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_two_step_values() {
            assert_eq!(Step::BasicInfo.progress(), 0);
            assert_eq!(Step::ProfessionalInfo.progress(), 50);
            assert_eq!(progress_at(2, 2), COMPLETE_PROGRESS);
        }

        #[test]
        fn test_spreads_evenly_and_never_decreases() {
            let values: Vec<u8> = (0..=4).map(|i| progress_at(i, 4)).collect();
            assert_eq!(values, vec![0, 25, 50, 75, 100]);
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn test_clamps_past_completion() {
            assert_eq!(progress_at(9, 2), 100);
            assert_eq!(progress_at(0, 0), 100);
        }
    }

    mod controller {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_advance_with_valid_basic_info() {
            let mut form = form_with("Ana Silva", "ana@example.com", "");
            assert_eq!(form.step().progress(), 0);

            let change = form.advance();

            assert_eq!(
                change,
                StepChange::Moved {
                    from: Step::BasicInfo,
                    to: Step::ProfessionalInfo
                }
            );
            assert_eq!(form.step(), Step::ProfessionalInfo);
            assert_eq!(form.step().progress(), 50);
            assert!(form.errors().is_empty());

            // The same draft still fails the full check on department
            assert_eq!(
                form.schema().violations(FieldSelection::Full, form.draft()),
                vec![(Field::Department, ValidationError::Required)]
            );
        }

        #[test]
        fn test_advance_blocked_by_short_title() {
            let mut form = form_with("Al", "al@example.com", "");
            assert_eq!(form.advance(), StepChange::Blocked);
            assert_eq!(form.step(), Step::BasicInfo);
            assert!(form.errors().has(Field::Title));
            assert!(!form.errors().has(Field::Email));
        }

        #[test]
        fn test_advance_blocked_by_bad_email() {
            let mut form = form_with("Ana Silva", "not-an-email", "");
            assert_eq!(form.advance(), StepChange::Blocked);
            assert_eq!(
                form.errors().fields().collect::<Vec<_>>(),
                vec![Field::Email]
            );
        }

        #[test]
        fn test_advance_replaces_stale_errors() {
            let mut form = form_with("Al", "not-an-email", "");
            form.advance();
            form.set_field(Field::Title, "Alan".into()).unwrap();
            form.advance();
            assert_eq!(
                form.errors().fields().collect::<Vec<_>>(),
                vec![Field::Email]
            );
        }

        #[test]
        fn test_advance_on_last_step_is_noop() {
            let mut form = form_with("Ana Silva", "ana@example.com", "");
            form.set_step(Step::ProfessionalInfo);
            assert_eq!(form.advance(), StepChange::Unchanged);
            assert_eq!(form.step(), Step::ProfessionalInfo);
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_retreat_keeps_values_and_errors() {
            let mut form = form_with("Ana Silva", "ana@example.com", "");
            form.advance();
            form.set_field(Field::Department, "IT".into()).unwrap();
            let mut errors = FieldErrors::new();
            errors.insert(Field::Email, "stale");
            form.replace_errors(errors.clone());
            let before: CollaboratorDraft = form.draft().clone();

            let change = form.retreat();

            assert_eq!(
                change,
                StepChange::Moved {
                    from: Step::ProfessionalInfo,
                    to: Step::BasicInfo
                }
            );
            assert_eq!(form.draft(), &before);
            assert_eq!(form.draft().department, "IT");
            assert_eq!(form.errors(), &errors);
        }

        #[test]
        fn test_retreat_on_first_step_is_noop() {
            let mut form = form_with("Ana Silva", "ana@example.com", "");
            assert_eq!(form.retreat(), StepChange::Unchanged);
            assert_eq!(form.step(), Step::BasicInfo);
        }
    }
}
