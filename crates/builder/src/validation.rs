//! Required-field checks for a filled-in form

use contracts::domain::common::FieldId;
use contracts::domain::form::FormDefinition;

use crate::logic_engine::{LogicStore, ValueLookup};

pub const REQUIRED_MESSAGE: &str = "This field is required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field_id: FieldId,
    /// Shown under the field only when the field opts into error display
    pub message: Option<&'static str>,
}

/// Collect the fields that block submission.
///
/// A field is checked when logic leaves it visible and it is required, either
/// by its own flag or by a `require` rule. Whitespace-only values count as
/// empty. Hidden fields are never checked.
pub fn validate_submission(
    form: &FormDefinition,
    store: &LogicStore,
    values: &impl ValueLookup,
) -> Vec<ValidationIssue> {
    let issues: Vec<ValidationIssue> = form
        .fields
        .iter()
        .filter_map(|field| {
            let result = store.evaluate(&field.id, values);
            if !result.show || !result.effective_required(field.required) {
                return None;
            }
            let empty = values
                .value_of(&field.id)
                .map_or(true, |value| value.trim().is_empty());
            empty.then(|| ValidationIssue {
                field_id: field.id.clone(),
                message: field.show_error.then_some(REQUIRED_MESSAGE),
            })
        })
        .collect();

    tracing::debug!("Validation found {} issues in form {}", issues.len(), form.id);
    issues
}
