use super::field::FieldDefinition;
use crate::domain::common::{FieldId, FormId};

pub const DEFAULT_FORM_TITLE: &str = "Untitled Form";
pub const DEFAULT_FORM_DESCRIPTION: &str = "This is a description of your form. Click to edit.";

// ============================================================================
// Form Definition
// ============================================================================

/// Canonical definition of a form. Owns its ordered field list; field ids are
/// unique within it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefinition {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    /// Empty form with a generated id
    pub fn new() -> Self {
        Self::with_id(FormId::new_v4())
    }

    pub fn with_id(id: FormId) -> Self {
        Self {
            id,
            title: DEFAULT_FORM_TITLE.to_string(),
            description: DEFAULT_FORM_DESCRIPTION.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub fn field_mut(&mut self, id: &FieldId) -> Option<&mut FieldDefinition> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    /// Index of the field in display order
    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    pub fn field_ids(&self) -> Vec<FieldId> {
        self.fields.iter().map(|f| f.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields a logic rule on `target` may test; the target itself is excluded
    pub fn condition_candidates(&self, target: &FieldId) -> Vec<&FieldDefinition> {
        self.fields.iter().filter(|f| &f.id != target).collect()
    }

    /// Relative path under which the form is shared
    pub fn share_path(&self) -> String {
        format!("/form/{}", self.id)
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::new()
    }
}
