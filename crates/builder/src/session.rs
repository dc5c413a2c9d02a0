//! Editing context for one open form
//!
//! Bundles the form, its logic store, the selected field and the unsaved
//! changes flag. Hosts drive the builder through this type or call the free
//! functions in [`crate::form_model`] and [`crate::logic_engine`] directly.

use std::collections::BTreeMap;

use contracts::domain::common::FieldId;
use contracts::domain::form::{FieldDefinition, FieldPatch, FieldType, FormDefinition};
use contracts::domain::logic::{EditorRow, EvaluationResult, LogicAction, LogicRule, MatchType};

use crate::error::BuilderResult;
use crate::form_model::{self, FieldOutcome, FieldRect, InsertPosition};
use crate::logic_engine::{self, LogicStore, ValueLookup};
use crate::persistence::Repository;
use crate::storage::KeyValueStorage;
use crate::templates;
use crate::validation::{self, ValidationIssue};

#[derive(Debug, Clone, Default)]
pub struct BuilderSession {
    form: FormDefinition,
    logic: LogicStore,
    selected: Option<FieldId>,
    changed: bool,
}

impl BuilderSession {
    /// Session over a new empty form
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(form: FormDefinition, logic: LogicStore) -> Self {
        Self {
            form,
            logic,
            selected: None,
            changed: false,
        }
    }

    /// Restore the last saved form and logic, falling back to defaults when
    /// a document is corrupt
    pub fn load<S: KeyValueStorage>(repository: &Repository<S>) -> BuilderResult<Self> {
        let form = repository.load_form()?;
        let logic = repository.load_logic()?;
        tracing::info!(
            "Session opened form {} with {} fields and {} rules",
            form.id,
            form.len(),
            logic.len()
        );
        Ok(Self::from_parts(form, logic))
    }

    pub fn save<S: KeyValueStorage>(
        &mut self,
        repository: &mut Repository<S>,
    ) -> BuilderResult<()> {
        repository.save_form(&self.form)?;
        repository.save_logic(&self.logic)?;
        self.changed = false;
        Ok(())
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn logic(&self) -> &LogicStore {
        &self.logic
    }

    pub fn selected_field(&self) -> Option<&FieldDefinition> {
        self.selected.as_ref().and_then(|id| self.form.field(id))
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    fn track(&mut self, outcome: FieldOutcome) -> FieldOutcome {
        if outcome.is_applied() {
            self.changed = true;
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    /// Create a field of the given type, insert it and select it
    pub fn add_field(&mut self, field_type: FieldType, position: InsertPosition) -> FieldId {
        let field = form_model::create_field(field_type);
        let id = field.id.clone();
        let outcome = form_model::insert_field(&mut self.form, field, position);
        self.track(outcome);
        self.selected = Some(id.clone());
        id
    }

    pub fn select_field(&mut self, field_id: &FieldId) -> FieldOutcome {
        if self.form.contains(field_id) {
            self.selected = Some(field_id.clone());
            FieldOutcome::Applied
        } else {
            FieldOutcome::NoSuchField
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove a field. Its logic rule and references to it stay in the store.
    pub fn remove_field(&mut self, field_id: &FieldId) -> FieldOutcome {
        let outcome = form_model::remove_field(&mut self.form, field_id);
        if outcome.is_applied() && self.selected.as_ref() == Some(field_id) {
            self.selected = None;
        }
        self.track(outcome)
    }

    pub fn move_field(&mut self, field_id: &FieldId, new_position: usize) -> FieldOutcome {
        let outcome = form_model::move_field(&mut self.form, field_id, new_position);
        self.track(outcome)
    }

    pub fn move_field_to_pointer(
        &mut self,
        field_id: &FieldId,
        rects: &[FieldRect],
        pointer_y: f64,
    ) -> FieldOutcome {
        let outcome =
            form_model::move_field_to_pointer(&mut self.form, field_id, rects, pointer_y);
        self.track(outcome)
    }

    pub fn update_field(&mut self, field_id: &FieldId, patch: FieldPatch) -> FieldOutcome {
        let outcome = form_model::update_field(&mut self.form, field_id, patch);
        self.track(outcome)
    }

    /// Apply the properties panel to the selected field
    pub fn update_selected(&mut self, patch: FieldPatch) -> FieldOutcome {
        match self.selected.clone() {
            Some(id) => self.update_field(&id, patch),
            None => FieldOutcome::NoSuchField,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        form_model::update_form_header(&mut self.form, Some(title.into()), None);
        self.changed = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        form_model::update_form_header(&mut self.form, None, Some(description.into()));
        self.changed = true;
    }

    /// Replace the form with a template. The form keeps its id; rules are
    /// dropped since none of their targets survive.
    pub fn apply_template(&mut self, name: &str) -> bool {
        let Some(mut form) = templates::template(name) else {
            return false;
        };
        form.id = self.form.id.clone();
        self.form = form;
        self.logic.clear();
        self.selected = None;
        self.changed = true;
        tracing::info!("Applied {} template to form {}", name, self.form.id);
        true
    }

    // ------------------------------------------------------------------
    // Logic
    // ------------------------------------------------------------------

    pub fn set_rule(&mut self, target: FieldId, rule: LogicRule) {
        self.logic.set_rule(target, rule);
        self.changed = true;
    }

    /// Save the logic editor for the selected field
    pub fn save_rule_for_selected(
        &mut self,
        action: Option<LogicAction>,
        match_type: Option<MatchType>,
        rows: Vec<EditorRow>,
    ) -> FieldOutcome {
        let Some(target) = self.selected.clone() else {
            return FieldOutcome::NoSuchField;
        };
        let rule = LogicRule::from_editor_rows(target.clone(), action, match_type, rows);
        self.set_rule(target, rule);
        FieldOutcome::Applied
    }

    /// Rule of the selected field, to prefill the logic editor
    pub fn selected_rule(&self) -> Option<&LogicRule> {
        self.selected.as_ref().and_then(|id| self.logic.get_rule(id))
    }

    /// Fields the selected field's conditions may test
    pub fn condition_candidates(&self) -> Vec<&FieldDefinition> {
        match &self.selected {
            Some(id) => self.form.condition_candidates(id),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------

    pub fn preview(&self, values: &impl ValueLookup) -> BTreeMap<FieldId, EvaluationResult> {
        logic_engine::evaluate_all(&self.logic, values)
    }

    pub fn validate(&self, values: &impl ValueLookup) -> Vec<ValidationIssue> {
        validation::validate_submission(&self.form, &self.logic, values)
    }
}
