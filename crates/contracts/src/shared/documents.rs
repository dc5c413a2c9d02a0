//! Persisted document records
//!
//! These mirror the JSON written to key-value storage. Every key is
//! optional on load; enumerations are carried as plain strings so that an
//! unknown value degrades to its explicit default instead of rejecting the
//! whole document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::common::{EntityId, FieldId, FormId};
use crate::domain::form::{
    Alignment, FieldDefinition, FieldOption, FieldSize, FieldType, FormDefinition,
    DEFAULT_COLOR, DEFAULT_FONT, DEFAULT_FORM_DESCRIPTION, DEFAULT_FORM_TITLE,
};
use crate::domain::logic::{Condition, ConditionOperator, LogicAction, LogicRule, MatchType};

/// Storage key of the current form document
pub const FORM_STORAGE_KEY: &str = "portico_current_form";

/// Storage key of the logic store document
pub const LOGIC_STORAGE_KEY: &str = "portico_form_logic";

// ============================================================================
// Form document
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct FormDocument {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub show_error: bool,
    pub font: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub alignment: Option<String>,
    pub placeholder: Option<String>,
    pub options: Vec<OptionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
}

impl From<&FormDefinition> for FormDocument {
    fn from(form: &FormDefinition) -> Self {
        Self {
            id: Some(form.id.to_string()),
            title: Some(form.title.clone()),
            description: Some(form.description.clone()),
            fields: form.fields.iter().map(FieldRecord::from).collect(),
        }
    }
}

impl FormDocument {
    /// Convert to the domain form, filling missing keys with defaults.
    ///
    /// Field ids are taken as-is; callers enforce uniqueness.
    pub fn into_definition(self) -> FormDefinition {
        let id = self
            .id
            .and_then(|id| FormId::from_string(&id).ok())
            .unwrap_or_else(FormId::new_v4);
        FormDefinition {
            id,
            title: self.title.unwrap_or_else(|| DEFAULT_FORM_TITLE.to_string()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_FORM_DESCRIPTION.to_string()),
            fields: self
                .fields
                .into_iter()
                .map(FieldRecord::into_definition)
                .collect(),
        }
    }
}

impl From<&FieldDefinition> for FieldRecord {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            id: field.id.to_string(),
            field_type: field.field_type.as_str().to_string(),
            label: field.label.clone(),
            description: field.description.clone(),
            required: field.required,
            show_error: field.show_error,
            font: Some(field.font.clone()),
            size: Some(field.size.as_str().to_string()),
            color: Some(field.color.clone()),
            alignment: Some(field.alignment.as_str().to_string()),
            placeholder: field.placeholder.clone(),
            options: field
                .options
                .iter()
                .map(|o| OptionRecord {
                    value: o.value.clone(),
                    label: o.label.clone(),
                })
                .collect(),
        }
    }
}

impl FieldRecord {
    pub fn into_definition(self) -> FieldDefinition {
        let mut field = FieldDefinition {
            id: FieldId::new(self.id),
            field_type: FieldType::from_wire(&self.field_type),
            label: self.label,
            description: self.description,
            required: self.required,
            show_error: self.show_error,
            placeholder: self.placeholder,
            options: self
                .options
                .into_iter()
                .map(|o| FieldOption::new(o.value, o.label))
                .collect(),
            font: self.font.unwrap_or_else(|| DEFAULT_FONT.to_string()),
            size: self
                .size
                .as_deref()
                .map(FieldSize::from_wire)
                .unwrap_or_default(),
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            alignment: self
                .alignment
                .as_deref()
                .map(Alignment::from_wire)
                .unwrap_or_default(),
        };
        field.normalize();
        field
    }
}

// ============================================================================
// Logic document
// ============================================================================

/// Field-id keyed map of rule records
pub type LogicDocument = BTreeMap<String, LogicRuleRecord>;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicRuleRecord {
    pub action: Option<String>,
    pub match_type: Option<String>,
    pub conditions: Vec<ConditionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ConditionRecord {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl From<&LogicRule> for LogicRuleRecord {
    fn from(rule: &LogicRule) -> Self {
        Self {
            action: Some(rule.action.as_str().to_string()),
            match_type: Some(rule.match_type.as_str().to_string()),
            conditions: rule
                .conditions
                .iter()
                .map(|c| ConditionRecord {
                    field: c.field_id.to_string(),
                    operator: c.operator.as_str().to_string(),
                    value: c.value.clone(),
                })
                .collect(),
        }
    }
}

impl LogicRuleRecord {
    /// Convert to a rule for `target`. Missing action/match type default to
    /// show/all; an unrecognized action, match type or operator is an error.
    pub fn into_rule(self, target: FieldId) -> Result<LogicRule, String> {
        let action = match self.action.as_deref() {
            None => LogicAction::default(),
            Some(value) => LogicAction::from_wire(value)
                .ok_or_else(|| format!("unknown action: {}", value))?,
        };
        let match_type = match self.match_type.as_deref() {
            None => MatchType::default(),
            Some(value) => MatchType::from_wire(value)
                .ok_or_else(|| format!("unknown match type: {}", value))?,
        };
        let conditions = self
            .conditions
            .into_iter()
            .map(|c| {
                let operator = ConditionOperator::from_wire(&c.operator)
                    .ok_or_else(|| format!("unknown operator: {}", c.operator))?;
                Ok(Condition::new(c.field, operator, c.value))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(LogicRule {
            target_field_id: target,
            action,
            match_type,
            conditions,
        })
    }
}
