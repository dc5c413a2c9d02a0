use serde::{Deserialize, Serialize};

use crate::domain::common::FieldId;

/// What a rule does to its target when its conditions are met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicAction {
    #[default]
    Show,
    Hide,
    Require,
}

impl LogicAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Require => "require",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "show" => Some(Self::Show),
            "hide" => Some(Self::Hide),
            "require" => Some(Self::Require),
            _ => None,
        }
    }
}

/// How condition results are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Logical AND, vacuously true
    #[default]
    All,
    /// Logical OR, vacuously false
    Any,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "equals" => Some(Self::Equals),
            "not_equals" => Some(Self::NotEquals),
            "contains" => Some(Self::Contains),
            "not_contains" => Some(Self::NotContains),
            "greater_than" => Some(Self::GreaterThan),
            "less_than" => Some(Self::LessThan),
            _ => None,
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "does not equal",
            Self::Contains => "contains",
            Self::NotContains => "does not contain",
            Self::GreaterThan => "is greater than",
            Self::LessThan => "is less than",
        }
    }

    /// Operators compared numerically rather than as text
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }

    pub fn all() -> &'static [ConditionOperator] {
        &[
            ConditionOperator::Equals,
            ConditionOperator::NotEquals,
            ConditionOperator::Contains,
            ConditionOperator::NotContains,
            ConditionOperator::GreaterThan,
            ConditionOperator::LessThan,
        ]
    }
}

/// Single comparison against another field's current value.
///
/// `field_id` is a non-owning reference: the field may no longer exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field_id: FieldId,
    pub operator: ConditionOperator,
    pub value: String,
}

impl Condition {
    pub fn new(
        field_id: impl Into<FieldId>,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }

    /// Human-readable display text
    pub fn display_text(&self, field_name: &str) -> String {
        format!("{} {} \"{}\"", field_name, self.operator.label(), self.value)
    }
}

/// One row of the logic editor as submitted by the UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorRow {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: String,
}

/// Conditional behaviour of one target field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicRule {
    pub target_field_id: FieldId,
    pub action: LogicAction,
    pub match_type: MatchType,
    pub conditions: Vec<Condition>,
}

impl LogicRule {
    pub fn new(
        target_field_id: impl Into<FieldId>,
        action: LogicAction,
        match_type: MatchType,
    ) -> Self {
        Self {
            target_field_id: target_field_id.into(),
            action,
            match_type,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Build a rule from the logic editor. Rows without a selected field are
    /// dropped; action and match type default to show/all.
    pub fn from_editor_rows(
        target_field_id: impl Into<FieldId>,
        action: Option<LogicAction>,
        match_type: Option<MatchType>,
        rows: Vec<EditorRow>,
    ) -> Self {
        let conditions = rows
            .into_iter()
            .filter(|row| !row.field.is_empty())
            .map(|row| Condition::new(row.field, row.operator, row.value))
            .collect();
        Self {
            target_field_id: target_field_id.into(),
            action: action.unwrap_or_default(),
            match_type: match_type.unwrap_or_default(),
            conditions,
        }
    }

    /// Whether any condition tests the given field
    pub fn references(&self, field_id: &FieldId) -> bool {
        self.conditions.iter().any(|c| &c.field_id == field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wire_names() {
        for op in ConditionOperator::all() {
            assert_eq!(ConditionOperator::from_wire(op.as_str()), Some(*op));
            let json = serde_json::to_string(op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
        assert_eq!(ConditionOperator::from_wire("between"), None);
    }

    #[test]
    fn test_action_and_match_type_wire_names() {
        assert_eq!(LogicAction::from_wire("require"), Some(LogicAction::Require));
        assert_eq!(LogicAction::from_wire("disable"), None);
        assert_eq!(MatchType::from_wire("any"), Some(MatchType::Any));
        assert_eq!(MatchType::from_wire("none"), None);
    }

    #[test]
    fn test_from_editor_rows_drops_unselected_fields() {
        let rule = LogicRule::from_editor_rows(
            "b",
            None,
            None,
            vec![
                EditorRow {
                    field: "a".into(),
                    operator: ConditionOperator::Equals,
                    value: "poor".into(),
                },
                EditorRow {
                    field: String::new(),
                    operator: ConditionOperator::Contains,
                    value: "x".into(),
                },
            ],
        );
        assert_eq!(rule.action, LogicAction::Show);
        assert_eq!(rule.match_type, MatchType::All);
        assert_eq!(rule.conditions.len(), 1);
        assert!(rule.references(&FieldId::new("a")));
        assert!(!rule.references(&FieldId::new("b")));
    }

    #[test]
    fn test_display_text() {
        let condition = Condition::new("a", ConditionOperator::NotContains, "spam");
        assert_eq!(condition.display_text("Subject"), "Subject does not contain \"spam\"");
    }
}
