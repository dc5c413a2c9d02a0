use serde::{Deserialize, Serialize};

use super::rule::LogicAction;

/// Outcome of evaluating a target field's rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Field is visible
    pub show: bool,
    /// Rule forces the field to be required
    pub require: bool,
}

impl EvaluationResult {
    /// Result for a field without a rule: visible, not forced required
    pub const fn unconstrained() -> Self {
        Self {
            show: true,
            require: false,
        }
    }

    /// Apply `action` given whether the rule's conditions are met.
    /// A require rule never hides the field and never turns requirement off.
    pub fn for_action(action: LogicAction, conditions_met: bool) -> Self {
        match action {
            LogicAction::Show => Self {
                show: conditions_met,
                require: false,
            },
            LogicAction::Hide => Self {
                show: !conditions_met,
                require: false,
            },
            LogicAction::Require => Self {
                show: true,
                require: conditions_met,
            },
        }
    }

    /// Requirement after combining the field's stored flag with the rule
    pub fn effective_required(&self, stored_required: bool) -> bool {
        stored_required || self.require
    }
}

impl Default for EvaluationResult {
    fn default() -> Self {
        Self::unconstrained()
    }
}
