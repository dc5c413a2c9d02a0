//! Conditional show/hide/require rules attached to fields

mod evaluation;
mod rule;

pub use evaluation::EvaluationResult;
pub use rule::{Condition, ConditionOperator, EditorRow, LogicAction, LogicRule, MatchType};
