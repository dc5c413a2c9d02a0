//! Conditional logic: rule storage and evaluation
//!
//! Evaluation is a pure function of the store and a value lookup. A condition
//! whose field has no value (deleted field, empty lookup) evaluates to false,
//! as does a numeric comparison with a non-numeric side.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use contracts::domain::common::FieldId;
use contracts::domain::logic::{
    Condition, ConditionOperator, EvaluationResult, LogicRule, MatchType,
};

// ============================================================================
// Value lookup
// ============================================================================

/// Current runtime value of each field, supplied by the renderer per pass
pub trait ValueLookup {
    fn value_of(&self, field_id: &FieldId) -> Option<&str>;
}

impl<S: BuildHasher> ValueLookup for HashMap<FieldId, String, S> {
    fn value_of(&self, field_id: &FieldId) -> Option<&str> {
        self.get(field_id).map(String::as_str)
    }
}

impl<S: BuildHasher> ValueLookup for HashMap<String, String, S> {
    fn value_of(&self, field_id: &FieldId) -> Option<&str> {
        self.get(field_id.as_str()).map(String::as_str)
    }
}

impl ValueLookup for BTreeMap<FieldId, String> {
    fn value_of(&self, field_id: &FieldId) -> Option<&str> {
        self.get(field_id).map(String::as_str)
    }
}

impl ValueLookup for BTreeMap<String, String> {
    fn value_of(&self, field_id: &FieldId) -> Option<&str> {
        self.get(field_id.as_str()).map(String::as_str)
    }
}

impl<L: ValueLookup + ?Sized> ValueLookup for &L {
    fn value_of(&self, field_id: &FieldId) -> Option<&str> {
        (**self).value_of(field_id)
    }
}

// ============================================================================
// Logic store
// ============================================================================

/// Rules keyed by target field id, at most one per target.
///
/// Targets and condition fields are referenced by id only; removing a field
/// from the form leaves its rules in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicStore {
    rules: BTreeMap<FieldId, LogicRule>,
}

impl LogicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `rule` for `target`, replacing any previous rule (no merge)
    pub fn set_rule(&mut self, target: FieldId, mut rule: LogicRule) {
        rule.target_field_id = target.clone();
        tracing::debug!(
            "Saved {} rule with {} condition(s) for {}",
            rule.action.as_str(),
            rule.conditions.len(),
            target
        );
        self.rules.insert(target, rule);
    }

    pub fn get_rule(&self, target: &FieldId) -> Option<&LogicRule> {
        self.rules.get(target)
    }

    pub fn remove_rule(&mut self, target: &FieldId) -> Option<LogicRule> {
        self.rules.remove(target)
    }

    pub fn has_rule(&self, target: &FieldId) -> bool {
        self.rules.contains_key(target)
    }

    /// Targets whose rules test `field_id`
    pub fn rules_referencing(&self, field_id: &FieldId) -> Vec<&FieldId> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.references(field_id))
            .map(|(target, _)| target)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &LogicRule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Evaluate the rule of `target` (see [`evaluate`])
    pub fn evaluate(&self, target: &FieldId, values: &impl ValueLookup) -> EvaluationResult {
        evaluate(self, target, values)
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Decide visibility and forced requirement of `target`.
/// Without a rule the field is visible and not forced required.
pub fn evaluate(
    store: &LogicStore,
    target: &FieldId,
    values: &impl ValueLookup,
) -> EvaluationResult {
    match store.get_rule(target) {
        Some(rule) => EvaluationResult::for_action(rule.action, conditions_met(rule, values)),
        None => EvaluationResult::unconstrained(),
    }
}

/// Evaluate every stored rule, once per preview refresh
pub fn evaluate_all(
    store: &LogicStore,
    values: &impl ValueLookup,
) -> BTreeMap<FieldId, EvaluationResult> {
    let results: BTreeMap<FieldId, EvaluationResult> = store
        .iter()
        .map(|(target, rule)| {
            let met = conditions_met(rule, values);
            (target.clone(), EvaluationResult::for_action(rule.action, met))
        })
        .collect();
    tracing::debug!("Evaluated {} logic rule(s)", results.len());
    results
}

/// Combine the rule's conditions by its match type.
/// `all` over no conditions is true, `any` over no conditions is false.
pub fn conditions_met(rule: &LogicRule, values: &impl ValueLookup) -> bool {
    let mut results = rule.conditions.iter().map(|c| evaluate_condition(c, values));
    match rule.match_type {
        MatchType::All => results.all(|met| met),
        MatchType::Any => results.any(|met| met),
    }
}

pub fn evaluate_condition(condition: &Condition, values: &impl ValueLookup) -> bool {
    let Some(actual) = values.value_of(&condition.field_id) else {
        return false;
    };
    compare(condition.operator, actual, &condition.value)
}

/// Apply `operator` to a field value and a condition literal
pub fn compare(operator: ConditionOperator, actual: &str, expected: &str) -> bool {
    match operator {
        ConditionOperator::Equals => actual == expected,
        ConditionOperator::NotEquals => actual != expected,
        ConditionOperator::Contains => actual.contains(expected),
        ConditionOperator::NotContains => !actual.contains(expected),
        ConditionOperator::GreaterThan => match (parse_number(actual), parse_number(expected)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        ConditionOperator::LessThan => match (parse_number(actual), parse_number(expected)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
    }
}

/// Parse the leading decimal number of `raw` ("12px" -> 12, " -1.5e2" -> -150).
/// Returns `None` when there is no leading number or it is not finite.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if !int_part.is_empty() || frac_end > frac_start {
            frac_part = &s[frac_start..frac_end];
            pos = frac_end;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp_end = pos + 1;
        let mut sign = "";
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            sign = &s[exp_end..exp_end + 1];
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = format!("e{}{}", sign, &s[digits_start..exp_end]);
        }
    }

    let text = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        exponent
    );
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::logic::LogicAction;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rule(action: LogicAction, match_type: MatchType, conditions: Vec<Condition>) -> LogicRule {
        let mut rule = LogicRule::new("target", action, match_type);
        rule.conditions = conditions;
        rule
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("5"), Some(5.0));
        assert_eq!(parse_number("  -1.5e2"), Some(-150.0));
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("3."), Some(3.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("Infinity"), None);
        assert_eq!(parse_number("1e400"), None);
    }

    #[test]
    fn test_text_operators() {
        assert!(compare(ConditionOperator::Equals, "poor", "poor"));
        assert!(!compare(ConditionOperator::Equals, "Poor", "poor"));
        assert!(compare(ConditionOperator::NotEquals, "good", "poor"));
        assert!(compare(ConditionOperator::Contains, "very poor", "poor"));
        assert!(compare(ConditionOperator::Contains, "anything", ""));
        assert!(compare(ConditionOperator::NotContains, "excellent", "poor"));
    }

    #[test]
    fn test_numeric_operators() {
        assert!(compare(ConditionOperator::GreaterThan, "10", "5"));
        assert!(!compare(ConditionOperator::GreaterThan, "5", "5"));
        assert!(compare(ConditionOperator::LessThan, "4.5", "5"));
        assert!(!compare(ConditionOperator::GreaterThan, "abc", "5"));
        assert!(!compare(ConditionOperator::LessThan, "abc", "5"));
        assert!(!compare(ConditionOperator::LessThan, "4", "five"));
    }

    #[test]
    fn test_vacuous_match_types() {
        let lookup = values(&[]);
        assert!(conditions_met(&rule(LogicAction::Show, MatchType::All, vec![]), &lookup));
        assert!(!conditions_met(&rule(LogicAction::Show, MatchType::Any, vec![]), &lookup));
    }

    #[test]
    fn test_missing_value_is_false() {
        let lookup = values(&[("other", "x")]);
        let condition = Condition::new("gone", ConditionOperator::NotEquals, "x");
        assert!(!evaluate_condition(&condition, &lookup));

        let any = rule(
            LogicAction::Show,
            MatchType::Any,
            vec![condition.clone(), Condition::new("other", ConditionOperator::Equals, "x")],
        );
        assert!(conditions_met(&any, &lookup));
        let all = rule(LogicAction::Show, MatchType::All, any.conditions.clone());
        assert!(!conditions_met(&all, &lookup));
    }

    #[test]
    fn test_evaluate_without_rule() {
        let store = LogicStore::new();
        let result = evaluate(&store, &FieldId::new("a"), &values(&[]));
        assert_eq!(result, EvaluationResult::unconstrained());
    }

    #[test]
    fn test_set_rule_replaces() {
        let mut store = LogicStore::new();
        let target = FieldId::new("b");
        store.set_rule(
            target.clone(),
            rule(
                LogicAction::Show,
                MatchType::All,
                vec![Condition::new("a", ConditionOperator::Equals, "1")],
            ),
        );
        store.set_rule(target.clone(), rule(LogicAction::Hide, MatchType::Any, vec![]));

        assert_eq!(store.len(), 1);
        let saved = store.get_rule(&target).unwrap();
        assert_eq!(saved.action, LogicAction::Hide);
        assert!(saved.conditions.is_empty());
        assert_eq!(saved.target_field_id, target);
        assert!(store.rules_referencing(&FieldId::new("a")).is_empty());
    }

    #[test]
    fn test_evaluate_hide_and_require() {
        let mut store = LogicStore::new();
        let conditions = vec![Condition::new("age", ConditionOperator::LessThan, "18")];
        store.set_rule(
            FieldId::new("guardian"),
            rule(LogicAction::Require, MatchType::All, conditions.clone()),
        );
        store.set_rule(
            FieldId::new("alcohol"),
            rule(LogicAction::Hide, MatchType::All, conditions),
        );

        let minor = values(&[("age", "16")]);
        let results = evaluate_all(&store, &minor);
        assert_eq!(results.len(), 2);
        assert!(results[&FieldId::new("guardian")].require);
        assert!(!results[&FieldId::new("alcohol")].show);

        let adult = values(&[("age", "30")]);
        let guardian = store.evaluate(&FieldId::new("guardian"), &adult);
        assert!(guardian.show);
        assert!(!guardian.require);
        assert!(store.evaluate(&FieldId::new("alcohol"), &adult).show);
    }
}
