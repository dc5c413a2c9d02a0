use std::collections::HashMap;

use contracts::domain::common::FieldId;
use contracts::domain::form::{FieldOption, FieldPatch, FieldType};
use contracts::domain::logic::{Condition, ConditionOperator, LogicAction, LogicRule, MatchType};
use portico_builder::{
    evaluate, BuilderSession, FieldOutcome, FileStorage, InsertPosition, KeyValueStorage,
    LogicStore, Repository,
};

fn survey_session() -> (BuilderSession, FieldId, FieldId) {
    let mut session = BuilderSession::new();
    let rating = session.add_field(FieldType::Dropdown, InsertPosition::End);
    session.update_field(
        &rating,
        FieldPatch::new().label("Rating").options(vec![
            FieldOption::new("excellent", "Excellent"),
            FieldOption::new("good", "Good"),
            FieldOption::new("poor", "Poor"),
        ]),
    );
    let reason = session.add_field(FieldType::TextInput, InsertPosition::End);
    session.update_field(&reason, FieldPatch::new().label("What went wrong?"));

    let rule = LogicRule::new(reason.clone(), LogicAction::Show, MatchType::All)
        .with_condition(Condition::new(
            rating.clone(),
            ConditionOperator::Equals,
            "poor",
        ));
    session.set_rule(reason.clone(), rule);
    (session, rating, reason)
}

#[test]
fn follow_up_question_shown_for_poor_rating() {
    let (session, rating, reason) = survey_session();

    let mut values = HashMap::new();
    values.insert(rating.clone(), "poor".to_string());
    let result = evaluate(session.logic(), &reason, &values);
    assert!(result.show);
    assert!(!result.require);

    values.insert(rating, "good".to_string());
    assert!(!evaluate(session.logic(), &reason, &values).show);
}

#[test]
fn unmet_require_keeps_stored_flag() {
    let mut session = BuilderSession::new();
    let plan = session.add_field(FieldType::RadioButton, InsertPosition::End);
    let vat = session.add_field(FieldType::TextInput, InsertPosition::End);
    session.update_field(&vat, FieldPatch::new().required(true));
    session.set_rule(
        vat.clone(),
        LogicRule::new(vat.clone(), LogicAction::Require, MatchType::Any).with_condition(
            Condition::new(plan.clone(), ConditionOperator::Equals, "option2"),
        ),
    );

    let values: HashMap<FieldId, String> = [(plan, "option1".to_string())].into();
    let result = evaluate(session.logic(), &vat, &values);
    assert!(result.show);
    assert!(!result.require);
    assert!(result.effective_required(session.form().field(&vat).unwrap().required));
    assert_eq!(session.validate(&values).len(), 1);
}

#[test]
fn deleted_condition_field_evaluates_false() {
    let (mut session, rating, reason) = survey_session();
    assert_eq!(session.remove_field(&rating), FieldOutcome::Applied);

    assert!(session.logic().has_rule(&reason));
    assert_eq!(session.logic().rules_referencing(&rating), vec![&reason]);

    let values: HashMap<FieldId, String> = HashMap::new();
    assert!(!evaluate(session.logic(), &reason, &values).show);
}

#[test]
fn rule_for_unknown_target_is_unconstrained() {
    let store = LogicStore::new();
    let values: HashMap<String, String> = HashMap::new();
    let result = evaluate(&store, &FieldId::from("missing"), &values);
    assert!(result.show);
    assert!(!result.require);
}

#[test]
fn session_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, rating, reason) = survey_session();
    session.set_title("Feedback");
    session.move_field(&reason, 0);

    let mut repository = Repository::new(FileStorage::open(dir.path()).unwrap());
    session.save(&mut repository).unwrap();

    let repository = Repository::new(FileStorage::open(dir.path()).unwrap());
    let restored = BuilderSession::load(&repository).unwrap();
    assert_eq!(restored.form(), session.form());
    assert_eq!(restored.form().field_ids(), vec![reason.clone(), rating]);
    assert_eq!(restored.logic(), session.logic());
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::open(dir.path()).unwrap();
    storage.set_item("portico_current_form", "{oops").unwrap();
    storage.set_item("portico_form_logic", "[]").unwrap();

    let restored = BuilderSession::load(&Repository::new(storage)).unwrap();
    assert!(restored.form().is_empty());
    assert_eq!(restored.form().title, "Untitled Form");
    assert!(restored.logic().is_empty());
}
