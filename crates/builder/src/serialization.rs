//! Conversion between the domain model and the persisted documents

use std::collections::HashSet;

use contracts::domain::common::{EntityId, FieldId};
use contracts::domain::form::FormDefinition;
use contracts::shared::documents::{
    FormDocument, LogicDocument, LogicRuleRecord, FORM_STORAGE_KEY, LOGIC_STORAGE_KEY,
};

use crate::error::{BuilderError, BuilderResult};
use crate::logic_engine::LogicStore;

// ============================================================================
// Form
// ============================================================================

pub fn serialize(form: &FormDefinition) -> FormDocument {
    FormDocument::from(form)
}

/// Build a form from its document. Missing or duplicate field ids are
/// replaced by fresh ones so that ids stay unique.
pub fn from_document(doc: FormDocument) -> FormDefinition {
    let mut form = doc.into_definition();
    let mut seen = HashSet::new();
    for field in &mut form.fields {
        let blank = FieldId::from_string(field.id.as_str()).is_err();
        if blank || !seen.insert(field.id.clone()) {
            let fresh = FieldId::new_v4();
            tracing::warn!(
                "Field id {:?} is empty or repeated, using {}",
                field.id.as_str(),
                fresh
            );
            field.id = fresh.clone();
            seen.insert(fresh);
        }
    }
    form
}

/// JSON text of the form document
pub fn encode(form: &FormDefinition) -> BuilderResult<String> {
    Ok(serde_json::to_string(&serialize(form))?)
}

/// Parse a form document; anything that is not a JSON object of the
/// expected shape is a `MalformedDocument`
pub fn deserialize(payload: &str) -> BuilderResult<FormDefinition> {
    let doc: FormDocument = serde_json::from_str(payload)
        .map_err(|e| BuilderError::malformed(FORM_STORAGE_KEY, e))?;
    Ok(from_document(doc))
}

// ============================================================================
// Logic store
// ============================================================================

pub fn serialize_logic(store: &LogicStore) -> LogicDocument {
    store
        .iter()
        .map(|(target, rule)| (target.to_string(), LogicRuleRecord::from(rule)))
        .collect()
}

/// Build a store from its document. Rules with an unrecognized action, match
/// type or operator are skipped.
pub fn logic_from_document(doc: LogicDocument) -> LogicStore {
    let mut store = LogicStore::new();
    for (target, record) in doc {
        let target = FieldId::new(target);
        match record.into_rule(target.clone()) {
            Ok(rule) => store.set_rule(target, rule),
            Err(reason) => tracing::warn!("Skipping logic rule for {}: {}", target, reason),
        }
    }
    store
}

pub fn encode_logic(store: &LogicStore) -> BuilderResult<String> {
    Ok(serde_json::to_string(&serialize_logic(store))?)
}

pub fn deserialize_logic(payload: &str) -> BuilderResult<LogicStore> {
    let doc: LogicDocument = serde_json::from_str(payload)
        .map_err(|e| BuilderError::malformed(LOGIC_STORAGE_KEY, e))?;
    Ok(logic_from_document(doc))
}
