//! Field-level editing of a form definition
//!
//! Every operation takes the form explicitly. Misses (unknown ids, duplicate
//! ids) are never errors: the form is left untouched and the returned
//! [`FieldOutcome`] says so.

use contracts::domain::common::FieldId;
use contracts::domain::form::{FieldDefinition, FieldPatch, FieldType, FormDefinition};

/// Result of a field mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Applied,
    NoSuchField,
    DuplicateField,
}

impl FieldOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Where a new field goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// After the last field (the drop zone at the end of the canvas)
    #[default]
    End,
    /// At the given index, clamped to the list length
    At(usize),
}

/// Vertical extent of a rendered field, reported by the renderer during a drag
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRect {
    pub field_id: FieldId,
    pub top: f64,
    pub height: f64,
}

impl FieldRect {
    pub fn new(field_id: impl Into<FieldId>, top: f64, height: f64) -> Self {
        Self {
            field_id: field_id.into(),
            top,
            height,
        }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Allocate a new field with a generated id and the defaults of its type
pub fn create_field(field_type: FieldType) -> FieldDefinition {
    let field = FieldDefinition::with_defaults(FieldId::new_v4(), field_type);
    tracing::debug!("Created {} field {}", field_type, field.id);
    field
}

pub fn insert_field(
    form: &mut FormDefinition,
    field: FieldDefinition,
    position: InsertPosition,
) -> FieldOutcome {
    if form.contains(&field.id) {
        tracing::warn!("Field {} already exists in form {}", field.id, form.id);
        return FieldOutcome::DuplicateField;
    }

    let index = match position {
        InsertPosition::End => form.fields.len(),
        InsertPosition::At(index) => index.min(form.fields.len()),
    };
    tracing::debug!("Inserting field {} at {}", field.id, index);
    form.fields.insert(index, field);
    FieldOutcome::Applied
}

pub fn remove_field(form: &mut FormDefinition, field_id: &FieldId) -> FieldOutcome {
    match form.position(field_id) {
        Some(index) => {
            form.fields.remove(index);
            tracing::debug!("Removed field {}", field_id);
            FieldOutcome::Applied
        }
        None => FieldOutcome::NoSuchField,
    }
}

/// Move a field so it ends up at `new_position` (clamped) in the resulting order
pub fn move_field(
    form: &mut FormDefinition,
    field_id: &FieldId,
    new_position: usize,
) -> FieldOutcome {
    let Some(current) = form.position(field_id) else {
        return FieldOutcome::NoSuchField;
    };

    let field = form.fields.remove(current);
    let index = new_position.min(form.fields.len());
    form.fields.insert(index, field);
    tracing::debug!("Moved field {} from {} to {}", field_id, current, index);
    FieldOutcome::Applied
}

/// Index the dragged field should take when dropped at `pointer_y`.
///
/// The field goes before the first other field whose vertical midpoint lies
/// below the pointer; with no such field it goes after the last one. Rects of
/// unknown fields are ignored.
pub fn drop_index(
    form: &FormDefinition,
    field_id: &FieldId,
    rects: &[FieldRect],
    pointer_y: f64,
) -> Option<usize> {
    form.position(field_id)?;

    let others: Vec<&FieldId> = form
        .fields
        .iter()
        .map(|f| &f.id)
        .filter(|id| *id != field_id)
        .collect();

    let target = rects
        .iter()
        .filter(|r| others.contains(&&r.field_id))
        .find(|r| pointer_y < r.midpoint());

    match target {
        Some(rect) => others.iter().position(|id| **id == rect.field_id),
        None => Some(others.len()),
    }
}

/// Reorder a field following a drag that ended at `pointer_y`
pub fn move_field_to_pointer(
    form: &mut FormDefinition,
    field_id: &FieldId,
    rects: &[FieldRect],
    pointer_y: f64,
) -> FieldOutcome {
    match drop_index(form, field_id, rects, pointer_y) {
        Some(index) => move_field(form, field_id, index),
        None => FieldOutcome::NoSuchField,
    }
}

pub fn update_field(
    form: &mut FormDefinition,
    field_id: &FieldId,
    patch: FieldPatch,
) -> FieldOutcome {
    match form.field_mut(field_id) {
        Some(field) => {
            field.apply(patch);
            tracing::debug!("Updated field {}", field_id);
            FieldOutcome::Applied
        }
        None => {
            tracing::debug!("Update skipped, no field {}", field_id);
            FieldOutcome::NoSuchField
        }
    }
}

/// Edit the form title and/or description
pub fn update_form_header(
    form: &mut FormDefinition,
    title: Option<String>,
    description: Option<String>,
) {
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::FormId;

    fn form_with(ids: &[&str]) -> FormDefinition {
        let mut form = FormDefinition::with_id(FormId::new("id-test"));
        for id in ids {
            form.fields
                .push(FieldDefinition::with_defaults(FieldId::new(*id), FieldType::TextInput));
        }
        form
    }

    fn order(form: &FormDefinition) -> Vec<&str> {
        form.fields.iter().map(|f| f.id.as_str()).collect()
    }

    fn rects(ids: &[&str]) -> Vec<FieldRect> {
        // 100px tall fields stacked from y = 0
        ids.iter()
            .enumerate()
            .map(|(i, id)| FieldRect::new(*id, i as f64 * 100.0, 100.0))
            .collect()
    }

    #[test]
    fn test_create_field_options() {
        for field_type in FieldType::all() {
            let field = create_field(*field_type);
            assert_eq!(!field.options.is_empty(), field_type.has_options());
        }
        assert_ne!(create_field(FieldType::Date).id, create_field(FieldType::Date).id);
    }

    #[test]
    fn test_insert_positions_are_clamped() {
        let mut form = form_with(&["a", "b"]);
        let field = FieldDefinition::with_defaults(FieldId::new("c"), FieldType::Email);
        assert_eq!(insert_field(&mut form, field, InsertPosition::At(99)), FieldOutcome::Applied);
        assert_eq!(order(&form), vec!["a", "b", "c"]);

        let field = FieldDefinition::with_defaults(FieldId::new("d"), FieldType::Email);
        insert_field(&mut form, field, InsertPosition::At(0));
        assert_eq!(order(&form), vec!["d", "a", "b", "c"]);

        let field = FieldDefinition::with_defaults(FieldId::new("e"), FieldType::Email);
        insert_field(&mut form, field, InsertPosition::End);
        assert_eq!(order(&form), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut form = form_with(&["a"]);
        let field = FieldDefinition::with_defaults(FieldId::new("a"), FieldType::Phone);
        assert_eq!(insert_field(&mut form, field, InsertPosition::End), FieldOutcome::DuplicateField);
        assert_eq!(form.len(), 1);
        assert_eq!(form.fields[0].field_type, FieldType::TextInput);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut form = form_with(&["a", "b"]);
        assert_eq!(remove_field(&mut form, &FieldId::new("z")), FieldOutcome::NoSuchField);
        assert_eq!(remove_field(&mut form, &FieldId::new("a")), FieldOutcome::Applied);
        assert_eq!(order(&form), vec!["b"]);
    }

    #[test]
    fn test_move_field_is_idempotent() {
        let mut form = form_with(&["a", "b", "c", "d"]);
        let id = FieldId::new("a");
        move_field(&mut form, &id, 2);
        let once = form.clone();
        move_field(&mut form, &id, 2);
        assert_eq!(form, once);
        assert_eq!(order(&form), vec!["b", "c", "a", "d"]);

        assert_eq!(move_field(&mut form, &FieldId::new("z"), 0), FieldOutcome::NoSuchField);
    }

    #[test]
    fn test_move_to_pointer_before_midpoint() {
        let mut form = form_with(&["a", "b", "c"]);
        let layout = rects(&["a", "b", "c"]);
        // Midpoints: a = 50, b = 150
        move_field_to_pointer(&mut form, &FieldId::new("c"), &layout, 120.0);
        assert_eq!(order(&form), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_move_to_pointer_appends_past_last() {
        let mut form = form_with(&["a", "b", "c"]);
        let layout = rects(&["a", "b", "c"]);
        move_field_to_pointer(&mut form, &FieldId::new("a"), &layout, 1000.0);
        assert_eq!(order(&form), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_to_pointer_skips_dragged_rect() {
        let mut form = form_with(&["a", "b", "c"]);
        let layout = rects(&["a", "b", "c"]);
        // 10 is above a's midpoint, but a is the dragged field
        move_field_to_pointer(&mut form, &FieldId::new("a"), &layout, 10.0);
        assert_eq!(order(&form), vec!["a", "b", "c"]);

        move_field_to_pointer(&mut form, &FieldId::new("b"), &layout, 10.0);
        assert_eq!(order(&form), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_update_missing_field_is_noop() {
        let mut form = form_with(&["a"]);
        let before = form.clone();
        let outcome = update_field(&mut form, &FieldId::new("z"), FieldPatch::new().label("x"));
        assert_eq!(outcome, FieldOutcome::NoSuchField);
        assert_eq!(form, before);

        let outcome = update_field(&mut form, &FieldId::new("a"), FieldPatch::new().label("Name"));
        assert!(outcome.is_applied());
        assert_eq!(form.fields[0].label, "Name");
    }

    #[test]
    fn test_update_form_header() {
        let mut form = form_with(&[]);
        update_form_header(&mut form, Some("Contact Us".into()), None);
        assert_eq!(form.title, "Contact Us");
        assert_eq!(form.description, contracts::domain::form::DEFAULT_FORM_DESCRIPTION);
    }
}
