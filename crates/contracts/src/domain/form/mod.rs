//! Form definition: the ordered list of fields and their attributes

mod aggregate;
mod field;
mod field_type;

pub use aggregate::{FormDefinition, DEFAULT_FORM_DESCRIPTION, DEFAULT_FORM_TITLE};
pub use field::{
    FieldDefinition, FieldOption, FieldPatch, DEFAULT_COLOR, DEFAULT_FONT,
};
pub use field_type::{Alignment, FieldSize, FieldType};
