use serde::{Deserialize, Serialize};

use super::field_type::{Alignment, FieldSize, FieldType};
use crate::domain::common::FieldId;

pub const DEFAULT_FONT: &str = "Inter";
pub const DEFAULT_COLOR: &str = "#1e88e5";

/// One choice of a dropdown or radio group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single input element of a form
///
/// `options` is empty unless the type is a dropdown or radio group, and
/// `placeholder` is `None` for checkboxes and toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub field_type: FieldType,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub show_error: bool,
    pub placeholder: Option<String>,
    pub options: Vec<FieldOption>,

    // Presentation only, never read by the logic engine
    pub font: String,
    pub size: FieldSize,
    pub color: String,
    pub alignment: Alignment,
}

impl FieldDefinition {
    /// Field with the defaults of its type
    pub fn with_defaults(id: FieldId, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            label: field_type.default_label().to_string(),
            description: None,
            required: false,
            show_error: false,
            placeholder: field_type.default_placeholder().map(str::to_string),
            options: field_type
                .default_options()
                .iter()
                .map(|(value, label)| FieldOption::new(*value, *label))
                .collect(),
            font: DEFAULT_FONT.to_string(),
            size: FieldSize::default(),
            color: DEFAULT_COLOR.to_string(),
            alignment: Alignment::default(),
        }
    }

    /// Merge the given attributes into the field.
    ///
    /// Options are ignored for types that carry none, and so is the
    /// placeholder of checkboxes and toggles. An empty description or
    /// placeholder clears it.
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(description) = patch.description {
            self.description = non_empty(description);
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(show_error) = patch.show_error {
            self.show_error = show_error;
        }
        if let Some(placeholder) = patch.placeholder {
            if self.field_type.supports_placeholder() {
                self.placeholder = non_empty(placeholder);
            }
        }
        if let Some(options) = patch.options {
            if self.field_type.has_options() {
                self.options = options;
            }
        }
        if let Some(font) = patch.font {
            self.font = font;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(alignment) = patch.alignment {
            self.alignment = alignment;
        }
    }

    /// Drop attributes the field type cannot carry
    pub fn normalize(&mut self) {
        if !self.field_type.has_options() {
            self.options.clear();
        }
        if !self.field_type.supports_placeholder() {
            self.placeholder = None;
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Partial attribute set for `update_field`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub show_error: Option<bool>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<FieldOption>>,
    pub font: Option<String>,
    pub size: Option<FieldSize>,
    pub color: Option<String>,
    pub alignment: Option<Alignment>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn show_error(mut self, show_error: bool) -> Self {
        self.show_error = Some(show_error);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, size: FieldSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
