//! Closed enumerations carried by a field definition

use serde::{Deserialize, Serialize};

/// Kind of input a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    #[default]
    TextInput,
    TextArea,
    Email,
    Phone,
    Dropdown,
    Checkbox,
    RadioButton,
    Date,
    FileUpload,
    Toggle,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextInput => "text-input",
            Self::TextArea => "text-area",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::RadioButton => "radio-button",
            Self::Date => "date",
            Self::FileUpload => "file-upload",
            Self::Toggle => "toggle",
        }
    }

    /// Parse a persisted type name. Unrecognized names get the text-input treatment.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "text-input" => Self::TextInput,
            "text-area" => Self::TextArea,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "dropdown" => Self::Dropdown,
            "checkbox" => Self::Checkbox,
            "radio-button" => Self::RadioButton,
            "date" => Self::Date,
            "file-upload" => Self::FileUpload,
            "toggle" => Self::Toggle,
            _ => Self::TextInput,
        }
    }

    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::TextInput,
            FieldType::TextArea,
            FieldType::Email,
            FieldType::Phone,
            FieldType::Dropdown,
            FieldType::Checkbox,
            FieldType::RadioButton,
            FieldType::Date,
            FieldType::FileUpload,
            FieldType::Toggle,
        ]
    }

    /// Only dropdowns and radio groups carry options
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::RadioButton)
    }

    /// Checkboxes and toggles have no placeholder
    pub fn supports_placeholder(&self) -> bool {
        !matches!(self, Self::Checkbox | Self::Toggle)
    }

    /// Label given to a freshly created field
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::TextInput => "Text Field",
            Self::TextArea => "Text Area",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Dropdown => "Dropdown",
            Self::Checkbox => "Checkbox Option",
            Self::RadioButton => "Radio Options",
            Self::Date => "Date",
            Self::FileUpload => "File Upload",
            Self::Toggle => "Toggle Option",
        }
    }

    /// Placeholder given to a freshly created field
    pub fn default_placeholder(&self) -> Option<&'static str> {
        match self {
            Self::TextInput => Some("Enter text"),
            Self::TextArea => Some("Enter your message"),
            Self::Email => Some("example@email.com"),
            Self::Phone => Some("+1 (555) 123-4567"),
            Self::Dropdown => Some("Select an option"),
            Self::Checkbox
            | Self::RadioButton
            | Self::Date
            | Self::FileUpload
            | Self::Toggle => None,
        }
    }

    /// Option set given to a freshly created field as `(value, label)` pairs
    pub fn default_options(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Dropdown => &[
                ("option1", "Option 1"),
                ("option2", "Option 2"),
                ("option3", "Option 3"),
            ],
            Self::RadioButton => &[("option1", "Option 1"), ("option2", "Option 2")],
            _ => &[],
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSize {
    Small,
    #[default]
    Normal,
    Large,
    Xlarge,
}

impl FieldSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Xlarge => "xlarge",
        }
    }

    /// Unrecognized sizes fall back to normal
    pub fn from_wire(value: &str) -> Self {
        match value {
            "small" => Self::Small,
            "normal" => Self::Normal,
            "large" => Self::Large,
            "xlarge" => Self::Xlarge,
            _ => Self::Normal,
        }
    }
}

/// Text alignment of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Unrecognized alignments fall back to left
    pub fn from_wire(value: &str) -> Self {
        match value {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for field_type in FieldType::all() {
            let json = serde_json::to_string(field_type).unwrap();
            assert_eq!(json, format!("\"{}\"", field_type.as_str()));
            assert_eq!(FieldType::from_wire(field_type.as_str()), *field_type);
        }
    }

    #[test]
    fn test_unknown_type_is_text_input() {
        assert_eq!(FieldType::from_wire("text"), FieldType::TextInput);
        assert_eq!(FieldType::from_wire(""), FieldType::TextInput);
    }

    #[test]
    fn test_only_choice_types_have_default_options() {
        for field_type in FieldType::all() {
            assert_eq!(
                !field_type.default_options().is_empty(),
                field_type.has_options(),
                "{}",
                field_type
            );
        }
    }

    #[test]
    fn test_size_and_alignment_fallbacks() {
        assert_eq!(FieldSize::from_wire("xlarge"), FieldSize::Xlarge);
        assert_eq!(FieldSize::from_wire("huge"), FieldSize::Normal);
        assert_eq!(Alignment::from_wire("center"), Alignment::Center);
        assert_eq!(Alignment::from_wire("justify"), Alignment::Left);
    }
}
