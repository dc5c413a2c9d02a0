//! Ready-made forms offered in the template gallery

use contracts::domain::form::{FieldOption, FieldPatch, FieldType, FormDefinition};

use crate::form_model::{create_field, insert_field, InsertPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Contact,
    Registration,
    Survey,
    Event,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Contact => "contact",
            TemplateKind::Registration => "registration",
            TemplateKind::Survey => "survey",
            TemplateKind::Event => "event",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contact" => Some(TemplateKind::Contact),
            "registration" => Some(TemplateKind::Registration),
            "survey" => Some(TemplateKind::Survey),
            "event" => Some(TemplateKind::Event),
            _ => None,
        }
    }

    pub fn all() -> &'static [TemplateKind] {
        &[
            TemplateKind::Contact,
            TemplateKind::Registration,
            TemplateKind::Survey,
            TemplateKind::Event,
        ]
    }
}

/// Look up a template by its gallery name
pub fn template(name: &str) -> Option<FormDefinition> {
    match TemplateKind::from_name(name) {
        Some(kind) => Some(build(kind)),
        None => {
            tracing::warn!("Unknown template: {}", name);
            None
        }
    }
}

/// Build a fresh form (new form and field ids) for the template
pub fn build(kind: TemplateKind) -> FormDefinition {
    let mut form = FormDefinition::new();
    let (title, description, fields) = match kind {
        TemplateKind::Contact => (
            "Contact Us",
            "Fill out this form to get in touch with our team.",
            contact_fields(),
        ),
        TemplateKind::Registration => (
            "User Registration",
            "Create a new account by filling out this form.",
            registration_fields(),
        ),
        TemplateKind::Survey => (
            "Customer Feedback Survey",
            "Please take a moment to share your experience with our services.",
            survey_fields(),
        ),
        TemplateKind::Event => (
            "Event Registration",
            "Register for our upcoming event. Please fill out all required fields.",
            event_fields(),
        ),
    };
    form.title = title.to_string();
    form.description = description.to_string();

    for (field_type, patch) in fields {
        let mut field = create_field(field_type);
        field.apply(patch);
        insert_field(&mut form, field, InsertPosition::End);
    }

    tracing::debug!("Built {} template with {} fields", kind.as_str(), form.len());
    form
}

fn text(label: &str, placeholder: &str, required: bool) -> FieldPatch {
    FieldPatch::new()
        .label(label)
        .placeholder(placeholder)
        .required(required)
}

fn choice(label: &str, options: &[(&str, &str)], required: bool) -> FieldPatch {
    FieldPatch::new()
        .label(label)
        .options(
            options
                .iter()
                .map(|(value, label)| FieldOption::new(*value, *label))
                .collect(),
        )
        .required(required)
}

fn contact_fields() -> Vec<(FieldType, FieldPatch)> {
    vec![
        (FieldType::TextInput, text("Full Name", "John Doe", true)),
        (FieldType::Email, text("Email Address", "john@example.com", true)),
        (FieldType::TextInput, text("Subject", "Enter subject", false)),
        (
            FieldType::TextArea,
            text("Message", "Enter your message here...", true),
        ),
        (
            FieldType::Checkbox,
            FieldPatch::new().label("I agree to be contacted about my inquiry"),
        ),
    ]
}

fn registration_fields() -> Vec<(FieldType, FieldPatch)> {
    vec![
        (
            FieldType::TextInput,
            text("First Name", "Enter your first name", true),
        ),
        (
            FieldType::TextInput,
            text("Last Name", "Enter your last name", true),
        ),
        (
            FieldType::Email,
            text("Email Address", "Enter your email address", true),
        ),
        (FieldType::TextInput, text("Username", "Choose a username", true)),
        (FieldType::TextInput, text("Password", "Create a password", true)),
        (
            FieldType::TextInput,
            text("Confirm Password", "Confirm your password", true),
        ),
        (FieldType::Date, FieldPatch::new().label("Date of Birth")),
        (
            FieldType::Checkbox,
            FieldPatch::new()
                .label("I agree to the Terms of Service and Privacy Policy")
                .required(true),
        ),
    ]
}

fn survey_fields() -> Vec<(FieldType, FieldPatch)> {
    vec![
        (FieldType::TextInput, text("Name (Optional)", "Your name", false)),
        (FieldType::Email, text("Email (Optional)", "Your email", false)),
        (
            FieldType::Dropdown,
            choice(
                "How would you rate our service?",
                &[
                    ("excellent", "Excellent"),
                    ("good", "Good"),
                    ("average", "Average"),
                    ("poor", "Poor"),
                    ("very-poor", "Very Poor"),
                ],
                true,
            ),
        ),
        (
            FieldType::RadioButton,
            choice(
                "Would you recommend us to others?",
                &[("yes", "Yes"), ("maybe", "Maybe"), ("no", "No")],
                true,
            ),
        ),
        (
            FieldType::TextArea,
            text(
                "What could we do to improve our services?",
                "Please provide your suggestions...",
                false,
            ),
        ),
    ]
}

fn event_fields() -> Vec<(FieldType, FieldPatch)> {
    vec![
        (
            FieldType::TextInput,
            text("Full Name", "Enter your full name", true),
        ),
        (
            FieldType::Email,
            text("Email Address", "Enter your email address", true),
        ),
        (
            FieldType::Phone,
            text("Phone Number", "Enter your phone number", true),
        ),
        (
            FieldType::Dropdown,
            choice(
                "Which sessions will you attend?",
                &[
                    ("all", "All Sessions"),
                    ("morning", "Morning Sessions Only"),
                    ("afternoon", "Afternoon Sessions Only"),
                    ("specific", "Specific Sessions (Please specify below)"),
                ],
                true,
            ),
        ),
        (
            FieldType::TextArea,
            text(
                "Special Requirements",
                "Please let us know if you have any dietary restrictions or accessibility needs",
                false,
            ),
        ),
        (
            FieldType::Checkbox,
            FieldPatch::new().label("I agree to receive updates about this and future events"),
        ),
    ]
}
