use serde::Serialize;

use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Select,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            required,
            kind,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { valid: true, message: None }
    }

    pub fn invalid(message: &'static str) -> Self {
        Self { valid: false, message: Some(message) }
    }
}

/// Snapshot of the contact form at submit time.
///
/// Only built through [`SubmissionRequest::from_fields`], which refuses
/// snapshots with an empty required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub contact_method: String,
    pub message: String,
}

impl SubmissionRequest {
    pub fn from_fields(fields: &[FormField]) -> Result<Self, FormError> {
        let missing: Vec<String> = fields
            .iter()
            .filter(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }

        let value_of = |name: &str| {
            fields
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.value.clone())
                .unwrap_or_default()
        };

        Ok(Self {
            name: value_of("name"),
            email: value_of("email"),
            phone: value_of("phone"),
            subject: value_of("subject"),
            contact_method: value_of("contact-method"),
            message: value_of("message"),
        })
    }
}

/// JSON body sent to the form relay.
#[derive(Debug, Serialize)]
pub struct RelayPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    #[serde(rename = "contactMethod")]
    pub contact_method: &'a str,
    #[serde(rename = "_subject")]
    pub relay_subject: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
}
