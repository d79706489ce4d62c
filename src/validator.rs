use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FieldKind, FormField, ValidationResult};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
// Digits, spaces, '+', '-', '(' and ')', 10 to 20 of them.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9 +()\-]{10,20}$").unwrap());

/// Checks a field against the contact form rules. First failing rule wins:
/// required, then email shape, then phone shape.
pub fn validate(field: &FormField) -> ValidationResult {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return ValidationResult::invalid(REQUIRED_MESSAGE);
    }
    if field.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return ValidationResult::invalid(EMAIL_MESSAGE);
    }
    if field.name == "phone" && !value.is_empty() && !is_valid_phone(value) {
        return ValidationResult::invalid(PHONE_MESSAGE);
    }
    ValidationResult::ok()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
