//! Field-level validation for the entry form.
//!
//! Only name, email and phone carry rules; position and description are
//! always valid. Messages are user-facing and shown next to the field.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::record::{Field, Record};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email format";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_TOO_SHORT: &str = "Phone number must be at least 10 digits";

const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Per-field validation messages, ordered by [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drops a field's message. Used when the user edits that field again.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

pub fn validate_name(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(NAME_REQUIRED)
}

/// The pattern is checked against the untrimmed value, so surrounding
/// whitespace makes an otherwise valid address fail.
pub fn validate_email(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !EMAIL_PATTERN.is_match(value) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

pub fn validate_phone(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some(PHONE_REQUIRED);
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    (digits < MIN_PHONE_DIGITS).then_some(PHONE_TOO_SHORT)
}

pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
        Field::Position | Field::Description => None,
    }
}

/// Validates every field; an empty result means the record may be previewed or exported.
pub fn validate_record(record: &Record) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        if let Some(message) = validate_field(field, record.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required_when_blank() {
        assert_eq!(validate_name(""), Some(NAME_REQUIRED));
        assert_eq!(validate_name("   "), Some(NAME_REQUIRED));
        assert_eq!(validate_name(" Ann "), None);
    }

    #[test]
    fn test_minimal_email_passes() {
        assert_eq!(validate_email("a@b.c"), None);
        assert_eq!(validate_email("john@x.com"), None);
    }

    #[test]
    fn test_email_failures_use_documented_messages() {
        assert_eq!(validate_email(""), Some(EMAIL_REQUIRED));
        assert_eq!(validate_email("  "), Some(EMAIL_REQUIRED));
        assert_eq!(validate_email("abc"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("a@b"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("a b@c.d"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("a@@b.c"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_email_with_surrounding_whitespace_is_rejected() {
        assert_eq!(validate_email(" a@b.c"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_phone_ten_digits_passes() {
        assert_eq!(validate_phone("1234567890"), None);
    }

    #[test]
    fn test_phone_formatting_characters_ignored() {
        assert_eq!(validate_phone("(123) 456-7890"), None);
        assert_eq!(validate_phone("+1 (123) 456-7890"), None);
    }

    #[test]
    fn test_phone_nine_digits_fails() {
        assert_eq!(validate_phone("123-456-789"), Some(PHONE_TOO_SHORT));
        assert_eq!(validate_phone("phone"), Some(PHONE_TOO_SHORT));
    }

    #[test]
    fn test_phone_blank_is_required_error() {
        assert_eq!(validate_phone(""), Some(PHONE_REQUIRED));
        assert_eq!(validate_phone("\t"), Some(PHONE_REQUIRED));
    }

    #[test]
    fn test_optional_fields_never_fail() {
        assert_eq!(validate_field(Field::Position, ""), None);
        assert_eq!(validate_field(Field::Description, "   "), None);
    }

    #[test]
    fn test_only_missing_name_reported() {
        let record = Record {
            email: "a@b.c".to_string(),
            phone: "1234567890".to_string(),
            ..Record::default()
        };
        let errors = validate_record(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), None);
        assert_eq!(errors.get(Field::Phone), None);
    }

    #[test]
    fn test_empty_record_reports_three_required_fields() {
        let errors = validate_record(&Record::default());
        let fields: Vec<_> = Field::ALL
            .into_iter()
            .filter(|f| errors.get(*f).is_some())
            .collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Phone]);
    }

    #[test]
    fn test_errors_serialize_as_field_keyed_map() {
        let errors = validate_record(&Record::default());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"], NAME_REQUIRED);
        assert_eq!(json["email"], EMAIL_REQUIRED);
        assert_eq!(json["phone"], PHONE_REQUIRED);
    }
}
