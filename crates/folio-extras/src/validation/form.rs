#![forbid(unsafe_code)]

//! Contact form field rules.
//!
//! Each field validator returns `None` when valid or the exact message the
//! form shows under the field. `subject` is optional and never validated by
//! [`validate_form`]; [`validate_form_strict`] additionally enforces the
//! length ceilings in [`FieldLimits`].

use std::collections::BTreeMap;
use std::fmt;

use super::validators::{And, Email, MaxLength, MinLength, Required, Validator};
use crate::contact::ContactFormData;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

/// A contact form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The input's `name`/`id` attribute.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Subject)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Length bounds for each field, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub name_min: usize,
    pub name_max: usize,
    pub email_max: usize,
    pub subject_max: usize,
    pub message_min: usize,
    pub message_max: usize,
}

impl FieldLimits {
    /// The site's form limits.
    pub const SITE: Self = Self {
        name_min: 2,
        name_max: 50,
        email_max: 100,
        subject_max: 100,
        message_min: 10,
        message_max: 1000,
    };

    /// Upper bound for `field`.
    #[must_use]
    pub const fn max_for(&self, field: FormField) -> usize {
        match field {
            FormField::Name => self.name_max,
            FormField::Email => self.email_max,
            FormField::Subject => self.subject_max,
            FormField::Message => self.message_max,
        }
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self::SITE
    }
}

/// Where an error message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKey {
    Field(FormField),
    /// The form-level message under the submit button.
    Submit,
}

impl From<FormField> for ErrorKey {
    fn from(field: FormField) -> Self {
        Self::Field(field)
    }
}

/// Error messages keyed by field, in field order with `Submit` last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<ErrorKey, String>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    #[must_use]
    pub fn submit(&self) -> Option<&str> {
        self.get(ErrorKey::Submit)
    }

    pub fn set(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Remove the message for `key`, if any.
    pub fn clear(&mut self, key: impl Into<ErrorKey>) {
        self.entries.remove(&key.into());
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.clear(field);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any field (not the submit slot) has an error.
    #[must_use]
    pub fn has_field_errors(&self) -> bool {
        self.entries.keys().any(|k| matches!(k, ErrorKey::Field(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

fn first_error(validator: &dyn Validator<str>, value: &str) -> Option<String> {
    validator.validate(value).error_message()
}

/// `None` if `name` is acceptable.
#[must_use]
pub fn validate_name(name: &str) -> Option<String> {
    let rule = And::new(
        Required::new().with_message(NAME_REQUIRED),
        MinLength::new(FieldLimits::SITE.name_min).with_message(NAME_TOO_SHORT),
    );
    first_error(&rule, name)
}

/// `None` if `email` is acceptable.
#[must_use]
pub fn validate_email(email: &str) -> Option<String> {
    let rule = And::new(
        Required::new().with_message(EMAIL_REQUIRED),
        Email::new().with_message(EMAIL_INVALID),
    );
    first_error(&rule, email)
}

/// `None` if `message` is acceptable.
#[must_use]
pub fn validate_message(message: &str) -> Option<String> {
    let rule = And::new(
        Required::new().with_message(MESSAGE_REQUIRED),
        MinLength::new(FieldLimits::SITE.message_min).with_message(MESSAGE_TOO_SHORT),
    );
    first_error(&rule, message)
}

/// Validate a single field. Subject is optional and always passes.
#[must_use]
pub fn validate_field(field: FormField, value: &str) -> Option<String> {
    match field {
        FormField::Name => validate_name(value),
        FormField::Email => validate_email(value),
        FormField::Subject => None,
        FormField::Message => validate_message(value),
    }
}

/// Validate name, email, and message.
#[must_use]
pub fn validate_form(data: &ContactFormData) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in FormField::ALL {
        if let Some(message) = validate_field(field, data.value(field)) {
            errors.set(field, message);
        }
    }
    errors
}

/// [`validate_form`] plus the per-field maximum lengths.
#[must_use]
pub fn validate_form_strict(data: &ContactFormData, limits: &FieldLimits) -> FormErrors {
    let mut errors = validate_form(data);
    for field in FormField::ALL {
        if errors.get(field).is_some() {
            continue;
        }
        let max = limits.max_for(field);
        let message = format!(
            "{} must be at most {max} characters",
            capitalized(field.key())
        );
        if let Some(message) = first_error(&MaxLength::new(max).with_message(message), data.value(field)) {
            errors.set(field, message);
        }
    }
    errors
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
