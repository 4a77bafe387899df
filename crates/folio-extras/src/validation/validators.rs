#![forbid(unsafe_code)]

//! Core validation types and the string validators the contact form uses.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for a missing value.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a value below its minimum length.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for a value above its maximum length.
pub const ERROR_CODE_MAX_LENGTH: &str = "too_long";
/// Error code for a malformed email address.
pub const ERROR_CODE_EMAIL: &str = "email";

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation failure: stable `code`, message template, and the
/// parameters substituted into `{key}` placeholders.
///
/// ```rust
/// use folio_extras::validation::ValidationError;
///
/// let error = ValidationError::new("too_short", "Must be at least {min} characters")
///     .with_param("min", 10);
/// assert_eq!(error.format_message(), "Must be at least 10 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    pub params: BTreeMap<String, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// The message with every `{key}` replaced by its parameter.
    #[must_use]
    pub fn format_message(&self) -> String {
        self.params
            .iter()
            .fold(self.message.clone(), |acc, (key, value)| {
                acc.replace(&format!("{{{key}}}"), value)
            })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of validating one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Formatted message when invalid.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// First failure wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// Validates values of type `T`.
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;

    /// The message template reported on failure.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Fails on an empty string. Whitespace counts as content.
#[derive(Debug, Clone)]
pub struct Required {
    pub message: String,
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This field is required".to_string(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_REQUIRED, &self.message))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Fails when the value is shorter than `min`.
///
/// Length is measured in UTF-16 code units, the unit browser form fields
/// report, so an astral character such as an emoji counts as two.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    pub message: String,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: "Must be at least {min} characters".to_string(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = utf16_len(value);
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MIN_LENGTH, &self.message)
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Fails when the value is longer than `max` UTF-16 code units.
#[derive(Debug, Clone)]
pub struct MaxLength {
    pub max: usize,
    pub message: String,
}

impl MaxLength {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: "Must be at most {max} characters".to_string(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = utf16_len(value);
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MAX_LENGTH, &self.message)
                    .with_param("max", self.max)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// ECMAScript `\s`: Unicode `White_Space` without U+0085, plus U+FEFF.
fn is_ecma_whitespace(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        c => c.is_whitespace(),
    }
}

/// Email shape check: `local@domain.tld`.
///
/// Accepts the strings matching `^[^\s@]+@[^\s@]+\.[^\s@]+$` under
/// ECMAScript's `\s`: no whitespace, a single `@` with text before it, and a
/// `.` in the domain with text on both sides. Empty input passes; pair with
/// [`Required`].
#[derive(Debug, Clone)]
pub struct Email {
    pub message: String,
}

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Invalid email address".to_string(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether `value` has the shape described on [`Email`].
    #[must_use]
    pub fn matches(value: &str) -> bool {
        if value.chars().any(is_ecma_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        let last = domain.len().saturating_sub(1);
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i < last)
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() || Self::matches(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_EMAIL, &self.message))
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Composition Validators
// ---------------------------------------------------------------------------

/// Both must pass; the first failure is reported.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> And<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, A, B> Validator<T> for And<A, B>
where
    A: Validator<T>,
    B: Validator<T>,
{
    fn validate(&self, value: &T) -> ValidationResult {
        match self.first.validate(value) {
            ValidationResult::Valid => self.second.validate(value),
            err => err,
        }
    }

    fn error_message(&self) -> &str {
        self.first.error_message()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
