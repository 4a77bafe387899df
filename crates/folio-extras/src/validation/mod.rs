#![forbid(unsafe_code)]

//! Form validation with composable validators.
//!
//! - A core [`Validator`] trait over `str`
//! - Built-in validators (required, min/max length, email), each with an
//!   overridable message
//! - [`And`] for composing rules
//! - The contact form's field rules in [`form`]
//!
//! # Example
//!
//! ```rust
//! use folio_extras::validation::{And, MinLength, Required, Validator};
//!
//! let name = And::new(
//!     Required::new().with_message("Name is required"),
//!     MinLength::new(2).with_message("Name must be at least 2 characters"),
//! );
//! assert!(name.validate("Jo").is_valid());
//! assert_eq!(
//!     name.validate("J").error_message().as_deref(),
//!     Some("Name must be at least 2 characters"),
//! );
//! ```

pub mod form;
mod validators;

pub use form::{
    ErrorKey, FieldLimits, FormErrors, FormField, validate_email, validate_field, validate_form,
    validate_form_strict, validate_message, validate_name,
};
pub use validators::{
    // Composition
    And,
    // Error codes
    ERROR_CODE_EMAIL,
    ERROR_CODE_MAX_LENGTH,
    ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_REQUIRED,
    // Built-in validators
    Email,
    MaxLength,
    MinLength,
    Required,
    // Core types
    ValidationError,
    ValidationResult,
    Validator,
};
