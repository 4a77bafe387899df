#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::validation::FormField;

/// The contact form's input values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormData {
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.value(*f).is_empty())
    }
}

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    /// Editable; may be showing field errors or a past submit error.
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// The last request succeeded; reverts to `Idle` after a delay.
    Submitted,
    /// The last attempt failed; the message is in the submit error slot.
    Error,
}

impl FormStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Error => "error",
        }
    }
}
