#![forbid(unsafe_code)]

//! The contact form's submission state machine.
//!
//! ```text
//! Idle ──submit(valid)──▶ Submitting ──ok──▶ Submitted ──5s──▶ Idle
//!   ▲                        │
//!   │                        └──err──▶ Error (message in submit slot)
//!   └──submit(invalid): field errors, stays Idle
//! Idle ──submit(no config)──▶ Error
//! ```
//!
//! # Design Invariants
//!
//! 1. **Single flight**: `begin_submit` while `Submitting` fails with
//!    `InFlight`; at most one ticket is outstanding.
//! 2. **Monotonic tokens**: each ticket carries a token strictly greater than
//!    the previous one; `complete` applies only the outstanding token.
//! 3. **Unmount guard**: after `unmount`, completions are dropped.
//! 4. **No request without config**: a missing endpoint or key moves straight
//!    to `Error` and no ticket is issued.

use std::time::{Duration, Instant};

use folio_core::config::SiteConfig;

use super::data::{ContactFormData, FormStatus};
use super::relay::{FormRelay, RelayPayload, RelayReply, RelayRequest, SubmitError};
use crate::validation::{ErrorKey, FormErrors, FormField, validate_field, validate_form};

/// How long the success message stays before the form resets to idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(5000);

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Issued by [`ContactForm::begin_submit`]: the request to send and the
/// token to complete it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub token: SubmissionToken,
    pub request: RelayRequest,
}

/// Contact form state.
#[derive(Debug, Clone)]
pub struct ContactForm {
    data: ContactFormData,
    errors: FormErrors,
    status: FormStatus,
    last_token: u64,
    outstanding: Option<SubmissionToken>,
    submitted_at: Option<Instant>,
    mounted: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: ContactFormData::default(),
            errors: FormErrors::new(),
            status: FormStatus::Idle,
            last_token: 0,
            outstanding: None,
            submitted_at: None,
            mounted: true,
        }
    }

    #[must_use]
    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The visitor typed into `field`. Clears that field's error.
    pub fn on_input(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear_field(field);
    }

    /// `field` lost focus. Shows its error if invalid; never clears one.
    pub fn on_blur(&mut self, field: FormField) {
        if let Some(message) = validate_field(field, self.data.value(field)) {
            self.errors.set(field, message);
        }
    }

    /// Start a submission.
    ///
    /// Returns `Ok(None)` when validation fails (errors are now set), or a
    /// ticket to send. Missing configuration fails without a ticket.
    pub fn begin_submit(
        &mut self,
        config: &SiteConfig,
    ) -> Result<Option<SubmissionTicket>, SubmitError> {
        if self.status == FormStatus::Submitting {
            return Err(SubmitError::InFlight);
        }

        let errors = validate_form(&self.data);
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "contact form has validation errors");
            self.errors = errors;
            if self.status == FormStatus::Error {
                self.status = FormStatus::Idle;
            }
            return Ok(None);
        }

        let relay = match config.relay() {
            Ok(relay) => relay,
            Err(err) => {
                tracing::warn!(error = %err, "contact form relay is not configured");
                let err = SubmitError::from(err);
                self.fail(&err);
                return Err(err);
            }
        };

        self.last_token += 1;
        let token = SubmissionToken(self.last_token);
        self.outstanding = Some(token);
        self.errors.clear_all();
        self.status = FormStatus::Submitting;
        self.submitted_at = None;
        tracing::debug!(token = token.raw(), endpoint = %relay.endpoint, "submitting contact form");

        Ok(Some(SubmissionTicket {
            token,
            request: RelayRequest {
                payload: RelayPayload::new(&self.data, &relay),
                endpoint: relay.endpoint,
            },
        }))
    }

    /// Apply the outcome of the attempt identified by `token`.
    ///
    /// Returns `false` if the outcome was dropped (stale token or unmounted).
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        result: Result<(), SubmitError>,
        now: Instant,
    ) -> bool {
        if !self.mounted {
            tracing::debug!(token = token.raw(), "form unmounted; dropping submission outcome");
            return false;
        }
        if self.outstanding != Some(token) {
            tracing::debug!(token = token.raw(), "stale submission outcome ignored");
            return false;
        }
        self.outstanding = None;

        match result {
            Ok(()) => {
                tracing::info!(token = token.raw(), "contact message sent");
                self.status = FormStatus::Submitted;
                self.data.clear();
                self.errors.clear_all();
                self.submitted_at = Some(now);
            }
            Err(err) => {
                tracing::error!(token = token.raw(), error = %err, "contact form submission failed");
                self.fail(&err);
            }
        }
        true
    }

    /// Advance timers. Returns `true` if the success message expired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.status == FormStatus::Submitted
            && self
                .submitted_at
                .is_some_and(|at| now.saturating_duration_since(at) >= SUCCESS_DISPLAY);
        if expired {
            self.status = FormStatus::Idle;
            self.submitted_at = None;
        }
        expired
    }

    /// The form left the page; outstanding work must not touch it.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.outstanding = None;
    }

    fn fail(&mut self, err: &SubmitError) {
        self.status = FormStatus::Error;
        self.errors.clear_all();
        self.errors.set(ErrorKey::Submit, err.user_message());
    }
}

/// What [`submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// The relay accepted the message.
    Sent,
}

/// Validate, send once through `relay`, and apply the result.
///
/// There is no retry. Errors are also recorded on the form.
pub fn submit(
    form: &mut ContactForm,
    relay: &dyn FormRelay,
    config: &SiteConfig,
    now: Instant,
) -> Result<SubmitOutcome, SubmitError> {
    let Some(ticket) = form.begin_submit(config)? else {
        return Ok(SubmitOutcome::Invalid);
    };
    let result = relay
        .send(&ticket.request)
        .and_then(RelayReply::into_result);
    form.complete(ticket.token, result.clone(), now);
    result.map(|()| SubmitOutcome::Sent)
}
