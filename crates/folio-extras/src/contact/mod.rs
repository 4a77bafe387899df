#![forbid(unsafe_code)]

//! Contact form: input state, submission state machine, and relay transport.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//!
//! use folio_core::config::SiteConfig;
//! use folio_extras::contact::{
//!     ContactForm, FormRelay, FormStatus, RelayReply, RelayRequest, RelayResponse, SubmitError,
//!     SubmitOutcome, submit,
//! };
//! use folio_extras::validation::FormField;
//!
//! struct AlwaysOk;
//! impl FormRelay for AlwaysOk {
//!     fn send(&self, _: &RelayRequest) -> Result<RelayReply, SubmitError> {
//!         Ok(RelayReply::new(200, RelayResponse::accepted()))
//!     }
//! }
//!
//! let config = SiteConfig::default().with_relay("https://relay.example/submit", "key");
//! let mut form = ContactForm::new();
//! form.on_input(FormField::Name, "Jo");
//! form.on_input(FormField::Email, "a@b.co");
//! form.on_input(FormField::Message, "this is long enough");
//!
//! let outcome = submit(&mut form, &AlwaysOk, &config, Instant::now()).unwrap();
//! assert_eq!(outcome, SubmitOutcome::Sent);
//! assert_eq!(form.status(), FormStatus::Submitted);
//! assert!(form.data().is_empty());
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Status | Submit slot |
//! |---------|--------|-------------|
//! | Field invalid | `Idle` | empty; field errors set |
//! | Endpoint or key missing | `Error` | configuration message |
//! | Transport failure | `Error` | generic retry message |
//! | Relay says no | `Error` | relay message or fallback |

mod data;
mod relay;
mod state;

pub use data::{ContactFormData, FormStatus};
#[cfg(feature = "http-relay")]
pub use relay::HttpRelay;
pub use relay::{
    CONFIG_MISSING, DEFAULT_SUBJECT, FALLBACK_FAILURE, FormRelay, NETWORK_FAILURE, RelayPayload,
    RelayReply, RelayRequest, RelayResponse, SubmitError,
};
pub use state::{
    ContactForm, SUCCESS_DISPLAY, SubmissionTicket, SubmissionToken, SubmitOutcome, submit,
};
