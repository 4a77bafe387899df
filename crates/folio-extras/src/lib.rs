//! Form validation, the contact submission flow, and the dev audit for folio.
//!
//! # Role in folio
//! `folio-extras` holds the pieces that sit on top of the core registry and
//! style crates: the contact form's validation pipeline and submission state
//! machine, plus the development accessibility/performance audit.
//!
//! # Available Features
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | (always) | [`validation`] | Composable validators and the contact form rules |
//! | (always) | [`contact`] | Submission state machine and relay wire types |
//! | `http-relay` | `contact::HttpRelay` | Blocking HTTPS relay transport (default) |
//! | `audit` | [`audit`] | Accessibility and performance audit (default) |

#![forbid(unsafe_code)]

pub mod contact;
pub mod validation;

#[cfg(feature = "audit")]
pub mod audit;
