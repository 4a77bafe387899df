//! Contact Flow E2E Tests
//!
//! Drives the contact form through full submission cycles against an
//! in-process relay.
//!
//! # Running Tests
//!
//! ```sh
//! cargo test -p folio-extras --test contact_flow_e2e
//! ```
//!
//! # Invariants
//!
//! 1. **Happy path**: valid data and an accepting relay end in `Submitted`,
//!    fields cleared, and `Idle` again after 5000ms
//! 2. **No config, no request**: a missing endpoint fails before the relay is touched
//! 3. **Invalid data, no request**: field errors are shown and nothing is sent
//! 4. **One attempt**: failures are reported once, never retried

use std::sync::Mutex;
use std::time::{Duration, Instant};

use folio_core::config::SiteConfig;
use folio_extras::contact::{
    CONFIG_MISSING, ContactForm, FALLBACK_FAILURE, FormRelay, FormStatus, NETWORK_FAILURE,
    RelayReply, RelayRequest, RelayResponse, SUCCESS_DISPLAY, SubmitError, SubmitOutcome, submit,
};
use folio_extras::validation::{ErrorKey, FormField};
use pretty_assertions::assert_eq;

// ============================================================================
// Test Utilities
// ============================================================================

fn log_jsonl(event: &str, case: &str, passed: bool, details: &str) {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    eprintln!(
        r#"{{"event":"{event}","case":"{case}","passed":{passed},"details":"{details}","timestamp":{timestamp}}}"#
    );
}

/// Relay that replays scripted outcomes and records every request.
struct ScriptedRelay {
    replies: Mutex<Vec<Result<RelayReply, SubmitError>>>,
    sent: Mutex<Vec<RelayRequest>>,
}

impl ScriptedRelay {
    fn new(replies: Vec<Result<RelayReply, SubmitError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn accepting() -> Self {
        Self::new(vec![Ok(RelayReply::new(200, RelayResponse::accepted()))])
    }

    fn sent(&self) -> Vec<RelayRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl FormRelay for ScriptedRelay {
    fn send(&self, request: &RelayRequest) -> Result<RelayReply, SubmitError> {
        self.sent.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(SubmitError::Network("no scripted reply".into())))
    }
}

fn configured() -> SiteConfig {
    SiteConfig::from_lookup(|key| match key {
        "FOLIO_CONTACT_FORM_ENDPOINT" => Some("https://relay.example/submit".into()),
        "FOLIO_CONTACT_FORM_ACCESS_KEY" => Some("access-123".into()),
        "FOLIO_CONTACT_RECIPIENT" => Some("Site Owner".into()),
        _ => None,
    })
}

fn fill(form: &mut ContactForm, name: &str, email: &str, message: &str) {
    form.on_input(FormField::Name, name);
    form.on_input(FormField::Email, email);
    form.on_input(FormField::Message, message);
}

// ============================================================================
// 1. Happy Path
// ============================================================================

#[test]
fn valid_submission_clears_form_then_resets() {
    let relay = ScriptedRelay::accepting();
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");

    let t0 = Instant::now();
    let outcome = submit(&mut form, &relay, &configured(), t0).unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.status(), FormStatus::Submitted);
    assert!(form.data().is_empty());
    assert!(form.errors().is_empty());

    let sent = relay.sent();
    assert_eq!(sent.len(), 1);
    let payload = &sent[0].payload;
    assert_eq!(payload.access_key, "access-123");
    assert_eq!(payload.subject, "Portfolio Contact Form");
    assert_eq!(payload.from_name, "Portfolio Contact Form");
    assert_eq!(payload.to_name, "Site Owner");
    assert_eq!(payload.message, "this is long enough");

    assert!(!form.tick(t0 + SUCCESS_DISPLAY - Duration::from_millis(1)));
    assert_eq!(form.status(), FormStatus::Submitted);
    assert!(form.tick(t0 + SUCCESS_DISPLAY));
    assert_eq!(form.status(), FormStatus::Idle);

    log_jsonl("contact", "happy_path", true, "submitted then idle at 5000ms");
}

#[test]
fn payload_json_matches_relay_contract() {
    let relay = ScriptedRelay::accepting();
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");
    form.on_input(FormField::Subject, "Hello");
    submit(&mut form, &relay, &configured(), Instant::now()).unwrap();

    let json = serde_json::to_value(&relay.sent()[0].payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "access_key": "access-123",
            "name": "Jo",
            "email": "a@b.co",
            "subject": "Hello",
            "message": "this is long enough",
            "from_name": "Portfolio Contact Form",
            "to_name": "Site Owner",
        })
    );
}

// ============================================================================
// 2. Configuration
// ============================================================================

#[test]
fn missing_endpoint_never_reaches_relay() {
    let relay = ScriptedRelay::accepting();
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");

    let config = SiteConfig::from_lookup(|key| {
        (key == "FOLIO_CONTACT_FORM_ACCESS_KEY").then(|| "access-123".to_string())
    });
    let err = submit(&mut form, &relay, &config, Instant::now()).unwrap_err();

    assert!(matches!(err, SubmitError::Configuration(_)));
    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.errors().submit(), Some(CONFIG_MISSING));
    assert!(relay.sent().is_empty());
    log_jsonl("contact", "missing_endpoint", true, "no request built");
}

#[test]
fn blank_access_key_counts_as_missing() {
    let relay = ScriptedRelay::accepting();
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");

    let config = SiteConfig::from_lookup(|key| match key {
        "FOLIO_CONTACT_FORM_ENDPOINT" => Some("https://relay.example/submit".into()),
        "FOLIO_CONTACT_FORM_ACCESS_KEY" => Some("   ".into()),
        _ => None,
    });
    assert!(submit(&mut form, &relay, &config, Instant::now()).is_err());
    assert!(relay.sent().is_empty());
}

// ============================================================================
// 3. Validation
// ============================================================================

#[test]
fn invalid_data_shows_field_errors_and_sends_nothing() {
    let relay = ScriptedRelay::accepting();
    let mut form = ContactForm::new();
    fill(&mut form, "", "bad", "short");

    let outcome = submit(&mut form, &relay, &configured(), Instant::now()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.status(), FormStatus::Idle);

    let errors: Vec<_> = form.errors().iter().map(|(k, v)| (k, v.to_string())).collect();
    assert_eq!(
        errors,
        vec![
            (ErrorKey::Field(FormField::Name), "Name is required".to_string()),
            (
                ErrorKey::Field(FormField::Email),
                "Please enter a valid email address".to_string()
            ),
            (
                ErrorKey::Field(FormField::Message),
                "Message must be at least 10 characters".to_string()
            ),
        ]
    );
    assert!(relay.sent().is_empty());
}

#[test]
fn fixing_fields_clears_their_errors_one_by_one() {
    let mut form = ContactForm::new();
    fill(&mut form, "", "bad", "short");
    form.begin_submit(&configured()).unwrap();
    assert_eq!(form.errors().len(), 3);

    form.on_input(FormField::Email, "a@b.co");
    assert_eq!(form.errors().get(FormField::Email), None);
    assert_eq!(form.errors().len(), 2);

    form.on_blur(FormField::Email);
    assert_eq!(form.errors().len(), 2);
}

// ============================================================================
// 4. Failures
// ============================================================================

#[test]
fn network_failure_shows_generic_message_once() {
    let relay = ScriptedRelay::new(vec![Err(SubmitError::Network("connection reset".into()))]);
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");

    let err = submit(&mut form, &relay, &configured(), Instant::now()).unwrap_err();
    assert_eq!(err, SubmitError::Network("connection reset".into()));
    assert_eq!(relay.sent().len(), 1);
    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.errors().submit(), Some(NETWORK_FAILURE));
    assert_eq!(form.data().name, "Jo");
    assert!(form.is_submit_enabled());
}

#[test]
fn relay_rejection_uses_remote_message_or_fallback() {
    let relay = ScriptedRelay::new(vec![
        Ok(RelayReply::new(200, RelayResponse::rejected("Invalid access key"))),
        Ok(RelayReply::new(500, RelayResponse::default())),
    ]);
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");

    submit(&mut form, &relay, &configured(), Instant::now()).unwrap_err();
    assert_eq!(form.errors().submit(), Some("Invalid access key"));

    submit(&mut form, &relay, &configured(), Instant::now()).unwrap_err();
    assert_eq!(form.errors().submit(), Some(FALLBACK_FAILURE));
    assert_eq!(relay.sent().len(), 2);
}

#[test]
fn retry_after_failure_can_succeed() {
    let relay = ScriptedRelay::new(vec![
        Err(SubmitError::Network("timeout".into())),
        Ok(RelayReply::new(200, RelayResponse::accepted())),
    ]);
    let mut form = ContactForm::new();
    fill(&mut form, "Jo", "a@b.co", "this is long enough");
    let t0 = Instant::now();

    assert!(submit(&mut form, &relay, &configured(), t0).is_err());
    assert_eq!(submit(&mut form, &relay, &configured(), t0), Ok(SubmitOutcome::Sent));
    assert_eq!(form.status(), FormStatus::Submitted);
    assert_eq!(form.errors().submit(), None);
}
