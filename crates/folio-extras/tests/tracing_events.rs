#![forbid(unsafe_code)]

//! Structured log events emitted by the contact flow.
//!
//! ```sh
//! cargo test -p folio-extras --test tracing_events
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use folio_core::config::SiteConfig;
use folio_extras::contact::{
    ContactForm, FormRelay, RelayReply, RelayRequest, RelayResponse, SubmitError, submit,
};
use folio_extras::validation::FormField;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_captured_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

struct Accepting;

impl FormRelay for Accepting {
    fn send(&self, _: &RelayRequest) -> Result<RelayReply, SubmitError> {
        Ok(RelayReply::new(200, RelayResponse::accepted()))
    }
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.on_input(FormField::Name, "Jo");
    form.on_input(FormField::Email, "a@b.co");
    form.on_input(FormField::Message, "this is long enough");
    form
}

fn configured() -> SiteConfig {
    SiteConfig::from_lookup(|key| match key {
        "FOLIO_CONTACT_FORM_ENDPOINT" => Some("https://relay.example/submit".into()),
        "FOLIO_CONTACT_FORM_ACCESS_KEY" => Some("access-123".into()),
        _ => None,
    })
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn missing_relay_config_logs_a_warning() {
    let events = with_captured_events(|| {
        let mut form = filled_form();
        assert!(submit(&mut form, &Accepting, &SiteConfig::default(), Instant::now()).is_err());
    });

    let warn = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("a warning event");
    assert_eq!(warn.message, "contact form relay is not configured");
    assert!(warn.fields.contains_key("error"));
}

#[test]
fn successful_send_logs_info_with_token() {
    let events = with_captured_events(|| {
        let mut form = filled_form();
        submit(&mut form, &Accepting, &configured(), Instant::now()).unwrap();
    });

    let sent = events
        .iter()
        .find(|e| e.message == "contact message sent")
        .expect("a sent event");
    assert_eq!(sent.level, tracing::Level::INFO);
    assert_eq!(sent.fields.get("token").map(String::as_str), Some("1"));
    assert!(events.iter().all(|e| e.level != tracing::Level::ERROR));
}

#[test]
fn invalid_data_logs_nothing_above_debug() {
    let events = with_captured_events(|| {
        let mut form = ContactForm::new();
        submit(&mut form, &Accepting, &configured(), Instant::now()).unwrap();
    });

    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.level == tracing::Level::DEBUG));
}
