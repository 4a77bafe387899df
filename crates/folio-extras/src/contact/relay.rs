#![forbid(unsafe_code)]

//! Form-relay wire types and transports.
//!
//! The relay is a third-party HTTP endpoint that forwards a JSON form
//! submission to the site owner's inbox. A submission is accepted only when
//! the HTTP status is a success *and* the body says `"success": true`.

use std::fmt;

use folio_core::config::{ConfigError, RelayConfig};
use serde::{Deserialize, Serialize};
use url::Url;

use super::data::ContactFormData;

/// Subject used when the visitor leaves it blank; also the `from_name`.
pub const DEFAULT_SUBJECT: &str = "Portfolio Contact Form";

/// Shown when the relay rejects a message without saying why.
pub const FALLBACK_FAILURE: &str = "Failed to send message";

/// Shown for transport failures.
pub const NETWORK_FAILURE: &str = "Failed to send message. Please try again.";

/// Shown when the relay endpoint or access key is not configured.
pub const CONFIG_MISSING: &str =
    "Contact form configuration is missing. Please check your environment variables.";

/// Why a submission attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Relay endpoint or key missing or malformed; no request was made.
    Configuration(ConfigError),
    /// Transport failure or unreadable response.
    Network(String),
    /// The relay answered but did not accept the message.
    Rejected(String),
    /// A submission is already in flight.
    InFlight,
}

impl SubmitError {
    /// The message shown in the form's submit error slot.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(ConfigError::InvalidUrl { .. }) => {
                "Contact form configuration is invalid. Please check your environment variables."
                    .to_string()
            }
            Self::Configuration(_) => CONFIG_MISSING.to_string(),
            Self::Network(_) => NETWORK_FAILURE.to_string(),
            Self::Rejected(message) => message.clone(),
            Self::InFlight => "A message is already being sent".to_string(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::Network(detail) => write!(f, "network error: {detail}"),
            Self::Rejected(message) => write!(f, "relay rejected submission: {message}"),
            Self::InFlight => write!(f, "submission already in flight"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for SubmitError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err)
    }
}

/// JSON body posted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub from_name: String,
    pub to_name: String,
}

impl RelayPayload {
    #[must_use]
    pub fn new(data: &ContactFormData, config: &RelayConfig) -> Self {
        let subject = if data.subject.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            data.subject.clone()
        };
        Self {
            access_key: config.access_key.clone(),
            name: data.name.clone(),
            email: data.email.clone(),
            subject,
            message: data.message.clone(),
            from_name: DEFAULT_SUBJECT.to_string(),
            to_name: config.recipient.clone(),
        }
    }
}

/// A ready-to-send submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub endpoint: Url,
    pub payload: RelayPayload,
}

/// Relay response body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayResponse {
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// HTTP status plus decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub status: u16,
    pub body: RelayResponse,
}

impl RelayReply {
    #[must_use]
    pub fn new(status: u16, body: RelayResponse) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_http_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Success iff the status is 2xx and the body reports success.
    pub fn into_result(self) -> Result<(), SubmitError> {
        if self.is_http_ok() && self.body.success {
            return Ok(());
        }
        let message = self
            .body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_FAILURE.to_string());
        Err(SubmitError::Rejected(message))
    }
}

/// Delivers a [`RelayRequest`].
pub trait FormRelay {
    /// Perform exactly one attempt.
    fn send(&self, request: &RelayRequest) -> Result<RelayReply, SubmitError>;
}

#[cfg(feature = "http-relay")]
mod http {
    use std::time::Duration;

    use super::*;

    /// Relay transport over HTTPS using a blocking `reqwest` client.
    #[derive(Debug, Clone)]
    pub struct HttpRelay {
        client: reqwest::blocking::Client,
    }

    impl HttpRelay {
        /// Client with a 15 second request timeout.
        pub fn new() -> Result<Self, SubmitError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            Ok(Self { client })
        }

        #[must_use]
        pub fn with_client(client: reqwest::blocking::Client) -> Self {
            Self { client }
        }
    }

    impl FormRelay for HttpRelay {
        fn send(&self, request: &RelayRequest) -> Result<RelayReply, SubmitError> {
            let response = self
                .client
                .post(request.endpoint.as_str())
                .json(&request.payload)
                .send()
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .json::<RelayResponse>()
                .map_err(|e| SubmitError::Network(format!("unreadable relay response: {e}")))?;
            tracing::debug!(status, success = body.success, "relay responded");
            Ok(RelayReply::new(status, body))
        }
    }
}

#[cfg(feature = "http-relay")]
pub use http::HttpRelay;
