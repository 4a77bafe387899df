#![forbid(unsafe_code)]

//! Site configuration read from the environment.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FOLIO_CONTACT_FORM_ENDPOINT` | Form-relay URL the contact form posts to | unset |
//! | `FOLIO_CONTACT_FORM_ACCESS_KEY` | Access key sent with each submission | unset |
//! | `FOLIO_SITE_URL` | Public base URL of the site | `http://localhost:3000` |
//! | `FOLIO_CONTACT_RECIPIENT` | `to_name` field of relay submissions | `Portfolio Owner` |
//! | `FOLIO_DEV_AUDIT` | `1`/`true` enables the development audit | off |
//!
//! Blank values are treated as unset. A missing endpoint or access key is not
//! an error at load time; it surfaces from [`SiteConfig::relay`] when a
//! submission is attempted.

use std::env;
use std::fmt;

use url::Url;

/// Env var holding the form-relay endpoint.
pub const ENV_FORM_ENDPOINT: &str = "FOLIO_CONTACT_FORM_ENDPOINT";
/// Env var holding the form-relay access key.
pub const ENV_FORM_ACCESS_KEY: &str = "FOLIO_CONTACT_FORM_ACCESS_KEY";
/// Env var holding the public site URL.
pub const ENV_SITE_URL: &str = "FOLIO_SITE_URL";
/// Env var holding the submission recipient name.
pub const ENV_RECIPIENT: &str = "FOLIO_CONTACT_RECIPIENT";
/// Env var toggling the development audit.
pub const ENV_DEV_AUDIT: &str = "FOLIO_DEV_AUDIT";

const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_RECIPIENT: &str = "Portfolio Owner";

/// Configuration problems surfaced when a configured value is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The form-relay endpoint is not set.
    MissingEndpoint,
    /// The form-relay access key is not set.
    MissingAccessKey,
    /// A configured URL could not be parsed.
    InvalidUrl {
        /// Env var the value came from.
        var: &'static str,
        /// Parser message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => write!(f, "{ENV_FORM_ENDPOINT} is not set"),
            Self::MissingAccessKey => write!(f, "{ENV_FORM_ACCESS_KEY} is not set"),
            Self::InvalidUrl { var, reason } => write!(f, "{var} is not a valid URL: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolved form-relay settings, available only when fully configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Relay endpoint.
    pub endpoint: Url,
    /// Access key sent in the payload.
    pub access_key: String,
    /// Recipient display name (`to_name`).
    pub recipient: String,
}

/// Site-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Raw relay endpoint, if set.
    pub form_endpoint: Option<String>,
    /// Relay access key, if set.
    pub form_access_key: Option<String>,
    /// Public base URL.
    pub site_url: String,
    /// Recipient display name for submissions.
    pub recipient: String,
    /// Whether the development audit runs.
    pub dev_audit: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_endpoint: None,
            form_access_key: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            dev_audit: false,
        }
    }
}

impl SiteConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup.
    ///
    /// Deterministic and order-independent; tests pass a map-backed closure.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let dev_audit = get(ENV_DEV_AUDIT)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            form_endpoint: get(ENV_FORM_ENDPOINT),
            form_access_key: get(ENV_FORM_ACCESS_KEY),
            site_url: get(ENV_SITE_URL).unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            recipient: get(ENV_RECIPIENT).unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            dev_audit,
        }
    }

    /// Set the relay endpoint and access key.
    #[must_use]
    pub fn with_relay(mut self, endpoint: impl Into<String>, access_key: impl Into<String>) -> Self {
        self.form_endpoint = Some(endpoint.into());
        self.form_access_key = Some(access_key.into());
        self
    }

    /// Resolve relay settings for a submission attempt.
    pub fn relay(&self) -> Result<RelayConfig, ConfigError> {
        let raw = self
            .form_endpoint
            .as_deref()
            .ok_or(ConfigError::MissingEndpoint)?;
        let access_key = self
            .form_access_key
            .clone()
            .ok_or(ConfigError::MissingAccessKey)?;
        let endpoint = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            var: ENV_FORM_ENDPOINT,
            reason: e.to_string(),
        })?;
        Ok(RelayConfig {
            endpoint,
            access_key,
            recipient: self.recipient.clone(),
        })
    }

    /// Parsed public site URL.
    pub fn site_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.site_url).map_err(|e| ConfigError::InvalidUrl {
            var: ENV_SITE_URL,
            reason: e.to_string(),
        })
    }
}
