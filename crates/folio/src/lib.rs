#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude for hosts wiring the site logic into a page.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::{
    ConfigError, NAV_ITEMS, NavItem, RelayConfig, RootMargin, SectionError, SectionId,
    SectionRegistry, SiteConfig,
};

// --- Style re-exports ------------------------------------------------------

pub use folio_style::{
    ContrastResult, Palette, Rgb, TextSize, ThemeMode, WcagLevel, contrast_ratio, hex_to_rgb,
    meets_wcag,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use folio_runtime::{
    IntersectionEntry, IntersectionSource, MemoryStore, Navigation, PreferenceStore, ScrollSpy,
    ScrollSpyConfig, ScrollSpyError, StorageError, ThemeAdapter, ThemeService, Viewport,
};

// --- Extras re-exports -----------------------------------------------------

#[cfg(feature = "extras")]
pub use folio_extras::contact::{ContactForm, ContactFormData, FormRelay, FormStatus, SubmitError};
#[cfg(feature = "extras")]
pub use folio_extras::validation::{FormErrors, FormField, validate_form};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for folio hosts.
#[derive(Debug)]
pub enum Error {
    /// Missing or malformed site configuration.
    Config(ConfigError),
    /// Invalid section list.
    Section(SectionError),
    /// Preference storage failure.
    #[cfg(feature = "runtime")]
    Storage(StorageError),
    /// Navigation target not on the page.
    #[cfg(feature = "runtime")]
    ScrollSpy(ScrollSpyError),
    /// Contact form submission failure.
    #[cfg(feature = "extras")]
    Submit(SubmitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Section(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::ScrollSpy(err) => write!(f, "{err}"),
            #[cfg(feature = "extras")]
            Self::Submit(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Section(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::ScrollSpy(err) => Some(err),
            #[cfg(feature = "extras")]
            Self::Submit(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SectionError> for Error {
    fn from(err: SectionError) -> Self {
        Self::Section(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ScrollSpyError> for Error {
    fn from(err: ScrollSpyError) -> Self {
        Self::ScrollSpy(err)
    }
}

#[cfg(feature = "extras")]
impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Error, Result, SectionId, SectionRegistry, SiteConfig, ThemeMode};

    #[cfg(feature = "runtime")]
    pub use crate::{Navigation, ScrollSpy, ScrollSpyConfig, ThemeService, Viewport};

    #[cfg(feature = "extras")]
    pub use crate::{ContactForm, FormField, FormStatus};

    pub use crate::{core, style};

    #[cfg(feature = "extras")]
    pub use crate::extras;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use folio_core as core;
#[cfg(feature = "extras")]
pub use folio_extras as extras;
#[cfg(feature = "runtime")]
pub use folio_runtime as runtime;
pub use folio_style as style;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_and_keeps_source() {
        let err: Error = ConfigError::MissingEndpoint.into();
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), ConfigError::MissingEndpoint.to_string());
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn scroll_spy_error_converts() {
        let err: Error = ScrollSpyError::SectionNotFound("missing".into()).into();
        assert!(matches!(err, Error::ScrollSpy(_)));
    }

    #[test]
    fn question_mark_lifts_section_errors() {
        fn build() -> Result<SectionRegistry> {
            Ok(SectionRegistry::new(["home", "home"])?)
        }
        assert!(matches!(build(), Err(Error::Section(_))));
    }
}
