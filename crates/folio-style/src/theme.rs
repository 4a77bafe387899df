#![forbid(unsafe_code)]

//! Light/dark theme palettes and their contrast audit.
//!
//! A [`Palette`] holds the semantic colors the site's stylesheet defines for
//! one mode. [`validate_theme_contrast`] checks the text/background pairs
//! the design relies on against WCAG.
//!
//! # Example
//! ```
//! use folio_style::theme::{validate_theme_contrast, ThemeMode};
//!
//! assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
//! assert!(validate_theme_contrast().iter().all(|r| r.passes_aa));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::color::{TextSize, WcagLevel, contrast_ratio, meets_ratio};

/// Color scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Stored/attribute form: `light` or `dark`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Mode implied by the OS dark-mode signal.
    #[must_use]
    pub const fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored theme value that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidThemeMode(pub String);

impl fmt::Display for InvalidThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid theme mode {:?}", self.0)
    }
}

impl std::error::Error for InvalidThemeMode {}

impl FromStr for ThemeMode {
    type Err = InvalidThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(InvalidThemeMode(other.to_string())),
        }
    }
}

/// Semantic colors for one mode, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub muted_foreground: &'static str,
    pub primary: &'static str,
    pub primary_foreground: &'static str,
}

impl Palette {
    /// Light mode colors.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            background: "#ffffff",
            foreground: "#171717",
            muted_foreground: "#737373",
            primary: "#171717",
            primary_foreground: "#ffffff",
        }
    }

    /// Dark mode colors.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: "#0a0a0a",
            foreground: "#ededed",
            muted_foreground: "#a3a3a3",
            primary: "#ededed",
            primary_foreground: "#0a0a0a",
        }
    }

    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// A named foreground/background pair to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContrastCheck {
    pub name: String,
    pub foreground: String,
    pub background: String,
}

/// Outcome of a [`ContrastCheck`]; recomputed on every run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContrastResult {
    pub name: String,
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aaa: bool,
}

impl ContrastCheck {
    pub fn new(
        name: impl Into<String>,
        foreground: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            foreground: foreground.into(),
            background: background.into(),
        }
    }

    /// Evaluate against normal-text thresholds.
    #[must_use]
    pub fn evaluate(&self) -> ContrastResult {
        let ratio = contrast_ratio(&self.foreground, &self.background);
        ContrastResult {
            name: self.name.clone(),
            ratio,
            passes_aa: meets_ratio(ratio, WcagLevel::Aa, TextSize::Normal),
            passes_aaa: meets_ratio(ratio, WcagLevel::Aaa, TextSize::Normal),
        }
    }
}

/// The text/background pairs used by both palettes.
#[must_use]
pub fn theme_contrast_checks() -> Vec<ContrastCheck> {
    let mut checks = Vec::with_capacity(6);
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        let p = Palette::for_mode(mode);
        let suffix = if mode.is_dark() { " (dark)" } else { "" };
        checks.push(ContrastCheck::new(
            format!("Primary text on background{suffix}"),
            p.foreground,
            p.background,
        ));
        checks.push(ContrastCheck::new(
            format!("Muted text on background{suffix}"),
            p.muted_foreground,
            p.background,
        ));
        checks.push(ContrastCheck::new(
            format!("Primary button text{suffix}"),
            p.primary_foreground,
            p.primary,
        ));
    }
    checks
}

/// Evaluate every theme pair.
#[must_use]
pub fn validate_theme_contrast() -> Vec<ContrastResult> {
    theme_contrast_checks().iter().map(ContrastCheck::evaluate).collect()
}
