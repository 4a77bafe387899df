#![forbid(unsafe_code)]

//! Accessibility and performance checks over a [`DocumentSnapshot`].
//!
//! Every check yields [`Finding`]s, passing ones included, so the report can
//! count what was verified as well as what failed.

use std::fmt;

use folio_style::theme::validate_theme_contrast;
use serde::{Deserialize, Serialize};

use super::snapshot::{DocumentSnapshot, FormInfo, present};

/// How much a finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub test: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        category: &str,
        test: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            category: category.to_string(),
            test: test.into(),
            passed,
            message: message.into(),
            severity,
        }
    }
}

pub const CATEGORY_CONTRAST: &str = "Color Contrast";
pub const CATEGORY_FORMS: &str = "Form Accessibility";
pub const CATEGORY_IMAGES: &str = "Image Accessibility";
pub const CATEGORY_HEADINGS: &str = "Heading Structure";
pub const CATEGORY_KEYBOARD: &str = "Keyboard Navigation";
pub const CATEGORY_PERFORMANCE: &str = "Performance";

/// Problems with one form's labelling and required markers.
#[must_use]
pub fn form_accessibility_issues(form: &FormInfo) -> Vec<String> {
    let mut issues = Vec::new();
    for input in &form.inputs {
        let needs_label = present(&input.id).is_none() || !input.has_aria_name();
        if needs_label && !form.has_label_for(input) {
            issues.push(format!(
                "Input missing proper label: {}",
                input.tag.to_uppercase()
            ));
        }
    }
    for input in form.inputs.iter().filter(|i| i.required) {
        if !input.aria_required {
            issues.push(format!(
                "Required field missing aria-required: {}",
                present(&input.name).unwrap_or("unnamed")
            ));
        }
    }
    issues
}

/// Theme contrast, forms, images, headings, and keyboard reachability.
#[must_use]
pub fn run_accessibility_validation(doc: &DocumentSnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();

    for result in validate_theme_contrast() {
        let verdict = if result.passes_aa {
            "(WCAG AA compliant)"
        } else {
            "(Fails WCAG AA)"
        };
        findings.push(Finding::new(
            CATEGORY_CONTRAST,
            result.name,
            result.passes_aa,
            format!("Contrast ratio: {:.2} {verdict}", result.ratio),
            if result.passes_aa { Severity::Info } else { Severity::Error },
        ));
    }

    for (index, form) in doc.forms.iter().enumerate() {
        let test = format!("Form {}", index + 1);
        let issues = form_accessibility_issues(form);
        if issues.is_empty() {
            findings.push(Finding::new(
                CATEGORY_FORMS,
                &test,
                true,
                "All accessibility requirements met",
                Severity::Info,
            ));
        }
        for issue in issues {
            findings.push(Finding::new(CATEGORY_FORMS, &test, false, issue, Severity::Error));
        }
    }

    for (index, image) in doc.images.iter().enumerate() {
        let test = format!("Image {}", index + 1);
        let finding = match image.alt_text() {
            Some(alt) => Finding::new(
                CATEGORY_IMAGES,
                test,
                true,
                format!("Alt text: \"{alt}\""),
                Severity::Info,
            ),
            None if image.aria_hidden => Finding::new(
                CATEGORY_IMAGES,
                test,
                true,
                "Decorative image properly marked",
                Severity::Info,
            ),
            None => Finding::new(
                CATEGORY_IMAGES,
                test,
                false,
                "Image missing alt text",
                Severity::Error,
            ),
        };
        findings.push(finding);
    }

    findings.extend(heading_findings(&doc.headings));

    let focusable = doc.focusable().count();
    findings.push(Finding::new(
        CATEGORY_KEYBOARD,
        "Focusable elements",
        focusable > 0,
        format!("{focusable} focusable elements found"),
        if focusable > 0 { Severity::Info } else { Severity::Warning },
    ));

    findings
}

fn heading_findings(levels: &[u8]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut previous = 0u8;
    let mut has_h1 = false;

    for (index, &level) in levels.iter().enumerate() {
        let test = format!("Heading {}", index + 1);
        if level == 1 {
            if has_h1 {
                findings.push(Finding::new(
                    CATEGORY_HEADINGS,
                    &test,
                    false,
                    "Multiple H1 elements found",
                    Severity::Warning,
                ));
            }
            has_h1 = true;
        }
        if previous > 0 && level > previous.saturating_add(1) {
            findings.push(Finding::new(
                CATEGORY_HEADINGS,
                &test,
                false,
                format!("Heading level skipped (H{previous} to H{level})"),
                Severity::Warning,
            ));
        }
        previous = level;
    }

    if !has_h1 {
        findings.push(Finding::new(
            CATEGORY_HEADINGS,
            "Page structure",
            false,
            "No H1 element found",
            Severity::Error,
        ));
    }
    findings
}

/// Motion, connection, lazy loading, and preloading.
#[must_use]
pub fn run_performance_validation(doc: &DocumentSnapshot) -> Vec<Finding> {
    let motion = &doc.motion;
    let lazy = doc.lazy_image_count();
    vec![
        Finding::new(
            CATEGORY_PERFORMANCE,
            "Reduced motion preference",
            true,
            if motion.reduced_motion {
                "User prefers reduced motion - animations disabled"
            } else {
                "Animations enabled"
            },
            Severity::Info,
        ),
        Finding::new(
            CATEGORY_PERFORMANCE,
            "Connection speed",
            true,
            if motion.is_slow_connection() {
                "Slow connection detected - optimizations applied"
            } else {
                "Normal connection speed"
            },
            Severity::Info,
        ),
        Finding::new(
            CATEGORY_PERFORMANCE,
            "Image lazy loading",
            lazy > 0,
            format!("{lazy}/{} images use lazy loading", doc.images.len()),
            if lazy > 0 { Severity::Info } else { Severity::Warning },
        ),
        Finding::new(
            CATEGORY_PERFORMANCE,
            "Resource preloading",
            doc.preload_links > 0,
            format!("{} resources preloaded", doc.preload_links),
            Severity::Info,
        ),
    ]
}

/// Accessibility findings followed by performance findings.
#[must_use]
pub fn run_all_validations(doc: &DocumentSnapshot) -> Vec<Finding> {
    let mut findings = run_accessibility_validation(doc);
    findings.extend(run_performance_validation(doc));
    findings
}
