#![forbid(unsafe_code)]

//! Named accessibility tests, each producing a list of issues.

use serde::Serialize;

use super::checks::Severity;
use super::snapshot::{DocumentSnapshot, present};

/// Minimum touch target edge, in CSS pixels.
pub const MIN_TOUCH_TARGET_PX: f64 = 44.0;

/// Alt text longer than this is flagged.
pub const MAX_ALT_CHARS: usize = 125;

const VALID_ROLES: [&str; 20] = [
    "button",
    "link",
    "img",
    "presentation",
    "none",
    "main",
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "region",
    "article",
    "section",
    "list",
    "listitem",
    "table",
    "row",
    "cell",
    "columnheader",
    "rowheader",
];

/// Outcome of one named test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTestResult {
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub issues: Vec<String>,
    pub passed: bool,
}

struct AuditTest {
    name: &'static str,
    description: &'static str,
    severity: Severity,
    run: fn(&DocumentSnapshot) -> Vec<String>,
}

const TESTS: [AuditTest; 8] = [
    AuditTest {
        name: "Keyboard Navigation",
        description: "Ensures all interactive elements have visible focus indicators",
        severity: Severity::Error,
        run: keyboard_navigation,
    },
    AuditTest {
        name: "Heading Hierarchy",
        description: "Checks for proper heading structure (h1-h6)",
        severity: Severity::Error,
        run: heading_hierarchy,
    },
    AuditTest {
        name: "Image Alt Text",
        description: "Verifies all images have appropriate alt text",
        severity: Severity::Error,
        run: image_alt_text,
    },
    AuditTest {
        name: "Form Accessibility",
        description: "Ensures forms have proper labels and ARIA attributes",
        severity: Severity::Error,
        run: form_labels,
    },
    AuditTest {
        name: "Color Contrast",
        description: "Basic color contrast validation",
        severity: Severity::Warning,
        run: text_backgrounds,
    },
    AuditTest {
        name: "ARIA Attributes",
        description: "Validates ARIA attributes and references",
        severity: Severity::Error,
        run: aria_attributes,
    },
    AuditTest {
        name: "Semantic HTML",
        description: "Checks for proper use of semantic HTML elements",
        severity: Severity::Warning,
        run: semantic_landmarks,
    },
    AuditTest {
        name: "Touch Targets",
        description: "Ensures interactive elements meet minimum size requirements",
        severity: Severity::Warning,
        run: touch_targets,
    },
];

/// Run every test against `doc`, in a fixed order.
#[must_use]
pub fn run_accessibility_tests(doc: &DocumentSnapshot) -> Vec<AuditTestResult> {
    TESTS
        .iter()
        .map(|test| {
            let issues = (test.run)(doc);
            AuditTestResult {
                name: test.name,
                description: test.description,
                severity: test.severity,
                passed: issues.is_empty(),
                issues,
            }
        })
        .collect()
}

/// Issue count across all results.
#[must_use]
pub fn total_issues(results: &[AuditTestResult]) -> usize {
    results.iter().map(|r| r.issues.len()).sum()
}

/// Emit test results through `tracing`.
pub fn log_test_results(results: &[AuditTestResult]) {
    for result in results {
        if result.passed {
            tracing::debug!(test = result.name, "accessibility test passed");
            continue;
        }
        tracing::warn!(
            test = result.name,
            severity = %result.severity,
            issues = result.issues.len(),
            "accessibility test failed"
        );
        for issue in &result.issues {
            tracing::info!(test = result.name, "{issue}");
        }
    }
    tracing::info!(total = total_issues(results), "accessibility test run complete");
}

fn keyboard_navigation(doc: &DocumentSnapshot) -> Vec<String> {
    doc.focusable()
        .enumerate()
        .filter(|(_, el)| !el.focus_indicator)
        .map(|(i, el)| {
            format!(
                "Focusable element {}[{i}] may lack visible focus indicator",
                el.tag.to_uppercase()
            )
        })
        .collect()
}

fn heading_hierarchy(doc: &DocumentSnapshot) -> Vec<String> {
    let mut issues = Vec::new();
    let mut last = 0u8;
    for (index, &level) in doc.headings.iter().enumerate() {
        if index == 0 && level != 1 {
            issues.push("Page should start with h1".to_string());
        }
        if level > last.saturating_add(1) {
            issues.push(format!("Heading level skipped: H{level} after h{last}"));
        }
        last = level;
    }
    issues
}

fn image_alt_text(doc: &DocumentSnapshot) -> Vec<String> {
    let mut issues = Vec::new();
    for (index, image) in doc.images.iter().enumerate() {
        let presentational = image.role.as_deref() == Some("presentation");
        match image.alt_text() {
            None if !image.aria_hidden && !presentational => {
                issues.push(format!("Image[{index}] missing alt text: {}", image.src));
            }
            Some(alt) => {
                let len = alt.encode_utf16().count();
                if len > MAX_ALT_CHARS {
                    issues.push(format!(
                        "Image[{index}] alt text too long ({len} chars): {}",
                        image.src
                    ));
                }
            }
            None => {}
        }
    }
    issues
}

fn form_labels(doc: &DocumentSnapshot) -> Vec<String> {
    let mut issues = Vec::new();
    for (f, form) in doc.forms.iter().enumerate() {
        for (i, input) in form.inputs.iter().enumerate() {
            if !input.has_aria_name() && !form.has_label_for(input) {
                issues.push(format!("Form[{f}] Input[{i}] missing label"));
            }
            if input.required && !input.aria_required {
                issues.push(format!("Form[{f}] Required input[{i}] missing aria-required"));
            }
        }
    }
    issues
}

fn text_backgrounds(doc: &DocumentSnapshot) -> Vec<String> {
    doc.text_elements
        .iter()
        .enumerate()
        .filter(|(_, el)| !el.background_resolved)
        .map(|(i, el)| {
            format!(
                "Element[{i}] {} may have insufficient color contrast",
                el.tag.to_uppercase()
            )
        })
        .collect()
}

fn aria_attributes(doc: &DocumentSnapshot) -> Vec<String> {
    let mut issues = Vec::new();
    for (index, el) in doc.aria.iter().enumerate() {
        if present(&el.aria_label).is_some_and(|label| label.trim().is_empty()) {
            issues.push(format!("Element[{index}] has empty aria-label"));
        }
        for (attr, target) in [
            ("aria-labelledby", &el.aria_labelledby),
            ("aria-describedby", &el.aria_describedby),
        ] {
            if let Some(target) = present(target)
                && !doc.element_ids.contains(target)
            {
                issues.push(format!(
                    "Element[{index}] {attr} references non-existent element: {target}"
                ));
            }
        }
        if let Some(role) = present(&el.role)
            && !VALID_ROLES.contains(&role)
        {
            issues.push(format!("Element[{index}] has potentially invalid role: {role}"));
        }
    }
    issues
}

fn semantic_landmarks(doc: &DocumentSnapshot) -> Vec<String> {
    let mut issues = Vec::new();
    if !doc.has_main {
        issues.push("Page missing main landmark".to_string());
    }
    if !doc.has_nav {
        issues.push("Page missing navigation landmark".to_string());
    }
    if doc.clickable_generic > 0 {
        issues.push(format!(
            "Found {} clickable div/span elements - consider using button elements",
            doc.clickable_generic
        ));
    }
    issues
}

fn touch_targets(doc: &DocumentSnapshot) -> Vec<String> {
    let min = MIN_TOUCH_TARGET_PX;
    doc.interactive
        .iter()
        .enumerate()
        .filter(|(_, el)| el.width < min || el.height < min)
        .map(|(i, el)| {
            format!(
                "Interactive element[{i}] {} too small: {}x{}px (minimum: {min}x{min}px)",
                el.tag.to_uppercase(),
                el.width.round(),
                el.height.round(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::snapshot::{AriaInfo, FormInfo, ImageInfo, InputInfo, InteractiveInfo};

    fn issues_for(doc: &DocumentSnapshot, name: &str) -> Vec<String> {
        run_accessibility_tests(doc)
            .into_iter()
            .find(|r| r.name == name)
            .map(|r| r.issues)
            .unwrap_or_default()
    }

    #[test]
    fn eight_tests_in_order() {
        let names: Vec<_> = run_accessibility_tests(&DocumentSnapshot::default())
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Keyboard Navigation",
                "Heading Hierarchy",
                "Image Alt Text",
                "Form Accessibility",
                "Color Contrast",
                "ARIA Attributes",
                "Semantic HTML",
                "Touch Targets"
            ]
        );
    }

    #[test]
    fn heading_must_start_at_h1() {
        let doc = DocumentSnapshot { headings: vec![2, 3], ..DocumentSnapshot::default() };
        assert_eq!(
            issues_for(&doc, "Heading Hierarchy"),
            vec!["Page should start with h1", "Heading level skipped: H2 after h0"]
        );
        let doc = DocumentSnapshot { headings: vec![1, 2, 2, 3], ..DocumentSnapshot::default() };
        assert!(issues_for(&doc, "Heading Hierarchy").is_empty());
    }

    #[test]
    fn alt_text_missing_and_too_long() {
        let doc = DocumentSnapshot {
            images: vec![
                ImageInfo { src: "/a.png".into(), ..ImageInfo::default() },
                ImageInfo { src: "/b.png".into(), role: Some("presentation".into()), ..ImageInfo::default() },
                ImageInfo { src: "/c.png".into(), alt: Some("x".repeat(126)), ..ImageInfo::default() },
                ImageInfo { src: "/d.png".into(), alt: Some("x".repeat(125)), ..ImageInfo::default() },
            ],
            ..DocumentSnapshot::default()
        };
        assert_eq!(
            issues_for(&doc, "Image Alt Text"),
            vec![
                "Image[0] missing alt text: /a.png",
                "Image[2] alt text too long (126 chars): /c.png"
            ]
        );
    }

    #[test]
    fn form_inputs_need_labels() {
        let form = FormInfo {
            inputs: vec![
                InputInfo { tag: "input".into(), id: Some("name".into()), ..InputInfo::default() },
                InputInfo { tag: "input".into(), required: true, ..InputInfo::default() },
            ],
            label_targets: ["name".to_string()].into_iter().collect(),
        };
        let doc = DocumentSnapshot { forms: vec![form], ..DocumentSnapshot::default() };
        assert_eq!(
            issues_for(&doc, "Form Accessibility"),
            vec!["Form[0] Input[1] missing label", "Form[0] Required input[1] missing aria-required"]
        );
    }

    #[test]
    fn aria_references_and_roles() {
        let doc = DocumentSnapshot {
            aria: vec![
                AriaInfo { aria_label: Some("  ".into()), ..AriaInfo::default() },
                AriaInfo { aria_labelledby: Some("title".into()), ..AriaInfo::default() },
                AriaInfo { aria_describedby: Some("ghost".into()), ..AriaInfo::default() },
                AriaInfo { role: Some("dialog".into()), ..AriaInfo::default() },
                AriaInfo { role: Some("navigation".into()), ..AriaInfo::default() },
            ],
            element_ids: ["title".to_string()].into_iter().collect(),
            ..DocumentSnapshot::default()
        };
        assert_eq!(
            issues_for(&doc, "ARIA Attributes"),
            vec![
                "Element[0] has empty aria-label",
                "Element[2] aria-describedby references non-existent element: ghost",
                "Element[3] has potentially invalid role: dialog"
            ]
        );
    }

    #[test]
    fn landmarks_and_clickable_divs() {
        let doc = DocumentSnapshot { clickable_generic: 2, has_nav: true, ..DocumentSnapshot::default() };
        assert_eq!(
            issues_for(&doc, "Semantic HTML"),
            vec![
                "Page missing main landmark",
                "Found 2 clickable div/span elements - consider using button elements"
            ]
        );
    }

    #[test]
    fn touch_target_minimum() {
        let doc = DocumentSnapshot {
            interactive: vec![
                InteractiveInfo::new("button", 44.0, 44.0),
                InteractiveInfo::new("a", 80.4, 20.6),
            ],
            ..DocumentSnapshot::default()
        };
        assert_eq!(
            issues_for(&doc, "Touch Targets"),
            vec!["Interactive element[1] A too small: 80x21px (minimum: 44x44px)"]
        );
    }

    #[test]
    fn focus_indicator_index_counts_focusable_only() {
        let mut skipped = InteractiveInfo::new("div", 50.0, 50.0);
        skipped.focusable = false;
        let mut bare = InteractiveInfo::new("button", 50.0, 50.0);
        bare.focus_indicator = false;
        let doc = DocumentSnapshot {
            interactive: vec![skipped, InteractiveInfo::new("a", 50.0, 50.0), bare],
            ..DocumentSnapshot::default()
        };
        assert_eq!(
            issues_for(&doc, "Keyboard Navigation"),
            vec!["Focusable element BUTTON[1] may lack visible focus indicator"]
        );
    }

    #[test]
    fn passed_mirrors_empty_issues() {
        let results = run_accessibility_tests(&DocumentSnapshot::default());
        for r in &results {
            assert_eq!(r.passed, r.issues.is_empty(), "{}", r.name);
        }
        // Empty page: only missing landmarks.
        assert_eq!(total_issues(&results), 2);
    }
}
