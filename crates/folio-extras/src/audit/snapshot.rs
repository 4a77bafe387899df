#![forbid(unsafe_code)]

//! Serializable view of a rendered page, as collected by the host.
//!
//! Every field defaults, so a host can send only what it measured.

use std::collections::BTreeSet;

use folio_core::motion::MotionPreferences;
use serde::{Deserialize, Serialize};

/// What the audit knows about one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSnapshot {
    /// Heading levels (1 to 6) in document order.
    pub headings: Vec<u8>,
    pub images: Vec<ImageInfo>,
    pub forms: Vec<FormInfo>,
    /// Elements carrying `aria-label`, `aria-labelledby`, `aria-describedby`, or `role`.
    pub aria: Vec<AriaInfo>,
    /// Every `id` present in the document.
    pub element_ids: BTreeSet<String>,
    pub has_main: bool,
    pub has_nav: bool,
    /// `div`/`span` elements with click handlers.
    pub clickable_generic: usize,
    /// Buttons, links, inputs and other interactive elements in document order.
    pub interactive: Vec<InteractiveInfo>,
    /// Text elements and whether an opaque background was found for them.
    pub text_elements: Vec<TextElementInfo>,
    /// `<link rel="preload">` count.
    pub preload_links: usize,
    pub motion: MotionPreferences,
    pub vitals: Option<WebVitals>,
}

impl DocumentSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Interactive elements reachable by keyboard.
    pub fn focusable(&self) -> impl Iterator<Item = &InteractiveInfo> {
        self.interactive.iter().filter(|e| e.focusable)
    }

    #[must_use]
    pub fn lazy_image_count(&self) -> usize {
        self.images.iter().filter(|i| i.lazy).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    pub src: String,
    pub alt: Option<String>,
    pub aria_hidden: bool,
    pub role: Option<String>,
    /// `loading="lazy"`.
    pub lazy: bool,
}

impl ImageInfo {
    /// Non-empty alt text, if any.
    #[must_use]
    pub fn alt_text(&self) -> Option<&str> {
        present(&self.alt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInfo {
    pub inputs: Vec<InputInfo>,
    /// `for` targets of the form's `<label>` elements.
    pub label_targets: BTreeSet<String>,
}

impl FormInfo {
    /// Whether a `<label for=...>` points at `input`.
    #[must_use]
    pub fn has_label_for(&self, input: &InputInfo) -> bool {
        present(&input.id).is_some_and(|id| self.label_targets.contains(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputInfo {
    /// Element tag, e.g. `input` or `textarea`.
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    pub required: bool,
    pub aria_required: bool,
}

impl InputInfo {
    #[must_use]
    pub fn has_aria_name(&self) -> bool {
        present(&self.aria_label).is_some() || present(&self.aria_labelledby).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AriaInfo {
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    pub aria_describedby: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveInfo {
    pub tag: String,
    pub width: f64,
    pub height: f64,
    /// Reachable with Tab (not `tabindex="-1"`).
    pub focusable: bool,
    /// Has an outline, ring, or shadow when focused.
    pub focus_indicator: bool,
}

impl InteractiveInfo {
    pub fn new(tag: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            tag: tag.into(),
            width,
            height,
            focusable: true,
            focus_indicator: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextElementInfo {
    pub tag: String,
    /// False when every ancestor background is transparent.
    pub background_resolved: bool,
}

/// Core Web Vitals as measured by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebVitals {
    /// Cumulative layout shift.
    pub cls: f64,
    /// First input delay, milliseconds.
    pub fid_ms: f64,
    /// Largest contentful paint, milliseconds.
    pub lcp_ms: f64,
}

/// Overall Web Vitals rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalsStatus {
    Good,
    NeedsImprovement,
    Poor,
}

impl WebVitals {
    /// Good when CLS < 0.1, FID < 100ms and LCP < 2500ms; poor when any
    /// reaches 0.25, 300ms or 4000ms.
    #[must_use]
    pub fn status(&self) -> VitalsStatus {
        if self.cls < 0.1 && self.fid_ms < 100.0 && self.lcp_ms < 2500.0 {
            VitalsStatus::Good
        } else if self.cls < 0.25 && self.fid_ms < 300.0 && self.lcp_ms < 4000.0 {
            VitalsStatus::NeedsImprovement
        } else {
            VitalsStatus::Poor
        }
    }
}

/// Attribute value if present and non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let doc = DocumentSnapshot::from_json(
            r#"{"headings":[1,2],"images":[{"src":"/a.png","lazy":true}],"motion":{"reduced_motion":true}}"#,
        )
        .unwrap();
        assert_eq!(doc.headings, vec![1, 2]);
        assert_eq!(doc.images[0].alt, None);
        assert_eq!(doc.lazy_image_count(), 1);
        assert!(doc.motion.reduced_motion);
        assert!(!doc.has_main);
        assert!(doc.vitals.is_none());
    }

    #[test]
    fn empty_attributes_count_as_absent() {
        let img = ImageInfo {
            alt: Some(String::new()),
            ..ImageInfo::default()
        };
        assert_eq!(img.alt_text(), None);

        let input = InputInfo {
            id: Some(String::new()),
            ..InputInfo::default()
        };
        let form = FormInfo {
            inputs: vec![input.clone()],
            label_targets: [String::new()].into_iter().collect(),
        };
        assert!(!form.has_label_for(&input));
    }

    #[test]
    fn vitals_bands() {
        let good = WebVitals { cls: 0.05, fid_ms: 50.0, lcp_ms: 2000.0 };
        assert_eq!(good.status(), VitalsStatus::Good);
        let meh = WebVitals { cls: 0.1, ..good };
        assert_eq!(meh.status(), VitalsStatus::NeedsImprovement);
        let poor = WebVitals { lcp_ms: 4000.0, ..good };
        assert_eq!(poor.status(), VitalsStatus::Poor);
    }
}
