#![forbid(unsafe_code)]

//! Deterministic page simulator for tests and headless hosts.
//!
//! [`PageSimulator`] stacks sections vertically, tracks a scroll offset,
//! and implements [`Viewport`]. When attached to a
//! [`ManualIntersectionSource`] every scroll re-derives the visible ratios
//! and emits the entries that changed, so the whole scroll-spy loop can run
//! without a browser.
//!
//! Smooth scrolls complete instantly. The offset is clamped at zero but not
//! at the document end.
//!
//! # Example
//! ```
//! use folio_runtime::scroll_spy::{ScrollSpy, ScrollSpyConfig, Viewport};
//! use folio_runtime::simulator::PageSimulator;
//! use folio_runtime::subscription::ManualIntersectionSource;
//! use folio_core::SectionRegistry;
//!
//! let source = ManualIntersectionSource::new();
//! let mut page = PageSimulator::new(800.0)
//!     .section("home", 800.0)
//!     .section("about", 800.0)
//!     .attach(source.clone());
//! let mut spy = ScrollSpy::new(
//!     ScrollSpyConfig::new(SectionRegistry::new(["home", "about"]).unwrap()),
//!     &source,
//! );
//!
//! page.refresh();
//! spy.pump();
//! assert_eq!(spy.active_section().unwrap(), "home");
//!
//! page.set_scroll(800.0);
//! spy.pump();
//! assert_eq!(spy.active_section().unwrap(), "about");
//! ```

use folio_core::section::SectionId;

use crate::scroll_spy::{ScrollBehavior, Viewport};
use crate::subscription::{ManualIntersectionSource, SectionRect};

#[derive(Debug, Clone)]
struct Block {
    id: SectionId,
    top: f64,
    height: f64,
}

/// A scrollable column of sections.
#[derive(Debug, Clone)]
pub struct PageSimulator {
    viewport_height: f64,
    scroll: f64,
    blocks: Vec<Block>,
    requests: Vec<(f64, ScrollBehavior)>,
    source: Option<ManualIntersectionSource>,
}

impl PageSimulator {
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            scroll: 0.0,
            blocks: Vec::new(),
            requests: Vec::new(),
            source: None,
        }
    }

    /// Append a section below the previous one.
    #[must_use]
    pub fn section(mut self, id: impl Into<SectionId>, height: f64) -> Self {
        let top = self.document_height();
        self.blocks.push(Block {
            id: id.into(),
            top,
            height,
        });
        self
    }

    /// Emit intersection changes to `source` on every scroll.
    #[must_use]
    pub fn attach(mut self, source: ManualIntersectionSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn document_height(&self) -> f64 {
        self.blocks.last().map_or(0.0, |b| b.top + b.height)
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Every `scroll_to` request received, in order.
    #[must_use]
    pub fn requests(&self) -> &[(f64, ScrollBehavior)] {
        &self.requests
    }

    /// Sections in viewport-relative coordinates.
    #[must_use]
    pub fn layout(&self) -> Vec<SectionRect> {
        self.blocks
            .iter()
            .map(|b| SectionRect::new(b.id.clone(), b.top - self.scroll, b.height))
            .collect()
    }

    /// Move to `offset` (user scroll) and emit changes.
    pub fn set_scroll(&mut self, offset: f64) {
        self.scroll = offset.max(0.0);
        self.refresh();
    }

    /// Emit the current layout to the attached source, if any.
    pub fn refresh(&self) -> usize {
        match &self.source {
            Some(source) => source.emit_layout(&self.layout(), self.viewport_height),
            None => 0,
        }
    }
}

impl Viewport for PageSimulator {
    fn element_top(&self, id: &SectionId) -> Option<f64> {
        self.blocks
            .iter()
            .find(|b| &b.id == id)
            .map(|b| b.top - self.scroll)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.requests.push((top, behavior));
        self.set_scroll(top);
    }
}
