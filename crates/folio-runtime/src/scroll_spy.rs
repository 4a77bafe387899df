#![forbid(unsafe_code)]

//! Scroll-spy: track which page section the reader is looking at.
//!
//! [`ScrollSpy`] subscribes to an [`IntersectionSource`] for every
//! registered section and keeps a single "active" section. Batches are
//! applied atomically: within one batch, the intersecting entry with the
//! largest ratio wins, and on an exact tie the section registered first
//! wins. A batch with no intersecting registered entry leaves the active
//! section unchanged.
//!
//! # Example
//! ```
//! use folio_core::SectionRegistry;
//! use folio_runtime::scroll_spy::{ScrollSpy, ScrollSpyConfig};
//! use folio_runtime::subscription::{IntersectionEntry, ManualIntersectionSource};
//!
//! let source = ManualIntersectionSource::new();
//! let mut spy = ScrollSpy::new(ScrollSpyConfig::new(SectionRegistry::site()), &source);
//!
//! source.emit(&[
//!     IntersectionEntry::new("about", true, 0.4),
//!     IntersectionEntry::new("skills", true, 0.9),
//! ]);
//! spy.pump();
//! assert_eq!(spy.active_section().map(|s| s.as_str()), Some("skills"));
//! ```
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Source unsupported | Spy stays detached; active section never changes |
//! | Unknown section in `scroll_to_section` | Warn, return `SectionNotFound`, no scroll |
//! | Entry for unregistered target | Ignored |
//! | Source gone | Remaining batches drained; then inert |

use std::fmt;
use std::sync::mpsc;

use folio_core::margin::RootMargin;
use folio_core::section::{SectionId, SectionRegistry};

use crate::subscription::{Batch, IntersectionEntry, IntersectionSource, ObserverOptions, Subscription};

/// Vertical offset applied when scrolling to a section (fixed header height).
pub const DEFAULT_OFFSET_PX: f64 = 80.0;

/// How the viewport should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// The scrollable page, as seen by the spy.
pub trait Viewport {
    /// Top of the section's element relative to the viewport top, or `None`
    /// if the element does not exist.
    fn element_top(&self, id: &SectionId) -> Option<f64>;

    /// Current document scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Request a scroll to document offset `top`.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Scroll-spy settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSpyConfig {
    pub sections: SectionRegistry,
    pub offset_px: f64,
    pub root_margin: RootMargin,
}

impl ScrollSpyConfig {
    #[must_use]
    pub fn new(sections: SectionRegistry) -> Self {
        Self {
            sections,
            offset_px: DEFAULT_OFFSET_PX,
            root_margin: RootMargin::default(),
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset_px: f64) -> Self {
        self.offset_px = offset_px;
        self
    }

    #[must_use]
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Options handed to the intersection source.
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: self.root_margin,
            ..ObserverOptions::default()
        }
    }
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self::new(SectionRegistry::site())
    }
}

/// Errors from scroll-spy navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollSpyError {
    /// No element exists for the requested section.
    SectionNotFound(String),
}

impl fmt::Display for ScrollSpyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionNotFound(id) => write!(f, "section \"{id}\" not found"),
        }
    }
}

impl std::error::Error for ScrollSpyError {}

/// Tracks the active section. See the [module docs](self).
pub struct ScrollSpy {
    config: ScrollSpyConfig,
    active: Option<SectionId>,
    receiver: Option<mpsc::Receiver<Batch>>,
    subscription: Option<Subscription>,
}

impl ScrollSpy {
    /// Subscribe to `source` for every registered section.
    ///
    /// If the source refuses, the spy is created detached and logs at debug.
    pub fn new(config: ScrollSpyConfig, source: &dyn IntersectionSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let options = config.observer_options();
        let subscribed = source.subscribe(config.sections.as_slice(), &options, tx);
        match subscribed {
            Ok(subscription) => {
                tracing::debug!(
                    sub_id = subscription.id(),
                    sections = config.sections.len(),
                    root_margin = %config.root_margin,
                    "scroll spy observing sections"
                );
                Self {
                    config,
                    active: None,
                    receiver: Some(rx),
                    subscription: Some(subscription),
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "intersection observer unavailable; scroll spy inactive");
                Self::detached(config)
            }
        }
    }

    /// A spy with no source. Only `scroll_to_section` moves it.
    #[must_use]
    pub fn detached(config: ScrollSpyConfig) -> Self {
        Self {
            config,
            active: None,
            receiver: None,
            subscription: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScrollSpyConfig {
        &self.config
    }

    /// The active section, if any has been observed or navigated to.
    #[must_use]
    pub fn active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    /// Whether the spy still holds a live subscription.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.subscription.is_some()
    }

    /// Apply one batch. Returns `true` if the active section changed.
    pub fn apply_batch(&mut self, batch: &[IntersectionEntry]) -> bool {
        let mut best: Option<(usize, &IntersectionEntry)> = None;
        for entry in batch.iter().filter(|e| e.is_intersecting) {
            let Some(position) = self.config.sections.position(entry.target.as_str()) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_pos, best_entry)) => {
                    entry.ratio > best_entry.ratio
                        || (entry.ratio == best_entry.ratio && position < best_pos)
                }
            };
            if better {
                best = Some((position, entry));
            }
        }

        let Some((_, winner)) = best else {
            return false;
        };
        if self.active.as_ref() == Some(&winner.target) {
            return false;
        }
        tracing::trace!(
            from = self.active.as_ref().map(SectionId::as_str),
            to = winner.target.as_str(),
            ratio = winner.ratio,
            "active section changed"
        );
        self.active = Some(winner.target.clone());
        true
    }

    /// Drain and apply every pending batch in arrival order.
    ///
    /// Returns `true` if the active section changed.
    pub fn pump(&mut self) -> bool {
        let Some(rx) = self.receiver.take() else {
            return false;
        };
        let before = self.active.clone();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(batch) => {
                    self.apply_batch(&batch);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            tracing::debug!("intersection source disconnected");
            self.subscription = None;
        } else {
            self.receiver = Some(rx);
        }
        self.active != before
    }

    /// Scroll so the section's top sits `offset_px` below the viewport top.
    ///
    /// The active section is set immediately, before any intersection
    /// update arrives. Returns the requested document offset.
    pub fn scroll_to_section(
        &mut self,
        id: &str,
        viewport: &mut dyn Viewport,
    ) -> Result<f64, ScrollSpyError> {
        let Some(section) = self.config.sections.get(id).cloned() else {
            tracing::warn!(section = id, "section not registered");
            return Err(ScrollSpyError::SectionNotFound(id.to_string()));
        };
        let Some(element_top) = viewport.element_top(&section) else {
            tracing::warn!(section = id, "section not found");
            return Err(ScrollSpyError::SectionNotFound(id.to_string()));
        };
        let target = (element_top + viewport.scroll_offset() - self.config.offset_px).max(0.0);
        viewport.scroll_to(target, ScrollBehavior::Smooth);
        tracing::debug!(section = id, target, "scrolling to section");
        self.active = Some(section);
        Ok(target)
    }

    /// Stop observing. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.receiver = None;
    }
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for ScrollSpy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("active", &self.active)
            .field("connected", &self.is_connected())
            .field("sections", &self.config.sections.len())
            .finish()
    }
}
