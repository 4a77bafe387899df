#![forbid(unsafe_code)]

//! Viewport-intersection subscriptions.
//!
//! The host runtime (a browser's intersection observer, or a simulator)
//! implements [`IntersectionSource`]. Consumers subscribe with a list of
//! targets and an `mpsc` sender; the source pushes one `Vec` per callback
//! batch and the consumer drains them on its own thread.
//!
//! # How it works
//!
//! 1. The consumer calls [`IntersectionSource::subscribe`] with its targets
//! 2. The source pushes [`Batch`]es whenever visibility crosses a threshold
//! 3. The consumer drains the receiver and applies each batch atomically
//! 4. Dropping (or calling [`Subscription::unsubscribe`]) releases the
//!    observation; the source stops sending to that sender

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};

use folio_core::margin::RootMargin;
use folio_core::section::SectionId;

/// A unique identifier for a subscription.
pub type SubId = u64;

/// Visibility report for one observed target.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// The observed section.
    pub target: SectionId,
    /// Whether any part of the target is inside the observation root.
    pub is_intersecting: bool,
    /// Visible fraction of the target, in [0, 1].
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<SectionId>, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            ratio,
        }
    }
}

/// One callback's worth of entries, in source order.
pub type Batch = Vec<IntersectionEntry>;

/// Options passed to the source when subscribing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Ratios at which a change is reported.
    pub thresholds: Vec<f64>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
        }
    }
}

/// Errors raised by an intersection source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveError {
    /// The host has no intersection support.
    Unsupported,
    /// The source has shut down.
    Disconnected,
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "intersection observation is not supported"),
            Self::Disconnected => write!(f, "intersection source disconnected"),
        }
    }
}

impl std::error::Error for ObserveError {}

/// A live observation. Releases itself on drop.
pub struct Subscription {
    id: SubId,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap a release action run exactly once on unsubscribe or drop.
    pub fn new(id: SubId, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    #[must_use]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Release the observation now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!(sub_id = self.id, "releasing intersection subscription");
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// A source of intersection batches.
pub trait IntersectionSource {
    /// Start observing `targets`. Batches go to `sink` until the returned
    /// subscription is released.
    fn subscribe(
        &self,
        targets: &[SectionId],
        options: &ObserverOptions,
        sink: mpsc::Sender<Batch>,
    ) -> Result<Subscription, ObserveError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout geometry
// ─────────────────────────────────────────────────────────────────────────────

/// A section's vertical extent relative to the viewport top.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRect {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    pub fn new(id: impl Into<SectionId>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Intersection state against a viewport of `viewport_height` shrunk or
    /// grown by `margin`.
    #[must_use]
    pub fn intersection(&self, viewport_height: f64, margin: &RootMargin) -> (bool, f64) {
        let (root_top, root_bottom) = margin.vertical_bounds(viewport_height);
        let bottom = self.top + self.height;
        let visible = bottom.min(root_bottom) - self.top.max(root_top);
        if visible <= 0.0 || self.height <= 0.0 {
            return (false, 0.0);
        }
        (true, (visible / self.height).clamp(0.0, 1.0))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manual source
// ─────────────────────────────────────────────────────────────────────────────

struct Observer {
    id: SubId,
    targets: Vec<SectionId>,
    options: ObserverOptions,
    sink: mpsc::Sender<Batch>,
    /// Last reported (intersecting, threshold bucket) per target.
    last: HashMap<SectionId, (bool, usize)>,
}

impl Observer {
    fn bucket(&self, ratio: f64) -> usize {
        self.options.thresholds.iter().filter(|t| ratio >= **t).count()
    }
}

struct ManualInner {
    supported: bool,
    observers: Vec<Observer>,
}

/// Host-driven intersection source.
///
/// The embedding host (or a test) pushes batches explicitly with
/// [`emit`](Self::emit) or derives them from a layout with
/// [`emit_layout`](Self::emit_layout). Cloning shares the same observer set.
#[derive(Clone)]
pub struct ManualIntersectionSource {
    inner: Arc<Mutex<ManualInner>>,
}

static NEXT_SUB_ID: AtomicU64 = AtomicU64::new(1);

impl ManualIntersectionSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualInner {
                supported: true,
                observers: Vec::new(),
            })),
        }
    }

    /// A source standing in for a host without intersection support.
    #[must_use]
    pub fn unsupported() -> Self {
        let source = Self::new();
        source.set_supported(false);
        source
    }

    fn lock(&self) -> MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_supported(&self, supported: bool) {
        self.lock().supported = supported;
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Union of targets currently observed, in first-seen order.
    #[must_use]
    pub fn observed_targets(&self) -> Vec<SectionId> {
        let inner = self.lock();
        let mut out: Vec<SectionId> = Vec::new();
        for observer in &inner.observers {
            for target in &observer.targets {
                if !out.contains(target) {
                    out.push(target.clone());
                }
            }
        }
        out
    }

    /// Deliver `batch` to every observer, filtered to its targets.
    ///
    /// Observers whose receiver is gone are dropped. Returns how many
    /// observers received a non-empty batch.
    pub fn emit(&self, batch: &[IntersectionEntry]) -> usize {
        let mut inner = self.lock();
        let mut delivered = 0;
        inner.observers.retain_mut(|observer| {
            let filtered: Batch = batch
                .iter()
                .filter(|e| observer.targets.contains(&e.target))
                .cloned()
                .collect();
            if filtered.is_empty() {
                return true;
            }
            for entry in &filtered {
                let bucket = observer.bucket(entry.ratio);
                observer
                    .last
                    .insert(entry.target.clone(), (entry.is_intersecting, bucket));
            }
            match observer.sink.send(filtered) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    tracing::debug!(sub_id = observer.id, "observer receiver dropped");
                    false
                }
            }
        });
        delivered
    }

    /// Compute entries from a layout and deliver those that changed.
    ///
    /// Like a browser observer, the first call reports every target and
    /// later calls report only targets whose intersecting state or
    /// threshold bucket changed.
    pub fn emit_layout(&self, sections: &[SectionRect], viewport_height: f64) -> usize {
        let mut inner = self.lock();
        let mut delivered = 0;
        inner.observers.retain_mut(|observer| {
            let mut batch = Batch::new();
            for rect in sections.iter().filter(|r| observer.targets.contains(&r.id)) {
                let (is_intersecting, ratio) =
                    rect.intersection(viewport_height, &observer.options.root_margin);
                let state = (is_intersecting, observer.bucket(ratio));
                if observer.last.get(&rect.id) != Some(&state) {
                    observer.last.insert(rect.id.clone(), state);
                    batch.push(IntersectionEntry {
                        target: rect.id.clone(),
                        is_intersecting,
                        ratio,
                    });
                }
            }
            if batch.is_empty() {
                return true;
            }
            match observer.sink.send(batch) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        delivered
    }
}

impl Default for ManualIntersectionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionSource for ManualIntersectionSource {
    fn subscribe(
        &self,
        targets: &[SectionId],
        options: &ObserverOptions,
        sink: mpsc::Sender<Batch>,
    ) -> Result<Subscription, ObserveError> {
        let mut inner = self.lock();
        if !inner.supported {
            return Err(ObserveError::Unsupported);
        }
        let id = NEXT_SUB_ID.fetch_add(1, Ordering::Relaxed);
        inner.observers.push(Observer {
            id,
            targets: targets.to_vec(),
            options: options.clone(),
            sink,
            last: HashMap::new(),
        });
        tracing::debug!(sub_id = id, targets = targets.len(), "intersection subscription started");

        let shared = Arc::clone(&self.inner);
        Ok(Subscription::new(id, move || {
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            inner.observers.retain(|o| o.id != id);
        }))
    }
}

impl fmt::Debug for ManualIntersectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualIntersectionSource")
            .field("supported", &inner.supported)
            .field("observers", &inner.observers.len())
            .finish()
    }
}
