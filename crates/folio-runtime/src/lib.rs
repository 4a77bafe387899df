#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! The stateful half of the site: which section is on screen, what the
//! navigation bar shows, and which color scheme is applied.
//!
//! # Key Components
//!
//! - [`ScrollSpy`] - Active-section tracking from intersection batches
//! - [`IntersectionSource`] - Trait for the host's visibility observer
//! - [`Navigation`] - Mobile menu, header style, deferred section jumps
//! - [`ThemeService`] - Light/dark mode with persistence and subscribers
//! - [`PreferenceStore`] - Key/value storage backends
//! - [`PageSimulator`] - Deterministic page for tests and headless hosts
//!
//! # How it fits in the system
//! `folio-runtime` consumes section ids and margins from `folio-core` and
//! theme modes from `folio-style`. Everything the host must provide (the
//! visibility observer, the scroll container, the document root, storage)
//! sits behind a trait so the logic runs the same with or without a browser.

pub mod navigation;
pub mod persistence;
pub mod scroll_spy;
pub mod simulator;
pub mod subscription;
pub mod theme_service;

pub use navigation::Navigation;
#[cfg(feature = "file-store")]
pub use persistence::FileStore;
pub use persistence::{MemoryStore, PreferenceStore, StorageError, StorageResult};
pub use scroll_spy::{ScrollBehavior, ScrollSpy, ScrollSpyConfig, ScrollSpyError, Viewport};
pub use simulator::PageSimulator;
pub use subscription::{
    IntersectionEntry, IntersectionSource, ManualIntersectionSource, ObserveError,
    ObserverOptions, SectionRect, SubId, Subscription,
};
pub use theme_service::{RootAttributes, ThemeAdapter, ThemeService, ThemeSubscriptionId};
