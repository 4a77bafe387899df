#![forbid(unsafe_code)]

//! Light/dark theme state with persistence and change notification.
//!
//! [`ThemeService`] is the single owner of the current [`ThemeMode`]. It
//! reads the stored choice once at construction, falls back to the OS
//! signal, and pushes every change through one [`ThemeAdapter`] (the only
//! place the document is touched) and then to subscribers.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use folio_runtime::persistence::{MemoryStore, PreferenceStore};
//! use folio_runtime::theme_service::{RootAttributes, ThemeService};
//! use folio_style::ThemeMode;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut theme = ThemeService::new(store.clone(), true, RootAttributes::default());
//! assert_eq!(theme.get(), ThemeMode::Dark);
//!
//! theme.toggle();
//! assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
//! assert_eq!(theme.adapter().data_theme(), Some("light"));
//! ```
//!
//! # Design Invariants
//!
//! 1. The adapter always reflects `get()` after any public call returns.
//! 2. An explicit `set`/`toggle` is persisted; OS changes never are.
//! 3. OS changes are followed only while no choice is stored.
//! 4. Storage failures are logged at warn and never block a change.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use folio_style::theme::ThemeMode;

use crate::persistence::PreferenceStore;

/// Storage key holding the user's explicit choice.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Applies a theme to the document.
pub trait ThemeAdapter {
    fn apply(&mut self, mode: ThemeMode);
}

/// Records the document root's theme-related state: the `light`/`dark`
/// class, `data-theme`, and `color-scheme`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootAttributes {
    classes: BTreeSet<String>,
    data_theme: Option<String>,
    color_scheme: Option<String>,
    applied: usize,
}

impl RootAttributes {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    #[must_use]
    pub fn data_theme(&self) -> Option<&str> {
        self.data_theme.as_deref()
    }

    #[must_use]
    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    /// Number of times a theme has been applied.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl ThemeAdapter for RootAttributes {
    fn apply(&mut self, mode: ThemeMode) {
        self.classes.remove(ThemeMode::Light.as_str());
        self.classes.remove(ThemeMode::Dark.as_str());
        self.classes.insert(mode.as_str().to_string());
        self.data_theme = Some(mode.as_str().to_string());
        self.color_scheme = Some(mode.as_str().to_string());
        self.applied += 1;
    }
}

/// Handle returned by [`ThemeService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeSubscriptionId(u64);

type Listener = Box<dyn FnMut(ThemeMode) + Send>;

/// Theme state owner. See the [module docs](self).
pub struct ThemeService<A: ThemeAdapter> {
    mode: ThemeMode,
    store: Arc<dyn PreferenceStore>,
    adapter: A,
    listeners: Vec<(ThemeSubscriptionId, Listener)>,
    next_id: u64,
}

impl<A: ThemeAdapter> ThemeService<A> {
    /// Resolve the initial mode and apply it.
    ///
    /// A stored `light`/`dark` wins; anything else (absent, unparseable, or
    /// a failing store) falls back to `system_prefers_dark`.
    pub fn new(store: Arc<dyn PreferenceStore>, system_prefers_dark: bool, mut adapter: A) -> Self {
        let stored = read_stored(store.as_ref());
        let mode = stored.unwrap_or_else(|| ThemeMode::from_system(system_prefers_dark));
        tracing::debug!(
            mode = mode.as_str(),
            from_storage = stored.is_some(),
            backend = store.name(),
            "theme initialised"
        );
        adapter.apply(mode);
        Self {
            mode,
            store,
            adapter,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn get(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Explicitly choose `mode`; persisted.
    pub fn set(&mut self, mode: ThemeMode) {
        if let Err(err) = self.store.set(THEME_STORAGE_KEY, mode.as_str()) {
            tracing::warn!(error = %err, backend = self.store.name(), "failed to persist theme");
        }
        self.transition(mode);
    }

    /// Flip between light and dark; persisted.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggle();
        self.set(next);
        next
    }

    /// Whether the user has stored an explicit choice.
    #[must_use]
    pub fn has_stored_preference(&self) -> bool {
        match self.store.get(THEME_STORAGE_KEY) {
            Ok(value) => value.is_some_and(|v| !v.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored theme");
                false
            }
        }
    }

    /// The OS color-scheme preference changed.
    pub fn on_system_change(&mut self, prefers_dark: bool) {
        if self.has_stored_preference() {
            return;
        }
        self.transition(ThemeMode::from_system(prefers_dark));
    }

    /// Register `listener`, called with the new mode after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(ThemeMode) + Send + 'static) -> ThemeSubscriptionId {
        let id = ThemeSubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ThemeSubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn transition(&mut self, mode: ThemeMode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!(from = self.mode.as_str(), to = mode.as_str(), "theme changed");
        self.mode = mode;
        self.adapter.apply(mode);
        for (_, listener) in &mut self.listeners {
            listener(mode);
        }
    }
}

fn read_stored(store: &dyn PreferenceStore) -> Option<ThemeMode> {
    match store.get(THEME_STORAGE_KEY) {
        Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring stored theme");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored theme");
            None
        }
    }
}

impl<A: ThemeAdapter + fmt::Debug> fmt::Debug for ThemeService<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeService")
            .field("mode", &self.mode)
            .field("store", &self.store.name())
            .field("adapter", &self.adapter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
