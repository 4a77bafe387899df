//! Theme Persistence E2E Tests
//!
//! End-to-end validation of theme choice persistence across sessions.
//!
//! # Running Tests
//!
//! ```sh
//! cargo test -p folio-runtime --test theme_persistence_e2e
//! ```
//!
//! # Invariants
//!
//! 1. **Round-trip integrity**: A toggled theme is restored on the next visit
//! 2. **System fallback**: Without a stored choice the OS signal decides
//! 3. **Graceful degradation**: A corrupt preference file never blocks a change
//! 4. **Concurrent safety**: Several threads can write through one store

#![cfg(all(test, feature = "file-store"))]

use folio_runtime::persistence::{FileStore, MemoryStore, PreferenceStore};
use folio_runtime::theme_service::{RootAttributes, ThemeService};
use folio_style::ThemeMode;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn log_jsonl(event: &str, case: &str, passed: bool, details: &str) {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    eprintln!(
        r#"{{"event":"{event}","case":"{case}","passed":{passed},"details":"{details}","timestamp":{timestamp}}}"#
    );
}

fn open(store: Arc<dyn PreferenceStore>, system_dark: bool) -> ThemeService<RootAttributes> {
    ThemeService::new(store, system_dark, RootAttributes::default())
}

// ============================================================================
// 1. Session Cycle
// ============================================================================

#[test]
fn toggled_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let mut theme = open(Arc::new(FileStore::new(&path)), false);
        assert_eq!(theme.get(), ThemeMode::Light);
        theme.toggle();
    }

    // Next visit, OS now says light; stored dark wins.
    let theme = open(Arc::new(FileStore::new(&path)), false);
    let passed = theme.get() == ThemeMode::Dark;
    log_jsonl("session_cycle", "toggled_theme_survives_restart", passed, "dark restored");
    assert!(passed);
    assert!(theme.adapter().has_class("dark"));
}

#[test]
fn cleared_store_falls_back_to_system() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let store = Arc::new(FileStore::new(&path));

    {
        let mut theme = open(store.clone(), false);
        theme.set(ThemeMode::Light);
    }
    store.clear().unwrap();

    let theme = open(store, true);
    assert_eq!(theme.get(), ThemeMode::Dark);
    assert!(!theme.has_stored_preference());
}

// ============================================================================
// 2. Degradation
// ============================================================================

#[test]
fn corrupt_file_does_not_block_theme_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, b"\x00\x01 not json").unwrap();

    let mut theme = open(Arc::new(FileStore::new(&path)), true);
    assert_eq!(theme.get(), ThemeMode::Dark);

    // The write fails (the existing file is unreadable) but the mode moves.
    theme.toggle();
    assert_eq!(theme.get(), ThemeMode::Light);
    assert_eq!(theme.adapter().color_scheme(), Some("light"));
    log_jsonl("degradation", "corrupt_file", true, "mode changed despite store error");
}

#[test]
fn system_changes_track_until_user_chooses() {
    let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
    let mut theme = open(store.clone(), false);

    for prefers_dark in [true, false, true] {
        theme.on_system_change(prefers_dark);
        assert_eq!(theme.get(), ThemeMode::from_system(prefers_dark));
    }

    theme.set(ThemeMode::Light);
    theme.on_system_change(true);
    assert_eq!(theme.get(), ThemeMode::Light);
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
}

// ============================================================================
// 3. Concurrency
// ============================================================================

#[test]
fn concurrent_writers_leave_a_valid_file() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("prefs.json")));
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..10 {
                    store.set(&format!("k{i}"), &j.to_string()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..4 {
        assert_eq!(store.get(&format!("k{i}")).unwrap().as_deref(), Some("9"));
    }
}
