//! # API Facade
//!
//! Thin facade over the command layer, the single entry point for every
//! deckwatch operation regardless of the UI driving it. Dispatches to
//! commands and returns structured `CmdResult` values; no business logic,
//! no I/O formatting, no presentation concerns.
//!
//! `DeckwatchApi<S: CollectionStore>` is generic over the store so the
//! facade can run against `FileCollection` in production and
//! `InMemoryCollection` in tests.

use crate::commands;
use crate::config::Preferences;
use crate::error::Result;
use crate::project::ReportFilter;
use crate::store::CollectionStore;
use std::path::PathBuf;

pub struct DeckwatchApi<S: CollectionStore> {
    store: S,
    prefs_dir: PathBuf,
}

impl<S: CollectionStore> DeckwatchApi<S> {
    pub fn new(store: S, prefs_dir: PathBuf) -> Self {
        Self { store, prefs_dir }
    }

    pub fn report(&self, filter: &ReportFilter) -> Result<commands::CmdResult> {
        commands::report::run(&self.store, filter)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.prefs_dir, action)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::load(&self.prefs_dir)
    }

    /// Record that a report was shown, for the reminder policy. A failed
    /// write is dropped silently.
    pub fn mark_report_shown(&self, now: i64) {
        let mut prefs = Preferences::load(&self.prefs_dir);
        prefs.last_opened_at = now;
        let _ = prefs.save(&self.prefs_dir);
    }
}

/// Preference operations run against the preferences directory alone and
/// need no collection, so they are also available without an API instance.
pub fn config(prefs_dir: &std::path::Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(prefs_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
