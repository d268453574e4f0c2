//! # Store Layer
//!
//! The [`CollectionStore`] trait abstracts the host collection the report
//! reads from. Everything above this layer is pure logic over the trait,
//! which keeps the pipeline testable without a real collection on disk.
//!
//! ## Implementations
//!
//! - [`file::FileCollection`]: reads a JSON snapshot of a collection
//!   (decks, presets, cards) and tolerates several payload shapes for the
//!   deck list.
//! - [`memory::InMemoryCollection`]: in-memory fixture store for tests,
//!   with per-deck failure injection for the fail-soft paths.
//!
//! All queries are read-only; the report never mutates the collection.

use crate::error::Result;
use crate::model::{DeckEntry, DeckId, PresetId};
use serde::Deserialize;

pub mod file;
pub mod memory;

/// Per-deck limit overrides nested under a deck record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeckLimits {
    #[serde(default)]
    pub new_per_day: Option<u32>,
}

/// Full deck record as stored by the host.
///
/// The override fields are opaque external data; which of them a given host
/// actually populates depends on its schema version, so limit resolution
/// probes them in a fixed order (see `collect::resolve_new_limit`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeckRecord {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub filtered: bool,
    #[serde(default)]
    pub preset_id: Option<PresetId>,
    #[serde(default)]
    pub new_limit: Option<u32>,
    #[serde(default)]
    pub limits: Option<DeckLimits>,
}

impl DeckRecord {
    pub fn new(id: DeckId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn filtered(mut self) -> Self {
        self.filtered = true;
        self
    }

    pub fn with_preset_id(mut self, preset_id: PresetId) -> Self {
        self.preset_id = Some(preset_id);
        self
    }

    pub fn with_new_limit(mut self, limit: u32) -> Self {
        self.new_limit = Some(limit);
        self
    }

    pub fn with_limits(mut self, new_per_day: u32) -> Self {
        self.limits = Some(DeckLimits {
            new_per_day: Some(new_per_day),
        });
        self
    }
}

/// Shared configuration preset referenced by `DeckRecord::preset_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresetRecord {
    pub new_per_day: u32,
}

/// One card row, reduced to what the counting queries need.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CardRecord {
    pub deck_id: DeckId,
    #[serde(rename = "new", default)]
    pub is_new: bool,
    #[serde(default)]
    pub suspended: bool,
}

/// Aggregate card-count queries the collector issues per deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardQuery {
    /// All cards directly in the deck, regardless of state.
    Total,
    /// New cards, partitioned by the suspension flag.
    New { suspended: bool },
}

/// Read-only interface to the host collection.
pub trait CollectionStore {
    /// Enumerate all decks. Order is unspecified; only set membership
    /// matters downstream.
    fn list_decks(&self) -> Result<Vec<DeckEntry>>;

    /// Full record for a deck, or `None` if the host does not expose one.
    fn deck_record(&self, id: DeckId) -> Result<Option<DeckRecord>>;

    /// Shared preset by configuration-group id.
    fn preset_record(&self, id: PresetId) -> Result<Option<PresetRecord>>;

    /// Count cards in one deck matching the query.
    fn count_cards(&self, deck: DeckId, query: CardQuery) -> Result<u32>;
}
