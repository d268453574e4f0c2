use super::{CardQuery, CardRecord, CollectionStore, DeckRecord, PresetRecord};
use crate::error::{DeckwatchError, Result};
use crate::model::{DeckEntry, DeckId, PresetId};
use std::collections::{HashMap, HashSet};

/// In-memory collection for tests and fixtures. Does NOT persist anything.
///
/// `with_broken_counts` marks a deck whose count queries fail, which is how
/// tests exercise the fail-soft per-deck paths.
#[derive(Default)]
pub struct InMemoryCollection {
    decks: Vec<DeckRecord>,
    presets: HashMap<PresetId, PresetRecord>,
    cards: Vec<CardRecord>,
    broken_counts: HashSet<DeckId>,
}

impl InMemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(mut self, record: DeckRecord) -> Self {
        self.decks.push(record);
        self
    }

    pub fn with_preset(mut self, id: PresetId, new_per_day: u32) -> Self {
        self.presets.insert(id, PresetRecord { new_per_day });
        self
    }

    pub fn with_new_cards(mut self, deck: DeckId, unsuspended: u32, suspended: u32) -> Self {
        for _ in 0..unsuspended {
            self.cards.push(CardRecord {
                deck_id: deck,
                is_new: true,
                suspended: false,
            });
        }
        for _ in 0..suspended {
            self.cards.push(CardRecord {
                deck_id: deck,
                is_new: true,
                suspended: true,
            });
        }
        self
    }

    pub fn with_review_cards(mut self, deck: DeckId, count: u32) -> Self {
        for _ in 0..count {
            self.cards.push(CardRecord {
                deck_id: deck,
                is_new: false,
                suspended: false,
            });
        }
        self
    }

    pub fn with_broken_counts(mut self, deck: DeckId) -> Self {
        self.broken_counts.insert(deck);
        self
    }
}

impl CollectionStore for InMemoryCollection {
    fn list_decks(&self) -> Result<Vec<DeckEntry>> {
        Ok(self
            .decks
            .iter()
            .map(|record| DeckEntry {
                id: record.id,
                name: record.name.clone(),
                filtered: record.filtered,
            })
            .collect())
    }

    fn deck_record(&self, id: DeckId) -> Result<Option<DeckRecord>> {
        Ok(self.decks.iter().find(|record| record.id == id).cloned())
    }

    fn preset_record(&self, id: PresetId) -> Result<Option<PresetRecord>> {
        Ok(self.presets.get(&id).cloned())
    }

    fn count_cards(&self, deck: DeckId, query: CardQuery) -> Result<u32> {
        if self.broken_counts.contains(&deck) {
            return Err(DeckwatchError::Store(format!(
                "count query failed for deck {}",
                deck
            )));
        }
        let count = self
            .cards
            .iter()
            .filter(|card| card.deck_id == deck)
            .filter(|card| match query {
                CardQuery::Total => true,
                CardQuery::New { suspended } => card.is_new && card.suspended == suspended,
            })
            .count();
        Ok(count as u32)
    }
}
