use super::{CardQuery, CardRecord, CollectionStore, DeckRecord, PresetRecord};
use crate::error::{DeckwatchError, Result};
use crate::model::{DeckEntry, DeckId, PresetId};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
struct DeckCounts {
    unsuspended_new: u32,
    suspended_new: u32,
    total: u32,
}

/// Collection snapshot read from a JSON file.
///
/// Hosts export the deck list in more than one shape, so the loader probes
/// a fixed fallback order and accepts the first shape that yields entries:
///
/// 1. an array of full deck records,
/// 2. an array of `[id, name]` pairs,
/// 3. an array of `[name, id]` pairs,
/// 4. an array of bare ids resolved through a top-level `deck_names` table.
///
/// A deck whose name cannot be resolved is dropped silently, and a document
/// with no recognizable deck list degrades to an empty collection rather
/// than an error. Card counts are tallied once at load time.
pub struct FileCollection {
    decks: Vec<DeckRecord>,
    presets: HashMap<PresetId, PresetRecord>,
    counts: HashMap<DeckId, DeckCounts>,
}

impl FileCollection {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(DeckwatchError::Io)?;
        let doc: Value = match serde_json::from_str(&content) {
            Ok(doc) => doc,
            // Unreadable snapshot content degrades to an empty collection.
            Err(_) => return Ok(Self::empty()),
        };
        Ok(Self::from_document(&doc))
    }

    fn empty() -> Self {
        Self {
            decks: Vec::new(),
            presets: HashMap::new(),
            counts: HashMap::new(),
        }
    }

    fn from_document(doc: &Value) -> Self {
        Self {
            decks: parse_decks(doc),
            presets: parse_presets(doc),
            counts: tally_cards(doc),
        }
    }
}

fn parse_decks(doc: &Value) -> Vec<DeckRecord> {
    let items = match doc.get("decks").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => return Vec::new(),
    };

    let records = parse_full_records(items);
    if !records.is_empty() {
        return records;
    }
    let records = parse_id_name_pairs(items);
    if !records.is_empty() {
        return records;
    }
    let records = parse_name_id_pairs(items);
    if !records.is_empty() {
        return records;
    }
    parse_bare_ids(items, doc)
}

fn parse_full_records(items: &[Value]) -> Vec<DeckRecord> {
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<DeckRecord>(item.clone()).ok())
        .collect()
}

fn parse_id_name_pairs(items: &[Value]) -> Vec<DeckRecord> {
    items
        .iter()
        .filter_map(|item| {
            let pair = item.as_array()?;
            let id = pair.first()?.as_i64()?;
            let name = pair.get(1)?.as_str()?;
            Some(DeckRecord::new(id, name))
        })
        .collect()
}

fn parse_name_id_pairs(items: &[Value]) -> Vec<DeckRecord> {
    items
        .iter()
        .filter_map(|item| {
            let pair = item.as_array()?;
            let name = pair.first()?.as_str()?;
            let id = pair.get(1)?.as_i64()?;
            Some(DeckRecord::new(id, name))
        })
        .collect()
}

fn parse_bare_ids(items: &[Value], doc: &Value) -> Vec<DeckRecord> {
    let names = doc.get("deck_names").and_then(Value::as_object);
    items
        .iter()
        .filter_map(|item| {
            let id = item.as_i64()?;
            // Ids without a name entry are dropped.
            let name = names?.get(&id.to_string())?.as_str()?;
            Some(DeckRecord::new(id, name))
        })
        .collect()
}

fn parse_presets(doc: &Value) -> HashMap<PresetId, PresetRecord> {
    let Some(entries) = doc.get("presets").and_then(Value::as_object) else {
        return HashMap::new();
    };
    entries
        .iter()
        .filter_map(|(key, value)| {
            let id: PresetId = key.parse().ok()?;
            let preset = serde_json::from_value::<PresetRecord>(value.clone()).ok()?;
            Some((id, preset))
        })
        .collect()
}

fn tally_cards(doc: &Value) -> HashMap<DeckId, DeckCounts> {
    let Some(items) = doc.get("cards").and_then(Value::as_array) else {
        return HashMap::new();
    };
    let mut counts: HashMap<DeckId, DeckCounts> = HashMap::new();
    for item in items {
        let Ok(card) = serde_json::from_value::<CardRecord>(item.clone()) else {
            continue;
        };
        let entry = counts.entry(card.deck_id).or_default();
        entry.total += 1;
        if card.is_new {
            if card.suspended {
                entry.suspended_new += 1;
            } else {
                entry.unsuspended_new += 1;
            }
        }
    }
    counts
}

impl CollectionStore for FileCollection {
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
        let counts = self.counts.get(&deck).copied().unwrap_or_default();
        Ok(match query {
            CardQuery::Total => counts.total,
            CardQuery::New { suspended: false } => counts.unsuspended_new,
            CardQuery::New { suspended: true } => counts.suspended_new,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn open_snapshot(doc: &Value) -> FileCollection {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", doc).unwrap();
        FileCollection::open(file.path()).unwrap()
    }

    #[test]
    fn loads_full_deck_records() {
        let store = open_snapshot(&json!({
            "decks": [
                {"id": 1, "name": "A", "new_limit": 5},
                {"id": 2, "name": "A::B", "filtered": true}
            ]
        }));
        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 2);
        assert!(decks.iter().any(|d| d.name == "A::B" && d.filtered));
        let record = store.deck_record(1).unwrap().unwrap();
        assert_eq!(record.new_limit, Some(5));
    }

    #[test]
    fn falls_back_to_id_name_pairs() {
        let store = open_snapshot(&json!({"decks": [[1, "A"], [2, "A::B"]]}));
        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 2);
        assert!(decks.iter().any(|d| d.id == 2 && d.name == "A::B"));
    }

    #[test]
    fn falls_back_to_name_id_pairs() {
        let store = open_snapshot(&json!({"decks": [["A", 1], ["B", 2]]}));
        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 2);
        assert!(decks.iter().any(|d| d.id == 1 && d.name == "A"));
    }

    #[test]
    fn resolves_bare_ids_and_drops_unnamed() {
        let store = open_snapshot(&json!({
            "decks": [1, 2, 3],
            "deck_names": {"1": "A", "3": "C"}
        }));
        let decks = store.list_decks().unwrap();
        let names: Vec<_> = decks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(decks.len(), 2);
        assert!(names.contains(&"A"));
        assert!(names.contains(&"C"));
    }

    #[test]
    fn unrecognized_shape_degrades_to_empty() {
        let store = open_snapshot(&json!({"decks": ["just", "strings"]}));
        assert!(store.list_decks().unwrap().is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        let store = FileCollection::open(file.path()).unwrap();
        assert!(store.list_decks().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(FileCollection::open("/nonexistent/snapshot.json").is_err());
    }

    #[test]
    fn tallies_card_counts_per_deck() {
        let store = open_snapshot(&json!({
            "decks": [{"id": 1, "name": "A"}],
            "cards": [
                {"deck_id": 1, "new": true},
                {"deck_id": 1, "new": true, "suspended": true},
                {"deck_id": 1},
                {"deck_id": 9, "new": true}
            ]
        }));
        assert_eq!(
            store
                .count_cards(1, CardQuery::New { suspended: false })
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .count_cards(1, CardQuery::New { suspended: true })
                .unwrap(),
            1
        );
        assert_eq!(store.count_cards(1, CardQuery::Total).unwrap(), 3);
        // Decks without cards count zero.
        assert_eq!(store.count_cards(2, CardQuery::Total).unwrap(), 0);
    }

    #[test]
    fn parses_presets_by_id() {
        let store = open_snapshot(&json!({
            "decks": [{"id": 1, "name": "A", "preset_id": 7}],
            "presets": {"7": {"new_per_day": 20}, "bad": {"new_per_day": 1}}
        }));
        assert_eq!(store.preset_record(7).unwrap().unwrap().new_per_day, 20);
        assert!(store.preset_record(8).unwrap().is_none());
    }
}
