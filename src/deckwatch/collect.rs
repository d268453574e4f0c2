//! Per-deck metrics collection.
//!
//! Turns the raw deck enumeration into [`DeckInfo`] values with resolved
//! new-card limits, card counts, and self status. Aggregate fields start
//! out as the deck's own values; `aggregate::finalize` rolls them up.
//!
//! Everything here is fail-soft per deck: a failing count or record lookup
//! yields a safe default (count 0, limit unknown) and the report moves on.
//! A single bad deck must not abort the whole run.

use crate::model::{DeckEntry, DeckInfo, LimitSource, Status};
use crate::store::{CardQuery, CollectionStore};

/// Build one `DeckInfo` per loaded deck, aggregates not yet rolled up.
pub fn build_deck_infos<S: CollectionStore>(store: &S) -> Vec<DeckInfo> {
    let entries = store.list_decks().unwrap_or_default();
    entries
        .into_iter()
        .map(|entry| collect_deck(store, entry))
        .collect()
}

fn collect_deck<S: CollectionStore>(store: &S, entry: DeckEntry) -> DeckInfo {
    let (new_limit, limit_source) = resolve_new_limit(store, &entry);
    let unsuspended_new = store
        .count_cards(entry.id, CardQuery::New { suspended: false })
        .unwrap_or(0);
    let suspended_new = store
        .count_cards(entry.id, CardQuery::New { suspended: true })
        .unwrap_or(0);
    let total_cards = store.count_cards(entry.id, CardQuery::Total).unwrap_or(0);
    let self_status = Status::classify(new_limit, unsuspended_new);

    DeckInfo {
        id: entry.id,
        name: entry.name,
        is_filtered: entry.filtered,
        new_limit,
        limit_source,
        unsuspended_new,
        suspended_new,
        total_cards,
        self_status,
        agg_status: self_status,
        agg_unsuspended_new: unsuspended_new,
        agg_suspended_new: suspended_new,
        is_container: false,
        is_empty: false,
    }
}

/// Resolve a deck's new-card daily limit, first hit wins:
///
/// 1. per-deck override field on the record,
/// 2. "new per day" inside the record's limits sub-structure,
/// 3. the shared preset referenced by the record,
/// 4. nothing found: `(None, Unknown)`.
///
/// Filtered decks have no day-limit concept and always resolve to unknown,
/// even when the record carries an override.
pub fn resolve_new_limit<S: CollectionStore>(
    store: &S,
    entry: &DeckEntry,
) -> (Option<u32>, LimitSource) {
    if entry.filtered {
        return (None, LimitSource::Unknown);
    }
    let record = match store.deck_record(entry.id) {
        Ok(Some(record)) => record,
        _ => return (None, LimitSource::Unknown),
    };
    if let Some(limit) = record.new_limit {
        return (Some(limit), LimitSource::DeckOverride);
    }
    if let Some(per_day) = record.limits.as_ref().and_then(|l| l.new_per_day) {
        return (Some(per_day), LimitSource::DeckOverride);
    }
    if let Some(preset_id) = record.preset_id {
        if let Ok(Some(preset)) = store.preset_record(preset_id) {
            return (Some(preset.new_per_day), LimitSource::SharedPreset);
        }
    }
    (None, LimitSource::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryCollection;
    use crate::store::DeckRecord;

    fn entry_for(store: &InMemoryCollection, id: i64) -> DeckEntry {
        store
            .list_decks()
            .unwrap()
            .into_iter()
            .find(|e| e.id == id)
            .unwrap()
    }

    #[test]
    fn override_field_wins_over_everything() {
        let store = InMemoryCollection::new()
            .with_deck(
                DeckRecord::new(1, "A")
                    .with_new_limit(3)
                    .with_limits(10)
                    .with_preset_id(7),
            )
            .with_preset(7, 20);
        let (limit, source) = resolve_new_limit(&store, &entry_for(&store, 1));
        assert_eq!(limit, Some(3));
        assert_eq!(source, LimitSource::DeckOverride);
    }

    #[test]
    fn limits_substructure_counts_as_override() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_limits(10).with_preset_id(7))
            .with_preset(7, 20);
        let (limit, source) = resolve_new_limit(&store, &entry_for(&store, 1));
        assert_eq!(limit, Some(10));
        assert_eq!(source, LimitSource::DeckOverride);
    }

    #[test]
    fn preset_is_last_resort() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_preset_id(7))
            .with_preset(7, 20);
        let (limit, source) = resolve_new_limit(&store, &entry_for(&store, 1));
        assert_eq!(limit, Some(20));
        assert_eq!(source, LimitSource::SharedPreset);
    }

    #[test]
    fn nothing_found_is_unknown() {
        let store = InMemoryCollection::new().with_deck(DeckRecord::new(1, "A").with_preset_id(7));
        let (limit, source) = resolve_new_limit(&store, &entry_for(&store, 1));
        assert_eq!(limit, None);
        assert_eq!(source, LimitSource::Unknown);
    }

    #[test]
    fn filtered_decks_never_report_a_limit() {
        let store =
            InMemoryCollection::new().with_deck(DeckRecord::new(1, "Dyn").filtered().with_new_limit(5));
        let (limit, source) = resolve_new_limit(&store, &entry_for(&store, 1));
        assert_eq!(limit, None);
        assert_eq!(source, LimitSource::Unknown);
    }

    #[test]
    fn broken_counts_default_to_zero() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(5))
            .with_new_cards(1, 3, 0)
            .with_broken_counts(1)
            .with_deck(DeckRecord::new(2, "B").with_new_limit(5))
            .with_new_cards(2, 2, 1);

        let infos = build_deck_infos(&store);
        assert_eq!(infos.len(), 2);

        let a = infos.iter().find(|i| i.name == "A").unwrap();
        assert_eq!(a.unsuspended_new, 0);
        assert_eq!(a.total_cards, 0);
        // Zero counted unsuspended cards reads as an availability problem.
        assert_eq!(a.self_status, Status::Availability);

        // The healthy deck is unaffected.
        let b = infos.iter().find(|i| i.name == "B").unwrap();
        assert_eq!(b.unsuspended_new, 2);
        assert_eq!(b.suspended_new, 1);
        assert_eq!(b.self_status, Status::Normal);
    }

    #[test]
    fn collects_counts_limits_and_status() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(0))
            .with_new_cards(1, 4, 0);
        let infos = build_deck_infos(&store);
        let a = &infos[0];
        assert_eq!(a.new_limit, Some(0));
        assert_eq!(a.self_status, Status::Limits);
        assert_eq!(a.agg_status, Status::Limits);
        assert_eq!(a.agg_unsuspended_new, 4);
    }
}
