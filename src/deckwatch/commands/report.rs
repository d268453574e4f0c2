use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::project::{self, ReportFilter};
use crate::store::CollectionStore;
use crate::{aggregate, collect};

/// Run the full load, classify, aggregate, project pipeline.
///
/// The two terminal empty states are distinct: an empty collection reports
/// "no decks found", while a collection where nothing passes the filters
/// reports "no matches". Neither is an error.
pub fn run<S: CollectionStore>(store: &S, filter: &ReportFilter) -> Result<CmdResult> {
    let infos = aggregate::finalize(collect::build_deck_infos(store));
    if infos.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No decks found.")));
    }

    let summary = project::summarize(&infos);
    match project::project(&infos, filter) {
        Some(rows) => Ok(CmdResult::default().with_rows(rows).with_summary(summary)),
        None => Ok(CmdResult::default()
            .with_summary(summary)
            .with_message(CmdMessage::info("No decks match the current filters."))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryCollection;
    use crate::store::DeckRecord;

    #[test]
    fn empty_collection_reports_no_decks() {
        let store = InMemoryCollection::new();
        let result = run(&store, &ReportFilter::default()).unwrap();
        assert!(result.rows.is_empty());
        assert!(result.summary.is_none());
        assert_eq!(result.messages[0].content, "No decks found.");
    }

    #[test]
    fn no_match_is_distinct_from_no_decks() {
        // One Normal deck, default filter hides Normal.
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(5))
            .with_new_cards(1, 3, 0);
        let result = run(&store, &ReportFilter::default()).unwrap();
        assert!(result.rows.is_empty());
        // The summary still describes the loaded decks.
        assert_eq!(result.summary.as_ref().unwrap().decks, 1);
        assert_eq!(
            result.messages[0].content,
            "No decks match the current filters."
        );
    }

    #[test]
    fn matching_decks_produce_rows_and_summary() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(0))
            .with_new_cards(1, 2, 0);
        let result = run(&store, &ReportFilter::default()).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].name, "A");
        assert_eq!(result.summary.unwrap().limits, 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn repeated_runs_yield_identical_output() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(5))
            .with_new_cards(1, 3, 0)
            .with_deck(DeckRecord::new(2, "A::B"))
            .with_new_cards(2, 0, 2);
        let filter = ReportFilter::default();
        let first = run(&store, &filter).unwrap();
        let second = run(&store, &filter).unwrap();
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.summary, second.summary);
    }
}
