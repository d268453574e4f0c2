//! Filter/view projection.
//!
//! Applies the user's inclusion filters to the finalized deck infos and
//! produces the visible node set the renderer consumes: matched decks plus
//! every loaded ancestor of a match, the ancestors flagged as context-only
//! so the renderer can mute them.

use crate::config::Preferences;
use crate::hierarchy;
use crate::model::{DeckInfo, Status};
use std::collections::HashSet;

/// Inclusion filters for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive name substring; empty matches all.
    pub name_contains: String,
    pub include_filtered: bool,
    pub include_container: bool,
    pub include_empty: bool,
    pub include_limits: bool,
    pub include_availability: bool,
    pub include_normal: bool,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self::from_preferences(&Preferences::default())
    }
}

impl ReportFilter {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            name_contains: prefs.name_filter.clone(),
            include_filtered: prefs.filter_filtered_decks,
            include_container: prefs.filter_container_decks,
            include_empty: prefs.filter_empty_decks,
            include_limits: prefs.filter_limits_zero,
            include_availability: prefs.filter_available_zero,
            include_normal: prefs.filter_has_new,
        }
    }
}

/// Color class the renderer maps to an actual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Limits,
    Availability,
    Normal,
    Filtered,
    /// Ancestor shown only for tree context.
    Context,
}

/// One visible node, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckRow {
    pub name: String,
    pub depth: usize,
    pub status: Status,
    pub color: ColorClass,
    pub limit_label: String,
    pub agg_unsuspended_new: u32,
    pub agg_suspended_new: u32,
    pub tooltip: String,
    /// True when the deck did not match the filters itself and is shown
    /// only because a descendant did.
    pub context_only: bool,
}

/// Per-status deck tally over the whole loaded set, filters not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub decks: usize,
    pub limits: usize,
    pub availability: usize,
    pub normal: usize,
}

pub fn summarize(infos: &[DeckInfo]) -> Summary {
    let mut summary = Summary {
        decks: infos.len(),
        ..Summary::default()
    };
    for info in infos {
        match info.agg_status {
            Status::Limits => summary.limits += 1,
            Status::Availability => summary.availability += 1,
            Status::Normal => summary.normal += 1,
        }
    }
    summary
}

fn matches(info: &DeckInfo, filter: &ReportFilter) -> bool {
    if !filter.name_contains.is_empty()
        && !info
            .name
            .to_lowercase()
            .contains(&filter.name_contains.to_lowercase())
    {
        return false;
    }
    // Category exclusions drop the deck entirely, independent of status.
    if info.is_filtered && !filter.include_filtered {
        return false;
    }
    if info.is_container && !filter.include_container {
        return false;
    }
    if info.is_empty && !filter.include_empty {
        return false;
    }
    match info.agg_status {
        Status::Limits => filter.include_limits,
        Status::Availability => filter.include_availability,
        Status::Normal => filter.include_normal,
    }
}

/// Compute the visible rows in hierarchical order, or `None` when nothing
/// matches (distinct from an empty collection, which the caller detects
/// before projecting).
pub fn project(infos: &[DeckInfo], filter: &ReportFilter) -> Option<Vec<DeckRow>> {
    let matched: HashSet<&str> = infos
        .iter()
        .filter(|info| matches(info, filter))
        .map(|info| info.name.as_str())
        .collect();
    if matched.is_empty() {
        return None;
    }

    let loaded: HashSet<&str> = infos.iter().map(|info| info.name.as_str()).collect();
    let mut visible: HashSet<&str> = matched.clone();
    for name in &matched {
        for ancestor in hierarchy::ancestors(name) {
            if loaded.contains(ancestor) {
                visible.insert(ancestor);
            }
        }
    }

    let mut shown: Vec<&DeckInfo> = infos
        .iter()
        .filter(|info| visible.contains(info.name.as_str()))
        .collect();
    shown.sort_by(|a, b| {
        hierarchy::path_components(&a.name).cmp(&hierarchy::path_components(&b.name))
    });

    Some(
        shown
            .into_iter()
            .map(|info| to_row(info, !matched.contains(info.name.as_str())))
            .collect(),
    )
}

fn to_row(info: &DeckInfo, context_only: bool) -> DeckRow {
    let color = if context_only {
        ColorClass::Context
    } else if info.is_filtered {
        ColorClass::Filtered
    } else {
        match info.agg_status {
            Status::Limits => ColorClass::Limits,
            Status::Availability => ColorClass::Availability,
            Status::Normal => ColorClass::Normal,
        }
    };
    let tooltip = format!(
        "{}: limit {} ({}), {} unsuspended / {} suspended new incl. subdecks",
        info.name,
        info.limit_label(),
        info.limit_source,
        info.agg_unsuspended_new,
        info.agg_suspended_new
    );
    DeckRow {
        name: info.name.clone(),
        depth: info.depth(),
        status: info.agg_status,
        color,
        limit_label: info.limit_label(),
        agg_unsuspended_new: info.agg_unsuspended_new,
        agg_suspended_new: info.agg_suspended_new,
        tooltip,
        context_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::collect::build_deck_infos;
    use crate::store::memory::InMemoryCollection;
    use crate::store::DeckRecord;

    fn sample_infos() -> Vec<DeckInfo> {
        // A (Normal) > A::B (Availability via suspension) > A::B::C (Limits)
        // plus a filtered deck and a Normal leaf.
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "A").with_new_limit(5))
            .with_new_cards(1, 3, 0)
            .with_deck(DeckRecord::new(2, "A::B"))
            .with_new_cards(2, 0, 2)
            .with_deck(DeckRecord::new(3, "A::B::C").with_new_limit(0))
            .with_new_cards(3, 1, 0)
            .with_deck(DeckRecord::new(4, "Dyn").filtered())
            .with_deck(DeckRecord::new(5, "Fresh").with_new_limit(10))
            .with_new_cards(5, 6, 0);
        aggregate::finalize(build_deck_infos(&store))
    }

    fn all_statuses() -> ReportFilter {
        ReportFilter {
            include_normal: true,
            ..ReportFilter::default()
        }
    }

    fn names(rows: &[DeckRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn default_filter_hides_normal_decks() {
        let infos = sample_infos();
        let rows = project(&infos, &ReportFilter::default()).unwrap();
        assert!(!names(&rows).contains(&"Fresh"));
        assert!(names(&rows).contains(&"A::B::C"));
    }

    #[test]
    fn unmatched_ancestors_are_context_only() {
        let infos = sample_infos();
        let filter = ReportFilter {
            name_contains: "a::b::c".into(),
            ..all_statuses()
        };
        let rows = project(&infos, &filter).unwrap();
        // Only A::B::C matches the substring; A and A::B appear as context.
        let a = rows.iter().find(|r| r.name == "A").unwrap();
        let b = rows.iter().find(|r| r.name == "A::B").unwrap();
        let c = rows.iter().find(|r| r.name == "A::B::C").unwrap();
        assert!(a.context_only);
        assert_eq!(a.color, ColorClass::Context);
        assert!(b.context_only);
        assert!(!c.context_only);
        assert_eq!(c.color, ColorClass::Limits);
    }

    #[test]
    fn every_loaded_ancestor_of_a_match_is_visible() {
        let infos = sample_infos();
        let filter = ReportFilter {
            name_contains: "c".into(),
            ..all_statuses()
        };
        let rows = project(&infos, &filter).unwrap();
        assert_eq!(names(&rows), vec!["A", "A::B", "A::B::C"]);
    }

    #[test]
    fn rows_come_out_in_tree_order_with_depths() {
        let infos = sample_infos();
        let rows = project(&infos, &all_statuses()).unwrap();
        assert_eq!(names(&rows), vec!["A", "A::B", "A::B::C", "Dyn", "Fresh"]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 0, 0]);
    }

    #[test]
    fn filtered_deck_renders_blue_with_na_limit() {
        let infos = sample_infos();
        let rows = project(&infos, &all_statuses()).unwrap();
        let dyn_row = rows.iter().find(|r| r.name == "Dyn").unwrap();
        assert_eq!(dyn_row.color, ColorClass::Filtered);
        assert_eq!(dyn_row.limit_label, "N/A");
    }

    #[test]
    fn category_exclusion_drops_decks_regardless_of_status() {
        let store = InMemoryCollection::new()
            .with_deck(DeckRecord::new(1, "Empty").with_new_limit(0));
        let infos = aggregate::finalize(build_deck_infos(&store));
        let filter = ReportFilter {
            include_empty: false,
            ..all_statuses()
        };
        // Limits status is enabled, but the empty-deck toggle wins.
        assert!(project(&infos, &filter).is_none());
    }

    #[test]
    fn no_match_is_signalled_not_rendered_empty() {
        let infos = sample_infos();
        let filter = ReportFilter {
            name_contains: "zzz".into(),
            ..all_statuses()
        };
        assert!(project(&infos, &filter).is_none());
    }

    #[test]
    fn enabling_toggles_never_shrinks_the_matched_set() {
        let infos = sample_infos();
        let narrow = ReportFilter::default();
        let wide = all_statuses();
        let narrow_rows: Vec<String> = project(&infos, &narrow)
            .unwrap()
            .into_iter()
            .filter(|r| !r.context_only)
            .map(|r| r.name)
            .collect();
        let wide_rows: Vec<String> = project(&infos, &wide)
            .unwrap()
            .into_iter()
            .filter(|r| !r.context_only)
            .map(|r| r.name)
            .collect();
        for name in &narrow_rows {
            assert!(wide_rows.contains(name));
        }
    }

    #[test]
    fn narrowing_the_substring_never_grows_the_matched_set() {
        let infos = sample_infos();
        let broad = ReportFilter {
            name_contains: "a".into(),
            ..all_statuses()
        };
        let narrow = ReportFilter {
            name_contains: "a::b".into(),
            ..all_statuses()
        };
        let broad_rows: Vec<String> = project(&infos, &broad)
            .unwrap()
            .into_iter()
            .filter(|r| !r.context_only)
            .map(|r| r.name)
            .collect();
        let narrow_rows: Vec<String> = project(&infos, &narrow)
            .unwrap()
            .into_iter()
            .filter(|r| !r.context_only)
            .map(|r| r.name)
            .collect();
        for name in &narrow_rows {
            assert!(broad_rows.contains(name));
        }
    }

    #[test]
    fn summary_counts_aggregated_statuses() {
        let infos = sample_infos();
        let summary = summarize(&infos);
        assert_eq!(summary.decks, 5);
        // A, A::B, A::B::C all roll up to Limits via C.
        assert_eq!(summary.limits, 3);
        // Dyn has no cards at all.
        assert_eq!(summary.availability, 1);
        assert_eq!(summary.normal, 1);
    }
}
