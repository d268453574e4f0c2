//! Bottom-up hierarchy aggregation.
//!
//! Decks are processed in descending depth order, so every deck's children
//! are final before the parent is visited. Parents absent from the loaded
//! set are skipped; no synthetic deck is ever created for them.

use crate::hierarchy;
use crate::model::{DeckInfo, Status};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Roll statuses and counts up the ancestor chain and classify
/// container/empty decks. Consumes collector output, returns finalized
/// infos.
pub fn finalize(mut infos: Vec<DeckInfo>) -> Vec<DeckInfo> {
    let index: HashMap<String, usize> = infos
        .iter()
        .enumerate()
        .map(|(i, info)| (info.name.clone(), i))
        .collect();

    let mut order: Vec<usize> = (0..infos.len()).collect();
    order.sort_by_key(|&i| Reverse(hierarchy::depth(&infos[i].name)));

    for &i in &order {
        let Some(parent) = hierarchy::parent_name(&infos[i].name) else {
            continue;
        };
        let Some(&p) = index.get(parent) else {
            continue;
        };
        let child_status = infos[i].agg_status;
        let child_unsuspended = infos[i].agg_unsuspended_new;
        let child_suspended = infos[i].agg_suspended_new;
        let parent = &mut infos[p];
        parent.agg_status = parent.agg_status.max(child_status);
        parent.agg_unsuspended_new += child_unsuspended;
        parent.agg_suspended_new += child_suspended;
    }

    // The pass above derives aggregate status from child statuses. This
    // second pass reconciles it with the rolled-up counts: a zero aggregate
    // unsuspended count is at least an availability problem, and Limits
    // always sticks. Severity never decreases here, which keeps aggregates
    // monotonic over descendants.
    for info in &mut infos {
        info.agg_status = reconcile_status(info.agg_status, info.agg_unsuspended_new);
    }

    let names: Vec<String> = infos.iter().map(|info| info.name.clone()).collect();
    for info in &mut infos {
        if info.total_cards > 0 {
            continue;
        }
        let has_descendant = names
            .iter()
            .any(|other| hierarchy::is_ancestor(&info.name, other));
        info.is_container = has_descendant;
        info.is_empty = !has_descendant;
    }

    infos
}

fn reconcile_status(rolled_up: Status, agg_unsuspended_new: u32) -> Status {
    let count_based = if agg_unsuspended_new == 0 {
        Status::Availability
    } else {
        Status::Normal
    };
    rolled_up.max(count_based)
}
