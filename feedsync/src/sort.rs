use alloc::vec::Vec;

use crate::{EngagementKind, ItemId, ItemStore, SortMode};

/// Produces the working order for `mode`.
///
/// Metric modes are stable descending sorts on the counter, so equal
/// counters keep the provider order and the tie-break is deterministic.
pub fn working_order(store: &ItemStore, mode: SortMode) -> Vec<ItemId> {
    match mode {
        SortMode::Provider => store.provider_order(),
        SortMode::MostViewed => order_by(store, EngagementKind::View),
        SortMode::MostLiked => order_by(store, EngagementKind::Like),
    }
}

fn order_by(store: &ItemStore, kind: EngagementKind) -> Vec<ItemId> {
    let mut keyed: Vec<(ItemId, u64)> = store.iter().map(|it| (it.id, it.count(kind))).collect();
    keyed.sort_by(|a, b| b.1.cmp(&a.1));
    keyed.into_iter().map(|(id, _)| id).collect()
}
