use alloc::vec::Vec;

use crate::map::IdMap;
use crate::{EngagementKind, Item, ItemId};

/// The authoritative client-side mirror of item engagement state.
///
/// Insertion order is the provider's ranking order and never changes after
/// construction; lookups by id are O(1) through a side index. Counters are
/// written only through [`ItemStore::apply_confirmed`], which is the
/// reconciliation seam, and merges are monotonic so a stale confirmation can
/// never move a counter backwards.
#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    index: IdMap<usize>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from the provider's pre-ranked feed.
    ///
    /// Duplicate ids are skipped (and debug-asserted); the first occurrence
    /// wins.
    pub fn from_provider(items: impl IntoIterator<Item = Item>) -> Self {
        let mut store = Self::new();
        for item in items {
            if store.index.contains_key(&item.id) {
                fwarn!(id = item.id, "ItemStore: duplicate provider id");
                debug_assert!(
                    !store.index.contains_key(&item.id),
                    "ItemStore: duplicate provider id {}",
                    item.id
                );
                continue;
            }
            store.index.insert(item.id, store.items.len());
            store.items.push(item);
        }
        fdebug!(len = store.items.len(), "ItemStore::from_provider");
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&slot| &self.items[slot])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// The provider's ranking order (the default working order).
    pub fn provider_order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Merges a server-confirmed counter value into the store.
    ///
    /// The merge is monotonic: a confirmation below the stored value keeps
    /// the stored value. A missing id is a no-op (`None`); the event may
    /// reference an item that was never mirrored.
    pub fn apply_confirmed(
        &mut self,
        id: ItemId,
        kind: EngagementKind,
        confirmed: u64,
    ) -> Option<&Item> {
        let &slot = self.index.get(&id)?;
        let item = &mut self.items[slot];
        let current = item.count(kind);
        let next = current.max(confirmed);
        if confirmed < current {
            fdebug!(id, ?kind, confirmed, current, "stale confirmation ignored");
        }
        match kind {
            EngagementKind::View => item.views = next,
            EngagementKind::Like => item.likes = next,
        }
        ftrace!(id, ?kind, count = next, "counter confirmed");
        Some(&self.items[slot])
    }
}
