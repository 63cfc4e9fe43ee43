//! Index of spots nested inside another spot's items
//!
//! Composite layouts embed whole spots inside a single item. Each entry is
//! addressed by `(owner spot index, item index)`; the full entry set for
//! one address is every spot embedded in that item. Because the address
//! borrows the item's position, the index must be purged *before* the item
//! is removed from its component; purging after removal would leave
//! entries pointing at renumbered items.

use crate::component::Item;
use crate::spot::Spot;

/// One nested spot and the address of the item that hosts it.
pub struct CompositeSpot {
    pub owner_index: usize,
    pub item_index: usize,
    pub spot: Box<dyn Spot>,
}

impl std::fmt::Debug for CompositeSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeSpot")
            .field("owner_index", &self.owner_index)
            .field("item_index", &self.item_index)
            .field("kind", &self.spot.component().kind)
            .finish()
    }
}

/// Collection of nested-spot entries for a composite host.
#[derive(Debug, Default)]
pub struct CompositeSpots {
    entries: Vec<CompositeSpot>,
}

impl CompositeSpots {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries exist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Track a spot nested inside `(owner_index, item_index)`.
    pub fn add(&mut self, owner_index: usize, item_index: usize, spot: Box<dyn Spot>) {
        self.entries.push(CompositeSpot {
            owner_index,
            item_index,
            spot,
        });
    }

    /// All nested spots for an address, in insertion order.
    pub fn resolve(&self, owner_index: usize, item_index: usize) -> Vec<&dyn Spot> {
        self.entries
            .iter()
            .filter(|entry| entry.owner_index == owner_index && entry.item_index == item_index)
            .map(|entry| entry.spot.as_ref())
            .collect()
    }

    /// Mutable access to the nested spots for an address.
    pub fn resolve_mut(&mut self, owner_index: usize, item_index: usize) -> Vec<&mut Box<dyn Spot>> {
        self.entries
            .iter_mut()
            .filter(|entry| entry.owner_index == owner_index && entry.item_index == item_index)
            .map(|entry| &mut entry.spot)
            .collect()
    }

    /// Remove every entry for the item's current address and detach the
    /// nested spots' surfaces. Call this before removing the item from its
    /// component. Idempotent: a second call for the same item is a no-op.
    pub fn purge(&mut self, owner_index: usize, item: &Item) {
        self.entries.retain_mut(|entry| {
            if entry.owner_index == owner_index && entry.item_index == item.index {
                entry.spot.detach();
                false
            } else {
                true
            }
        });
    }
}
