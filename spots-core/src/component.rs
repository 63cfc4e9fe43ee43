//! Declarative description of one UI section and its items
//!
//! A [`Component`] is the unit the parser produces and a spot controller
//! owns. Its `items` vector is the single source of truth for the bound
//! surface's data-source callbacks, so item indices must always equal the
//! item's position in the vector. Every mutation here renumbers to keep
//! that invariant.

use serde::{Deserialize, Serialize};

use crate::geometry::SizeF;
use crate::meta::Meta;

/// One row/cell's data payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image: String,
    /// View-type hint; empty falls back to the owning component's kind.
    #[serde(default)]
    pub kind: String,
    /// Opaque navigation token handed back on selection.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub meta: Meta,
    /// Computed by the measure step, not by the document.
    #[serde(default)]
    pub size: SizeF,
    /// Position within the owning component; maintained by the component.
    #[serde(default)]
    pub index: usize,
}

impl Item {
    /// Create an item with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder-style kind assignment.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Builder-style subtitle assignment.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Builder-style action assignment.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Builder-style size assignment.
    pub fn with_size(mut self, size: SizeF) -> Self {
        self.size = size;
        self
    }
}

/// Declarative description of one renderable section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Selects the spot family and the item view type. Empty falls back to
    /// a per-family default.
    #[serde(default)]
    pub kind: String,
    /// Optional header text; presence toggles title + separator geometry.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub meta: Meta,
    /// Relative width weight when components share a row.
    #[serde(default)]
    pub span: f32,
    /// Last computed rendering size; written by the layout engine.
    #[serde(skip)]
    pub size: Option<SizeF>,
}

impl Component {
    /// Create a component of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Builder-style title assignment.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style meta assignment.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Builder-style item list assignment. Indices are renumbered.
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self.renumber(0);
        self
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the item list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a title is present.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Bounds-checked item access.
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Bounds-checked mutable item access.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Append an item, assigning its index.
    pub fn append(&mut self, mut item: Item) {
        item.index = self.items.len();
        self.items.push(item);
    }

    /// Insert an item at `index` (clamped to the current length) and
    /// renumber everything after it.
    pub fn insert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.renumber(index);
    }

    /// Remove the item at `index`, renumbering subsequent items. Out of
    /// range indices are a silent no-op.
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.renumber(index);
        Some(removed)
    }

    /// Reassign indices starting at `from`. Called after deserialization
    /// too, since documents and cache files may carry stale indices.
    pub fn renumber(&mut self, from: usize) {
        for (position, item) in self.items.iter_mut().enumerate().skip(from) {
            item.index = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::new(format!("item {i}"))).collect()
    }

    #[test]
    fn test_append_assigns_index() {
        let mut component = Component::new("list");
        for item in items(3) {
            component.append(item);
        }

        for (position, item) in component.items.iter().enumerate() {
            assert_eq!(item.index, position);
        }
    }

    #[test]
    fn test_insert_renumbers_tail() {
        let mut component = Component::new("list").with_items(items(3));
        component.insert(1, Item::new("inserted"));

        assert_eq!(component.items[1].title, "inserted");
        for (position, item) in component.items.iter().enumerate() {
            assert_eq!(item.index, position);
        }
    }

    #[test]
    fn test_remove_renumbers_tail() {
        let mut component = Component::new("list").with_items(items(4));
        let removed = component.remove(1).unwrap();

        assert_eq!(removed.title, "item 1");
        assert_eq!(component.len(), 3);
        for (position, item) in component.items.iter().enumerate() {
            assert_eq!(item.index, position);
        }
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut component = Component::new("list").with_items(items(2));
        assert!(component.remove(5).is_none());
        assert_eq!(component.len(), 2);
    }

    #[test]
    fn test_insert_past_end_clamps() {
        let mut component = Component::new("list").with_items(items(1));
        component.insert(99, Item::new("tail"));

        assert_eq!(component.items[1].title, "tail");
        assert_eq!(component.items[1].index, 1);
    }

    #[test]
    fn test_deserialization_tolerates_unknown_keys() {
        let json = r#"{"kind":"grid","title":"t","items":[],"rogue":true}"#;
        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.kind, "grid");
        assert_eq!(component.title, "t");
    }
}
