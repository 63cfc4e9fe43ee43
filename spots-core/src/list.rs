//! List spot: full-width rows with measured heights
//!
//! Unlike the grid family, binding is deferred to the explicit `setup`
//! call. Row heights come from the measure step and are clamped to at
//! least one unit, so a degenerate row can never vanish from the surface.

use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::cache::StateCache;
use crate::component::{Component, Item};
use crate::geometry::SizeF;
use crate::layout::SpotLayout;
use crate::registry::{RegistryService, SpotFamily};
use crate::spot::{DataSource, Spot, SpotCore, SpotSender, SpotState, SurfaceDelegate};
use crate::surface::Surface;

/// Controller for list sections.
#[derive(Debug)]
pub struct ListSpot {
    core: SpotCore,
}

impl ListSpot {
    /// Create a list spot; the surface binds on the first `setup` call.
    pub fn new(component: Component, registry: Arc<RegistryService>, events: SpotSender) -> Self {
        let core = SpotCore::new(component, SpotFamily::List, registry, events);
        Self { core }
    }

    /// Restore state from (and persist to) a cache under `key`.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.core.restore_from_cache(key);
        self
    }

    /// Like [`Self::with_cache_key`] with an explicit cache.
    pub fn with_cache(mut self, cache: StateCache) -> Self {
        self.core.adopt_cache(cache);
        self
    }

    /// Layout parameters currently in effect.
    pub fn spot_layout(&self) -> &SpotLayout {
        &self.core.layout
    }
}

impl DataSource for ListSpot {
    fn count(&self) -> usize {
        self.core.component.len()
    }

    fn item_at(&mut self, index: usize) -> Option<&Item> {
        let width = self.core.surface.frame().width();
        let constraints = SizeF::new(
            (width - self.core.layout.insets.horizontal()).max(0.0),
            f32::MAX,
        );
        self.core.measure_item(index, constraints)?;
        self.core.component.item(index)
    }
}

impl SurfaceDelegate for ListSpot {
    fn did_select(&mut self, index: usize, clicks: u8) {
        self.core.select(index, clicks);
    }

    fn size_for_item(&mut self, index: usize) -> SizeF {
        let width = self.core.surface.frame().width();
        SizeF::new(width, self.height_for_row(index))
    }

    /// Row height on demand. As an observable side effect the surface's
    /// current size is recorded onto the component, keeping it current for
    /// consumers reading it out-of-band.
    fn height_for_row(&mut self, index: usize) -> f32 {
        self.core.component.size = Some(self.core.surface.frame().size);
        self.core
            .component
            .item(index)
            .map(SpotLayout::row_height)
            .unwrap_or(1.0)
    }
}

impl Spot for ListSpot {
    fn component(&self) -> &Component {
        &self.core.component
    }

    fn component_mut(&mut self) -> &mut Component {
        &mut self.core.component
    }

    fn family(&self) -> SpotFamily {
        SpotFamily::List
    }

    fn state(&self) -> SpotState {
        self.core.state()
    }

    fn spot_index(&self) -> usize {
        self.core.spot_index()
    }

    fn set_spot_index(&mut self, index: usize) {
        self.core.set_spot_index(index);
    }

    /// Bind the surface, then run the first layout pass.
    fn setup(&mut self, size: SizeF) {
        if self.core.state() == SpotState::Registered {
            self.core.bind();
        }
        self.layout(size);
    }

    fn layout(&mut self, size: SizeF) {
        self.core.measure_all(size);
        self.core.resolved = self.core.layout.resolve_rows(&self.core.component, size);
        self.core.push_geometry(size);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.core.render_resolved(frame, area);
    }

    fn resolve_selection(&self, index: usize) -> Option<&Item> {
        self.core.resolve_selection(index)
    }

    fn surface(&self) -> &dyn Surface {
        &self.core.surface
    }

    fn surface_mut(&mut self) -> &mut dyn Surface {
        &mut self.core.surface
    }

    fn save_state(&self) {
        self.core.save_state();
    }

    fn detach(&mut self) {
        self.core.detach();
    }

    fn append(&mut self, item: Item) {
        self.core.component.append(item);
        self.core.surface.reload();
    }

    fn insert(&mut self, index: usize, item: Item) {
        self.core.component.insert(index, item);
        self.core.surface.reload();
    }

    fn remove(&mut self, index: usize) -> Option<Item> {
        let removed = self.core.component.remove(index);
        self.core.surface.reload();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn list(n: usize) -> ListSpot {
        let (tx, _rx) = mpsc::unbounded_channel();
        let registry = Arc::new(RegistryService::new());
        let items = (0..n).map(|i| Item::new(format!("row {i}"))).collect();
        let component = Component::new("list").with_items(items);
        ListSpot::new(component, registry, tx)
    }

    #[test]
    fn test_binding_deferred_to_setup() {
        let mut spot = list(1);
        assert_eq!(spot.state(), SpotState::Registered);

        spot.setup(SizeF::new(80.0, 24.0));
        assert_eq!(spot.state(), SpotState::LaidOut);
    }

    #[test]
    fn test_height_for_row_records_component_size() {
        let mut spot = list(2);
        spot.setup(SizeF::new(80.0, 24.0));

        let height = spot.height_for_row(0);
        assert!(height >= 1.0);
        let recorded = spot.component().size.unwrap();
        assert_eq!(recorded.width, 80.0);
    }

    #[test]
    fn test_height_for_unknown_row_defaults() {
        let mut spot = list(1);
        spot.setup(SizeF::new(80.0, 24.0));
        assert_eq!(spot.height_for_row(42), 1.0);
    }

    #[test]
    fn test_remove_renumbers() {
        let mut spot = list(3);
        let removed = spot.remove(0).unwrap();
        assert_eq!(removed.title, "row 0");
        assert_eq!(spot.component().items[0].index, 0);
        assert_eq!(spot.component().items[1].index, 1);
    }

    #[test]
    fn test_layout_total_height_includes_rows() {
        let mut spot = list(3);
        spot.setup(SizeF::new(80.0, 24.0));
        // Three measured one-line rows.
        assert_eq!(spot.core.resolved.content_height, 3.0);
    }
}
