//! Grid spot: bounded-cell packing of one component
//!
//! Binds its surface at construction; every `layout` call re-measures the
//! item collection and re-resolves the grid/flow geometry from component
//! meta.

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

/// Controller for grid/flow sections.
#[derive(Debug)]
pub struct GridSpot {
    core: SpotCore,
}

impl GridSpot {
    /// Create a grid spot; the surface binds immediately.
    pub fn new(component: Component, registry: Arc<RegistryService>, events: SpotSender) -> Self {
        let mut core = SpotCore::new(component, SpotFamily::Grid, registry, events);
        core.bind();
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

impl DataSource for GridSpot {
    fn count(&self) -> usize {
        self.core.component.len()
    }

    fn item_at(&mut self, index: usize) -> Option<&Item> {
        let constraints = SizeF::new(
            self.core.layout.max_item.width,
            self.core.layout.max_item.height,
        );
        self.core.measure_item(index, constraints)?;
        self.core.component.item(index)
    }
}

impl SurfaceDelegate for GridSpot {
    fn did_select(&mut self, index: usize, clicks: u8) {
        self.core.select(index, clicks);
    }

    fn size_for_item(&mut self, index: usize) -> SizeF {
        let constraints = SizeF::new(
            self.core.layout.max_item.width,
            self.core.layout.max_item.height,
        );
        let measured = self
            .core
            .measure_item(index, constraints)
            .unwrap_or(SizeF::ZERO);
        self.core.layout.clamp_item(measured)
    }

    fn height_for_row(&mut self, index: usize) -> f32 {
        self.size_for_item(index).height
    }
}

impl Spot for GridSpot {
    fn component(&self) -> &Component {
        &self.core.component
    }

    fn component_mut(&mut self) -> &mut Component {
        &mut self.core.component
    }

    fn family(&self) -> SpotFamily {
        SpotFamily::Grid
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

    fn setup(&mut self, size: SizeF) {
        self.layout(size);
    }

    fn layout(&mut self, size: SizeF) {
        self.core.measure_all(size);
        self.core.resolved = self.core.layout.resolve(&self.core.component, size);
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
