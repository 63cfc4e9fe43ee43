//! Carousel spot: a single horizontally scrolling row
//!
//! Packs every item onto one row and scrolls along x instead of y. The
//! surface's content offset is interpreted horizontally; everything else
//! (registry resolution, selection, caching) matches the grid family.

use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::cache::StateCache;
use crate::component::{Component, Item};
use crate::geometry::{RectF, SizeF};
use crate::registry::{RegistryService, SpotFamily};
use crate::spot::{cell_rect, DataSource, Spot, SpotCore, SpotSender, SpotState, SurfaceDelegate};
use crate::surface::Surface;

/// Controller for carousel sections.
#[derive(Debug)]
pub struct CarouselSpot {
    core: SpotCore,
    /// Total width of the packed row, for paging.
    row_width: f32,
}

impl CarouselSpot {
    /// Create a carousel spot; the surface binds immediately.
    pub fn new(component: Component, registry: Arc<RegistryService>, events: SpotSender) -> Self {
        let mut core = SpotCore::new(component, SpotFamily::Carousel, registry, events);
        core.bind();
        Self {
            core,
            row_width: 0.0,
        }
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

    /// Scroll one page (the container width) forward or back.
    pub fn scroll_pages(&mut self, pages: i32) {
        let page = self.core.surface.frame().width();
        let current = self.core.surface.content_offset();
        let max = (self.row_width - page).max(0.0);
        let next = (current + pages as f32 * page).clamp(0.0, max);
        self.core.surface.set_content_offset(next);
    }

    /// Pack all items onto one row.
    fn pack_row(&mut self, container: SizeF) {
        let layout = &self.core.layout;
        let top = layout.insets.top + layout.title_offset(&self.core.component.title);
        let mut x = layout.insets.left;
        let mut row_height = 0.0f32;
        let mut frames = Vec::with_capacity(self.core.component.len());
        for item in &self.core.component.items {
            let size = layout.clamp_item(item.size);
            frames.push(RectF::new(x, top, size.width, size.height));
            x += size.width + layout.item_spacing;
            row_height = row_height.max(size.height);
        }
        self.row_width = if frames.is_empty() {
            layout.insets.horizontal()
        } else {
            x - layout.item_spacing + layout.insets.right
        };

        let title = layout.title_geometry(&self.core.component.title, container.width);
        let content_height = if frames.is_empty() {
            container.height
        } else {
            top + row_height + layout.insets.bottom
        };
        self.core.resolved = crate::layout::ResolvedLayout {
            frames,
            title,
            content_height,
        };
    }
}

impl DataSource for CarouselSpot {
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

impl SurfaceDelegate for CarouselSpot {
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

impl Spot for CarouselSpot {
    fn component(&self) -> &Component {
        &self.core.component
    }

    fn component_mut(&mut self) -> &mut Component {
        &mut self.core.component
    }

    fn family(&self) -> SpotFamily {
        SpotFamily::Carousel
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
        self.pack_row(size);
        self.core.push_geometry(size);
        // Content extends horizontally; republish the packed row width so
        // paging has the full scrollable extent.
        let content = SizeF::new(
            self.row_width.max(size.width),
            self.core.resolved.content_height,
        );
        self.core.surface.set_content_size(content);
    }

    /// Draw the row, applying the offset horizontally.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let offset = self.core.surface.content_offset();
        let resolved = self.core.resolved.clone();

        if let Some(title) = resolved.title {
            if let Some(rect) = cell_rect(title.frame, area, 0.0) {
                frame.render_widget(
                    ratatui::widgets::Paragraph::new(self.core.component.title.clone()),
                    rect,
                );
            }
        }
        for (index, item_frame) in resolved.frames.iter().enumerate() {
            let mut shifted = *item_frame;
            shifted.origin.x -= offset;
            let Some(rect) = cell_rect(shifted, area, 0.0) else {
                continue;
            };
            let Some(item) = self.core.component.item(index).cloned() else {
                continue;
            };
            self.core.make_view(&item).render(frame, rect, &item);
        }
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

    fn carousel(n: usize, item_size: SizeF) -> CarouselSpot {
        let (tx, _rx) = mpsc::unbounded_channel();
        let registry = Arc::new(RegistryService::new());
        let items = (0..n)
            .map(|i| Item::new(format!("page {i}")).with_size(item_size))
            .collect();
        let component = Component::new("carousel").with_items(items);
        CarouselSpot::new(component, registry, tx)
    }

    #[test]
    fn test_single_row_packing() {
        let mut spot = carousel(3, SizeF::new(100.0, 90.0));
        spot.layout(SizeF::new(120.0, 100.0));

        let frames = &spot.core.resolved.frames;
        assert_eq!(frames.len(), 3);
        // All frames share one row.
        assert!(frames.iter().all(|f| f.y() == frames[0].y()));
        assert!(frames[1].x() > frames[0].x());
    }

    #[test]
    fn test_page_scrolling_clamps() {
        let mut spot = carousel(3, SizeF::new(100.0, 90.0));
        spot.layout(SizeF::new(100.0, 100.0));

        spot.scroll_pages(1);
        assert_eq!(spot.surface().content_offset(), 100.0);
        spot.scroll_pages(10);
        assert_eq!(spot.surface().content_offset(), 200.0);
        spot.scroll_pages(-10);
        assert_eq!(spot.surface().content_offset(), 0.0);
    }

    #[test]
    fn test_empty_keeps_container_height() {
        let mut spot = carousel(0, SizeF::ZERO);
        spot.layout(SizeF::new(100.0, 42.0));
        assert_eq!(spot.core.resolved.content_height, 42.0);
    }
}
