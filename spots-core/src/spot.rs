//! Spot controllers: one component, one bound surface
//!
//! A spot owns its component exclusively and bridges the surface's
//! data-source/delegate callbacks to the component's item collection. The
//! lifecycle is a straight line: `Created` when the component is assigned,
//! `Registered` once the default view type is in the registry, `Bound`
//! when the surface hooks attach, then `LaidOut` on every geometry pass,
//! and finally `Detached` with all callbacks cleared.
//!
//! Selection is deferred by [`SELECTION_SETTLE_DELAY`] through the
//! scheduler; by the time the host resolves the event the index may be
//! stale, so resolution bounds-checks and drops silently.

use std::sync::Arc;
use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::cache::StateCache;
use crate::component::{Component, Item};
use crate::geometry::{RectF, SizeF};
use crate::layout::{ResolvedLayout, SpotLayout};
use crate::meta::{keys, Meta};
use crate::registry::{RegistryService, SpotFamily};
use crate::scheduler::Scheduler;
use crate::surface::{Surface, TermSurface};
use crate::view::{FallbackView, ItemView, ViewInstance};

/// Delay between a selection event firing and the item lookup, giving the
/// surface time to settle its own index bookkeeping.
pub const SELECTION_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Scheduler key for the pending selection deferral.
const SELECT_KEY: &str = "select";

/// Lifecycle states of a spot controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotState {
    Created,
    Registered,
    Bound,
    LaidOut,
    Detached,
}

/// Three-state click semantics parsed from `meta["double-click"]`.
///
/// `true` maps to `Double`, `false` to `Single`, absence to `Inherit`
/// (which resolves to single-click). Both click paths consult the same
/// parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickBehavior {
    Single,
    Double,
    #[default]
    Inherit,
}

impl ClickBehavior {
    /// Parse from a meta bag.
    pub fn from_meta(meta: &Meta) -> Self {
        match meta.flag(keys::DOUBLE_CLICK) {
            Some(true) => ClickBehavior::Double,
            Some(false) => ClickBehavior::Single,
            None => ClickBehavior::Inherit,
        }
    }

    /// Whether a click with the given count triggers selection.
    pub fn accepts(&self, clicks: u8) -> bool {
        match self {
            ClickBehavior::Double => clicks >= 2,
            ClickBehavior::Single | ClickBehavior::Inherit => clicks >= 1,
        }
    }
}

/// Events a spot sends back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotEvent {
    /// A deferred selection settled; the host should resolve the index
    /// against the spot (it may have gone stale in the meantime).
    SelectionSettled { spot: usize, index: usize },
}

/// Channel spots deliver events over.
pub type SpotSender = mpsc::UnboundedSender<SpotEvent>;

/// Data-source side of the surface contract: item count and configured
/// item access.
pub trait DataSource {
    /// Current item count.
    fn count(&self) -> usize;

    /// Item at `index`, measured through its registry view first. This is
    /// the point where item geometry becomes known.
    fn item_at(&mut self, index: usize) -> Option<&Item>;
}

/// Delegate side of the surface contract.
pub trait SurfaceDelegate {
    /// A selection event arrived from the surface.
    fn did_select(&mut self, index: usize, clicks: u8);

    /// Size for the item at `index` (grid/flow surfaces).
    fn size_for_item(&mut self, index: usize) -> SizeF;

    /// Row height at `index` (list surfaces).
    fn height_for_row(&mut self, index: usize) -> f32;
}

/// The controller contract every spot family implements.
pub trait Spot: DataSource + SurfaceDelegate {
    fn component(&self) -> &Component;
    fn component_mut(&mut self) -> &mut Component;
    fn family(&self) -> SpotFamily;
    fn state(&self) -> SpotState;

    /// Position of this spot within its host's spot list.
    fn spot_index(&self) -> usize;
    fn set_spot_index(&mut self, index: usize);

    /// First layout pass; binds the surface where binding is deferred to
    /// setup (list spots).
    fn setup(&mut self, size: SizeF);

    /// Recompute all geometry for a new container size.
    fn layout(&mut self, size: SizeF);

    /// Draw into a terminal frame.
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Resolve a settled selection; stale indices yield `None`.
    fn resolve_selection(&self, index: usize) -> Option<&Item>;

    fn surface(&self) -> &dyn Surface;
    fn surface_mut(&mut self) -> &mut dyn Surface;

    /// Persist the component if this spot carries a cache.
    fn save_state(&self);

    /// Clear bindings and cancel pending deferrals ahead of teardown.
    fn detach(&mut self);

    fn append(&mut self, item: Item);
    fn insert(&mut self, index: usize, item: Item);
    fn remove(&mut self, index: usize) -> Option<Item>;
}

/// State shared by every spot family.
pub struct SpotCore {
    pub component: Component,
    pub family: SpotFamily,
    pub registry: Arc<RegistryService>,
    pub surface: TermSurface,
    pub layout: SpotLayout,
    pub resolved: ResolvedLayout,
    cache: Option<StateCache>,
    scheduler: Scheduler<SpotEvent>,
    click: ClickBehavior,
    state: SpotState,
    spot_index: usize,
}

impl std::fmt::Debug for SpotCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotCore")
            .field("kind", &self.component.kind)
            .field("family", &self.family)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SpotCore {
    /// Create the shared core: assign the component, resolve layout from
    /// its meta, and register the family default view for its kind if the
    /// registry has no entry yet.
    pub fn new(
        mut component: Component,
        family: SpotFamily,
        registry: Arc<RegistryService>,
        events: SpotSender,
    ) -> Self {
        if component.kind.is_empty() {
            component.kind = registry.default_kind(family);
        }
        component.renumber(0);

        let layout = SpotLayout::from_meta(&component.meta);
        let click = ClickBehavior::from_meta(&component.meta);
        let mut core = Self {
            component,
            family,
            registry,
            surface: TermSurface::new(),
            layout,
            resolved: ResolvedLayout::default(),
            cache: None,
            scheduler: Scheduler::new(events),
            click,
            state: SpotState::Created,

            spot_index: 0,
        };
        core.register();
        core
    }

    /// Attach a state cache; a previously saved component under this key
    /// replaces the assigned one.
    pub fn restore_from_cache(&mut self, key: impl Into<String>) {
        let cache = StateCache::new(key);
        self.adopt_cache(cache);
    }

    /// Like [`Self::restore_from_cache`] but with an explicit cache.
    pub fn adopt_cache(&mut self, cache: StateCache) {
        if cache.exists() {
            let cached = cache.load();
            if !cached.kind.is_empty() || !cached.is_empty() {
                self.component = cached;
                self.layout = SpotLayout::from_meta(&self.component.meta);
                self.click = ClickBehavior::from_meta(&self.component.meta);
            }
        }
        self.cache = Some(cache);
    }

    /// The cache, if one was attached.
    pub fn cache(&self) -> Option<&StateCache> {
        self.cache.as_ref()
    }

    /// Persist the component through the attached cache; no-op without one.
    pub fn save_state(&self) {
        if let Some(cache) = &self.cache {
            cache.save(&self.component);
        }
    }

    pub fn state(&self) -> SpotState {
        self.state
    }

    pub fn spot_index(&self) -> usize {
        self.spot_index
    }

    pub fn set_spot_index(&mut self, index: usize) {
        self.spot_index = index;
    }

    /// Register the family default view under this component's kind when
    /// the registry has no exact entry, making previously registered views
    /// visible to the surface's reuse mechanism.
    fn register(&mut self) {
        if !self.registry.is_registered(self.family, &self.component.kind) {
            let default = self.registry.view_or_default(self.family, "");
            self.registry
                .register(self.family, self.component.kind.clone(), default);
        }
        self.state = SpotState::Registered;
    }

    /// Attach surface bindings. Template-backed kinds are handed to the
    /// surface's own registration mechanism here.
    pub fn bind(&mut self) {
        let kinds: Vec<String> = std::iter::once(self.component.kind.clone())
            .chain(self.component.items.iter().map(|item| item.kind.clone()))
            .filter(|kind| !kind.is_empty())
            .collect();
        for kind in kinds {
            if let ViewInstance::Template(template) = self.registry.make_view(self.family, &kind)
            {
                self.surface.register_template(&kind, &template);
            }
        }
        self.state = SpotState::Bound;
    }

    /// Mark a completed layout pass.
    pub fn mark_laid_out(&mut self) {
        self.state = SpotState::LaidOut;
    }

    /// Effective view kind for an item: its own, or the component's.
    pub fn item_kind<'a>(&'a self, item: &'a Item) -> &'a str {
        if item.kind.is_empty() {
            &self.component.kind
        } else {
            &item.kind
        }
    }

    /// Instantiate the view for an item. Template-backed kinds render
    /// through the fallback view in-process; the surface's registered
    /// template applies on toolkit-native surfaces.
    pub fn make_view(&self, item: &Item) -> Box<dyn ItemView> {
        match self.registry.make_view(self.family, self.item_kind(item)) {
            ViewInstance::View(view) => view,
            ViewInstance::Template(_) => Box::new(FallbackView),
        }
    }

    /// Measure one item through its view and write the size back onto the
    /// owned item. Items with no measured size fall back to the registry's
    /// default size for their kind before the view runs.
    pub fn measure_item(&mut self, index: usize, constraints: SizeF) -> Option<SizeF> {
        let item = self.component.items.get(index)?;
        if item.size.is_empty() {
            let fallback = self.registry.default_size(self.item_kind(item));
            if !fallback.is_empty() {
                if let Some(item) = self.component.items.get_mut(index) {
                    item.size = fallback;
                }
            }
        }
        let item = self.component.items.get(index)?;
        let measured = self.make_view(item).measure(item, constraints);
        if let Some(item) = self.component.items.get_mut(index) {
            item.size = measured;
        }
        Some(measured)
    }

    /// Measure the whole item collection against a container size.
    pub fn measure_all(&mut self, container: SizeF) {
        let constraints = SizeF::new(
            (container.width - self.layout.insets.horizontal()).max(0.0),
            self.layout.max_item.height,
        );
        for index in 0..self.component.items.len() {
            self.measure_item(index, constraints);
        }
    }

    /// Handle a selection from the surface: gate on click behavior, then
    /// defer delivery by the settle delay. Out-of-range indices are
    /// dropped immediately; in-range ones may still be stale by the time
    /// they settle, which resolution handles.
    pub fn select(&mut self, index: usize, clicks: u8) {
        if !self.click.accepts(clicks) {
            return;
        }
        if index >= self.component.items.len() {
            return;
        }
        let event = SpotEvent::SelectionSettled {
            spot: self.spot_index,
            index,
        };
        self.scheduler.defer(SELECT_KEY, SELECTION_SETTLE_DELAY, event);
    }

    /// Bounds-checked resolution of a settled selection.
    pub fn resolve_selection(&self, index: usize) -> Option<&Item> {
        self.component.item(index)
    }

    /// Cancel pending deferrals and clear surface bindings.
    pub fn detach(&mut self) {
        self.scheduler.cancel_all();
        self.surface.detach();
        self.state = SpotState::Detached;
    }

    /// Push computed geometry to the surface, record it on the component,
    /// and run the global configure hook.
    pub fn push_geometry(&mut self, container: SizeF) {
        self.surface
            .set_frame(RectF::new(0.0, 0.0, container.width, container.height));
        self.surface
            .set_content_size(SizeF::new(container.width, self.resolved.content_height));
        self.component.size = Some(SizeF::new(container.width, self.resolved.content_height));
        self.registry.run_configure(&mut self.surface);
        self.mark_laid_out();
    }

    /// Draw the resolved layout: title, separator, then each visible item
    /// through its view.
    pub fn render_resolved(&mut self, frame: &mut Frame, area: Rect) {
        let offset = self.surface.content_offset();

        if let Some(title) = self.resolved.title {
            if let Some(rect) = cell_rect(title.frame, area, offset) {
                let line = Line::styled(
                    self.component.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                );
                frame.render_widget(Paragraph::new(line), rect);
            }
            if let Some(rect) = cell_rect(title.separator, area, offset) {
                let rule = "─".repeat(rect.width as usize);
                frame.render_widget(Paragraph::new(rule), rect);
            }
        }

        let frames = self.resolved.frames.clone();
        for (index, item_frame) in frames.iter().enumerate() {
            let Some(rect) = cell_rect(*item_frame, area, offset) else {
                continue;
            };
            let Some(item) = self.component.item(index) else {
                continue;
            };
            let item = item.clone();
            self.make_view(&item).render(frame, rect, &item);
        }
    }
}

/// Map a layout frame into terminal cells within `area`, applying the
/// scroll offset and clipping. Frames fully outside the area yield `None`.
pub(crate) fn cell_rect(frame: RectF, area: Rect, offset: f32) -> Option<Rect> {
    let x = frame.x().round();
    let y = (frame.y() - offset).round();
    let width = frame.width().round().max(0.0) as i32;
    let height = frame.height().round().max(0.0) as i32;
    if width == 0 || height == 0 {
        return None;
    }

    let left = (area.x as i32 + x as i32).max(area.x as i32);
    let top = (area.y as i32 + y as i32).max(area.y as i32);
    let right = (area.x as i32 + x as i32 + width).min(area.x as i32 + area.width as i32);
    let bottom = (area.y as i32 + y as i32 + height).min(area.y as i32 + area.height as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Item;

    fn core_with_items(n: usize) -> (SpotCore, mpsc::UnboundedReceiver<SpotEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registry = Arc::new(RegistryService::new());
        let items = (0..n).map(|i| Item::new(format!("item {i}"))).collect();
        let component = Component::new("list").with_items(items);
        (
            SpotCore::new(component, SpotFamily::List, registry, tx),
            rx,
        )
    }

    #[test]
    fn test_click_behavior_parsing() {
        let mut meta = Meta::new();
        assert_eq!(ClickBehavior::from_meta(&meta), ClickBehavior::Inherit);

        meta.set(keys::DOUBLE_CLICK, true);
        assert_eq!(ClickBehavior::from_meta(&meta), ClickBehavior::Double);

        meta.set(keys::DOUBLE_CLICK, false);
        assert_eq!(ClickBehavior::from_meta(&meta), ClickBehavior::Single);
    }

    #[test]
    fn test_click_behavior_accepts() {
        assert!(ClickBehavior::Single.accepts(1));
        assert!(ClickBehavior::Inherit.accepts(1));
        assert!(!ClickBehavior::Double.accepts(1));
        assert!(ClickBehavior::Double.accepts(2));
    }

    #[test]
    fn test_new_registers_kind() {
        let (core, _rx) = core_with_items(0);
        assert_eq!(core.state(), SpotState::Registered);
        assert!(core.registry.is_registered(SpotFamily::List, "list"));
    }

    #[test]
    fn test_empty_kind_takes_family_default() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let registry = Arc::new(RegistryService::new());
        let core = SpotCore::new(Component::default(), SpotFamily::Grid, registry, tx);
        assert_eq!(core.component.kind, "grid");
    }

    #[test]
    fn test_resolve_selection_bounds_checks() {
        let (core, _rx) = core_with_items(2);
        assert!(core.resolve_selection(1).is_some());
        assert!(core.resolve_selection(2).is_none());
    }

    #[tokio::test]
    async fn test_selection_defers_then_delivers() {
        let (mut core, mut rx) = core_with_items(3);
        core.set_spot_index(4);
        core.select(1, 1);

        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(event, SpotEvent::SelectionSettled { spot: 4, index: 1 });
    }

    #[tokio::test]
    async fn test_out_of_range_selection_never_delivers() {
        let (mut core, mut rx) = core_with_items(2);
        core.select(7, 1);

        let result =
            tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_double_click_gate() {
        let (mut core, mut rx) = core_with_items(2);
        core.component.meta.set(keys::DOUBLE_CLICK, true);
        core.click = ClickBehavior::from_meta(&core.component.meta.clone());

        core.select(0, 1);
        let result = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(result.is_err());

        core.select(0, 2);
        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(matches!(event, SpotEvent::SelectionSettled { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_detach_cancels_pending_selection() {
        let (mut core, mut rx) = core_with_items(2);
        core.select(0, 1);
        core.detach();
        assert_eq!(core.state(), SpotState::Detached);

        let result = tokio::time::timeout(Duration::from_millis(250), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[test]
    fn test_measure_writes_back_item_size() {
        let (mut core, _rx) = core_with_items(2);
        core.measure_all(SizeF::new(80.0, 24.0));
        // The fallback view measures one line at the constraint width.
        assert_eq!(core.component.items[0].size, SizeF::new(80.0, 1.0));
    }

    #[test]
    fn test_measure_uses_registry_default_size() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let registry = Arc::new(RegistryService::new());
        registry.register_default_size("card", SizeF::new(24.0, 8.0));
        let component = Component::new("grid")
            .with_items(vec![Item::new("a").with_kind("card")]);
        let mut core = SpotCore::new(component, SpotFamily::Grid, registry, tx);

        core.measure_all(SizeF::new(100.0, 40.0));
        // Fallback view keeps a pre-set size, so the registry default
        // survives the measure pass.
        assert_eq!(core.component.items[0].size, SizeF::new(24.0, 8.0));
    }

    #[test]
    fn test_cell_rect_clips_and_offsets() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 10,
        };
        // Fully below the viewport.
        assert!(cell_rect(RectF::new(0.0, 20.0, 10.0, 2.0), area, 0.0).is_none());
        // Scrolled into view.
        let rect = cell_rect(RectF::new(0.0, 20.0, 10.0, 2.0), area, 15.0).unwrap();
        assert_eq!(rect.y, 5);
        assert_eq!(rect.height, 2);
        // Degenerate frames vanish.
        assert!(cell_rect(RectF::new(0.0, 0.0, 0.0, 5.0), area, 0.0).is_none());
    }
}
