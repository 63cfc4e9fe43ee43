//! Core reconciliation and layout engine for spots
//!
//! Spots maps a declarative JSON/struct description of UI sections
//! ("components") onto scrollable grid, list, and carousel surfaces. This
//! crate carries the engine: the component data model, the kind-to-view
//! registry, the layout algorithm, the state cache, and the spot
//! controllers that bridge a surface's data-source/delegate callbacks to
//! a component's item collection.
//!
//! # Core Concepts
//!
//! - **Component**: declarative description of one section (kind, title,
//!   items, meta overrides)
//! - **Spot**: controller owning one component and one bound surface
//! - **RegistryService**: kind-string to view-factory resolution, injected
//!   into every spot at construction
//! - **SpotLayout**: per-kind layout math (insets, item bounds, title and
//!   separator geometry, packing)
//! - **StateCache**: key-addressed persistence of a component
//!
//! # Basic Example
//!
//! ```ignore
//! use spots_core::prelude::*;
//!
//! let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
//! let registry = std::sync::Arc::new(RegistryService::new());
//!
//! let json = r#"{"components": [{"kind": "grid", "title": "Albums",
//!     "items": [{"title": "Blue Train"}]}]}"#;
//! let mut spots = parse_spots(json, &registry, &events_tx);
//!
//! for spot in &mut spots {
//!     spot.setup(SizeF::new(80.0, 24.0));
//! }
//!
//! // Later, on a selection event:
//! // SpotEvent::SelectionSettled { spot, index } => {
//! //     if let Some(item) = spots[spot].resolve_selection(index) { ... }
//! // }
//! ```
//!
//! # Error philosophy
//!
//! Every lookup used during rendering has a defined fallback: missing meta
//! keys resolve to defaults, unregistered kinds resolve to the family
//! default view, stale selection indices are dropped silently, and cache
//! misses yield an empty component. A render pass cannot fail.

pub mod cache;
pub mod carousel;
pub mod component;
pub mod composite;
pub mod factory;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod list;
pub mod meta;
pub mod registry;
pub mod scheduler;
pub mod spot;
pub mod surface;
pub mod testing;
pub mod view;

// Data model exports
pub use component::{Component, Item};
pub use geometry::{EdgeInsets, PointF, RectF, SizeF};
pub use meta::Meta;

// Registry exports
pub use registry::{ConfigureHook, RegistryService, SpotFamily};
pub use view::{FallbackView, ItemView, ViewFactory, ViewInstance};

// Layout exports
pub use layout::{
    measure_text, LayoutVariant, ResolvedLayout, SpotLayout, TitleGeometry, DEFAULT_MAX_ITEM,
    DEFAULT_MIN_ITEM, SEPARATOR_HEIGHT, TITLE_PADDING,
};

// Spot exports
pub use carousel::CarouselSpot;
pub use grid::GridSpot;
pub use list::ListSpot;
pub use spot::{
    ClickBehavior, DataSource, Spot, SpotEvent, SpotSender, SpotState, SurfaceDelegate,
    SELECTION_SETTLE_DELAY,
};

// Composite exports
pub use composite::{CompositeSpot, CompositeSpots};

// Persistence exports
pub use cache::StateCache;

// Parsing exports
pub use factory::{family_for_kind, make_spot, parse_document, parse_spots};

// Scheduling exports
pub use scheduler::Scheduler;

// Surface exports
pub use surface::{Surface, TermSurface};

// Re-export ratatui types for convenience
pub use ratatui::{layout::Rect, Frame};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::StateCache;
    pub use crate::carousel::CarouselSpot;
    pub use crate::component::{Component, Item};
    pub use crate::composite::{CompositeSpot, CompositeSpots};
    pub use crate::factory::{make_spot, parse_document, parse_spots};
    pub use crate::geometry::{EdgeInsets, PointF, RectF, SizeF};
    pub use crate::grid::GridSpot;
    pub use crate::layout::{LayoutVariant, ResolvedLayout, SpotLayout};
    pub use crate::list::ListSpot;
    pub use crate::meta::Meta;
    pub use crate::registry::{RegistryService, SpotFamily};
    pub use crate::spot::{
        ClickBehavior, DataSource, Spot, SpotEvent, SpotSender, SpotState, SurfaceDelegate,
    };
    pub use crate::surface::{Surface, TermSurface};
    pub use crate::view::{ItemView, ViewFactory, ViewInstance};

    // Re-export ratatui types
    pub use ratatui::{layout::Rect, Frame};
}
