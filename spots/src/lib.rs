//! spots: declarative sections for Rust TUI apps
//!
//! Describe your UI as JSON components (kind, title, items, meta) and
//! spots maps each one onto a scrollable grid, list, or carousel surface.
//! View resolution goes through an injected registry, so hosts decide how
//! each item kind draws without touching the layout engine.
//!
//! # Example
//! ```ignore
//! use spots::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(RegistryService::new());
//! let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let json = r#"{"components": [
//!     {"kind": "grid", "title": "Albums", "items": [{"title": "Blue Train"}]}
//! ]}"#;
//! let mut spots = parse_spots(json, &registry, &events_tx);
//! for spot in &mut spots {
//!     spot.setup(SizeF::new(80.0, 24.0));
//! }
//! ```

// Re-export everything from core
pub use spots_core::*;

/// Prelude for convenient imports
pub mod prelude {
    // Data model
    pub use spots_core::{Component, EdgeInsets, Item, Meta, PointF, RectF, SizeF};

    // Registry and views
    pub use spots_core::{
        FallbackView, ItemView, RegistryService, SpotFamily, ViewFactory, ViewInstance,
    };

    // Layout
    pub use spots_core::{LayoutVariant, ResolvedLayout, SpotLayout, TitleGeometry};

    // Spots
    pub use spots_core::{
        CarouselSpot, ClickBehavior, CompositeSpot, CompositeSpots, DataSource, GridSpot,
        ListSpot, Spot, SpotEvent, SpotSender, SpotState, SurfaceDelegate,
    };

    // Parsing and persistence
    pub use spots_core::{make_spot, parse_document, parse_spots, StateCache};

    // Surfaces
    pub use spots_core::{Surface, TermSurface};

    // Ratatui re-exports
    pub use spots_core::{Frame, Rect};
}
