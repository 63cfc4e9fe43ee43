//! Pre-built item views for spots
//!
//! Ready-made [`ItemView`] implementations covering the common section
//! styles: a bordered card for grids, a title/subtitle row for lists, and
//! a full-bleed banner for carousels. Each ships a factory suitable for
//! registry registration.
//!
//! ```ignore
//! use spots_core::{RegistryService, SpotFamily};
//! use spots_views::{CardView, RowView};
//!
//! let registry = RegistryService::new();
//! registry.register(SpotFamily::Grid, "card", CardView::factory());
//! registry.register(SpotFamily::List, "row", RowView::factory());
//! ```

pub mod banner;
pub mod card;
pub mod row;

pub use banner::BannerView;
pub use card::CardView;
pub use row::RowView;

pub use spots_core::{ItemView, ViewFactory};
