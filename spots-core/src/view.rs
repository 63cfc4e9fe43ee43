//! Item view capability and factory dispatch
//!
//! A kind string resolves to a [`ViewFactory`] through the registry. The
//! `Class` variant constructs a boxed [`ItemView`] directly; the `Template`
//! variant names a template registered with the surface's own reuse
//! mechanism, so the core never instantiates it.
//!
//! Measurement is a pure function of the item and the constraints; the
//! view never writes back into the data model. The owning spot records the
//! measured size onto its own item.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::component::Item;
use crate::geometry::SizeF;

/// Capability contract for a renderable item view.
pub trait ItemView {
    /// Compute the size the item wants within `constraints`.
    ///
    /// Must be total: any item, including one with no computed size, yields
    /// a usable size.
    fn measure(&self, item: &Item, constraints: SizeF) -> SizeF;

    /// Draw the item into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, item: &Item);
}

/// Constructor for class-backed views.
pub type ViewConstructor = fn() -> Box<dyn ItemView>;

/// How a registered kind produces its view.
#[derive(Clone)]
pub enum ViewFactory {
    /// Construct the view in-process.
    Class(ViewConstructor),
    /// Defer to the surface's template registration under this name.
    Template(String),
}

impl std::fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewFactory::Class(_) => f.write_str("ViewFactory::Class(..)"),
            ViewFactory::Template(name) => write!(f, "ViewFactory::Template({name:?})"),
        }
    }
}

/// Result of instantiating a factory for one item.
pub enum ViewInstance {
    /// A live view the spot can measure and render.
    View(Box<dyn ItemView>),
    /// The kind is template-backed; the surface's registration applies.
    Template(String),
}

impl ViewFactory {
    /// Instantiate the factory.
    pub fn make(&self) -> ViewInstance {
        match self {
            ViewFactory::Class(constructor) => ViewInstance::View(constructor()),
            ViewFactory::Template(name) => ViewInstance::Template(name.clone()),
        }
    }
}

/// Fallback view used when a kind resolves to nothing.
///
/// Renders the item title on a single line; measures one line tall at the
/// full constraint width. Keeps unregistered kinds visible instead of
/// failing the render pass.
#[derive(Debug, Default)]
pub struct FallbackView;

impl FallbackView {
    /// Factory entry for registries.
    pub fn factory() -> ViewFactory {
        ViewFactory::Class(|| Box::new(FallbackView))
    }
}

impl ItemView for FallbackView {
    fn measure(&self, item: &Item, constraints: SizeF) -> SizeF {
        if !item.size.is_empty() {
            return item.size;
        }
        SizeF::new(constraints.width, 1.0)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, item: &Item) {
        let line = Line::styled(item.title.clone(), Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(Paragraph::new(line), area);
    }
}
