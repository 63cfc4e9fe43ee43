//! Rendering-surface capability contract
//!
//! The platform widget behind a spot is opaque to the core: any toolkit
//! that can report a frame, hold a content size and scroll offset, accept
//! template registrations, and detach cleanly is substitutable. The spot
//! drives the surface; the surface never reaches back into the spot except
//! through the data-source/delegate traits in [`crate::spot`].

use std::collections::HashMap;

use crate::geometry::{RectF, SizeF};

/// Capability contract of the widget a spot renders into.
pub trait Surface {
    /// Ask the surface to refresh from its data source.
    fn reload(&mut self);

    /// Assign the surface's frame within its container.
    fn set_frame(&mut self, frame: RectF);

    /// Current frame.
    fn frame(&self) -> RectF;

    /// Assign the packed content size computed by the layout engine.
    fn set_content_size(&mut self, size: SizeF);

    /// Current content size.
    fn content_size(&self) -> SizeF;

    /// Current scroll offset into the content.
    fn content_offset(&self) -> f32;

    /// Scroll to an offset; clamped to the scrollable range.
    fn set_content_offset(&mut self, offset: f32);

    /// Register a template-backed kind with the surface's reuse pool.
    fn register_template(&mut self, kind: &str, template: &str);

    /// Clear data-source/delegate bindings ahead of teardown. After this
    /// call the surface must never invoke a callback again.
    fn detach(&mut self);

    /// Whether the surface still holds its bindings.
    fn is_attached(&self) -> bool;
}

/// Terminal-backed surface: a scroll viewport over packed content.
///
/// Holds the geometry state the spot pushes during layout; the actual
/// drawing happens in the spot's render pass against a ratatui frame.
#[derive(Debug, Default)]
pub struct TermSurface {
    frame: RectF,
    content_size: SizeF,
    offset: f32,
    templates: HashMap<String, String>,
    detached: bool,
}

impl TermSurface {
    /// Create a surface with zero geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered template name for a kind, if any.
    pub fn template(&self, kind: &str) -> Option<&str> {
        self.templates.get(kind).map(String::as_str)
    }

    /// Scrollable extent along whichever axis overflows the frame.
    fn max_offset(&self) -> f32 {
        let vertical = self.content_size.height - self.frame.height();
        let horizontal = self.content_size.width - self.frame.width();
        vertical.max(horizontal).max(0.0)
    }
}

impl Surface for TermSurface {
    fn reload(&mut self) {
        // Immediate-mode backend: the next render pass reads fresh state.
    }

    fn set_frame(&mut self, frame: RectF) {
        self.frame = frame;
        self.offset = self.offset.min(self.max_offset());
    }

    fn frame(&self) -> RectF {
        self.frame
    }

    fn set_content_size(&mut self, size: SizeF) {
        self.content_size = size;
        self.offset = self.offset.min(self.max_offset());
    }

    fn content_size(&self) -> SizeF {
        self.content_size
    }

    fn content_offset(&self) -> f32 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    fn register_template(&mut self, kind: &str, template: &str) {
        self.templates.insert(kind.to_string(), template.to_string());
    }

    fn detach(&mut self) {
        self.detached = true;
        self.templates.clear();
    }

    fn is_attached(&self) -> bool {
        !self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamps_to_scrollable_range() {
        let mut surface = TermSurface::new();
        surface.set_frame(RectF::new(0.0, 0.0, 80.0, 10.0));
        surface.set_content_size(SizeF::new(80.0, 25.0));

        surface.set_content_offset(100.0);
        assert_eq!(surface.content_offset(), 15.0);

        // Shrinking the content pulls the offset back in range.
        surface.set_content_size(SizeF::new(80.0, 12.0));
        assert_eq!(surface.content_offset(), 2.0);
    }

    #[test]
    fn test_detach() {
        let mut surface = TermSurface::new();
        surface.register_template("card", "card-template");
        assert!(surface.is_attached());
        assert_eq!(surface.template("card"), Some("card-template"));

        surface.detach();
        assert!(!surface.is_attached());
        assert_eq!(surface.template("card"), None);
    }
}
