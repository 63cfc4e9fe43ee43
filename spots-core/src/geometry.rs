//! Float geometry primitives for the layout engine
//!
//! Layout math runs in `f32` units so the engine stays independent of any
//! particular surface's integer cell grid. Conversion to `ratatui::layout::Rect`
//! happens at render time.

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    /// The zero size.
    pub const ZERO: SizeF = SizeF {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An x/y pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    /// The origin point.
    pub const ZERO: PointF = PointF { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An origin + size rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub origin: PointF,
    pub size: SizeF,
}

impl RectF {
    /// The zero rectangle.
    pub const ZERO: RectF = RectF {
        origin: PointF::ZERO,
        size: SizeF::ZERO,
    };

    /// Create a rectangle from components.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: PointF::new(x, y),
            size: SizeF::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// The y coordinate of the bottom edge.
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// The x coordinate of the right edge.
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }
}

/// Per-edge insets applied around a section's content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    /// Insets with all edges zero.
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create insets from individual edges.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Combined left + right inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top + bottom inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_empty() {
        assert!(SizeF::ZERO.is_empty());
        assert!(SizeF::new(0.0, 10.0).is_empty());
        assert!(!SizeF::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rect_edges() {
        let rect = RectF::new(2.0, 3.0, 10.0, 20.0);
        assert_eq!(rect.max_x(), 12.0);
        assert_eq!(rect.max_y(), 23.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal(), 6.0);
        assert_eq!(insets.vertical(), 4.0);
    }
}
