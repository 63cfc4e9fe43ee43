//! Per-kind layout algorithm
//!
//! Given a component and an available container size, the engine produces
//! section insets, per-item frames, title/separator geometry, and the
//! total content height. All parameters come out of component meta through
//! defaulted lookups, so a layout pass can never fail: unknown variant
//! strings map to the flow default and missing keys resolve to the
//! documented constants.
//!
//! Units are abstract layout points; the packing is explicit here rather
//! than delegated to a host toolkit.

use crate::component::{Component, Item};
use crate::geometry::{EdgeInsets, RectF, SizeF};
use crate::meta::{keys, Meta};

/// Vertical padding reserved under a section title.
pub const TITLE_PADDING: f32 = 8.0;
/// Thickness of the title separator line.
pub const SEPARATOR_HEIGHT: f32 = 1.0;
/// Title font size when meta declares none.
pub const DEFAULT_TITLE_FONT_SIZE: f32 = 14.0;
/// Grid item bounds when meta declares none.
pub const DEFAULT_MIN_ITEM: SizeF = SizeF {
    width: 80.0,
    height: 80.0,
};
pub const DEFAULT_MAX_ITEM: SizeF = SizeF {
    width: 120.0,
    height: 120.0,
};

/// Approximate text measurement in layout points.
///
/// One line tall at the font size; width scales with the printable glyph
/// count at an average advance of 0.6em. Deterministic and toolkit-free;
/// hosts needing exact metrics substitute their own at render time.
pub fn measure_text(text: &str, font_size: f32) -> SizeF {
    let glyphs = text.chars().filter(|c| !c.is_control()).count();
    SizeF::new(glyphs as f32 * font_size * 0.6, font_size)
}

/// Layout variant resolved from `meta["layout"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutVariant {
    /// Uniform columns bounded by min/max item sizes.
    Grid,
    /// Flow packing with rows left-aligned instead of justified.
    Left,
    /// Flow packing with rows justified across the container width.
    #[default]
    Flow,
}

impl LayoutVariant {
    /// Resolve from a meta bag; unknown or missing strings map to `Flow`.
    pub fn from_meta(meta: &Meta) -> Self {
        match meta.str_or(keys::LAYOUT, "") {
            "grid" => LayoutVariant::Grid,
            "left" => LayoutVariant::Left,
            _ => LayoutVariant::Flow,
        }
    }
}

/// Title and separator geometry for a section header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleGeometry {
    pub frame: RectF,
    pub separator: RectF,
}

/// Fully computed geometry for one section.
#[derive(Debug, Clone, Default)]
pub struct ResolvedLayout {
    /// One frame per item, in item order.
    pub frames: Vec<RectF>,
    /// Present when the component carries a title.
    pub title: Option<TitleGeometry>,
    /// Total height of the section including insets.
    pub content_height: f32,
}

/// Layout parameters resolved from component meta.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLayout {
    pub variant: LayoutVariant,
    pub insets: EdgeInsets,
    pub min_item: SizeF,
    pub max_item: SizeF,
    pub item_spacing: f32,
    pub line_spacing: f32,
    pub title_left_margin: f32,
    pub title_font_size: f32,
}

impl Default for SpotLayout {
    fn default() -> Self {
        Self::from_meta(&Meta::new())
    }
}

impl SpotLayout {
    /// Resolve every parameter from meta, falling back to the documented
    /// defaults. Total: no key combination can fail.
    pub fn from_meta(meta: &Meta) -> Self {
        Self {
            variant: LayoutVariant::from_meta(meta),
            insets: EdgeInsets::new(
                meta.f32_or(keys::INSET_TOP, 0.0),
                meta.f32_or(keys::INSET_LEFT, 0.0),
                meta.f32_or(keys::INSET_BOTTOM, 0.0),
                meta.f32_or(keys::INSET_RIGHT, 0.0),
            ),
            min_item: SizeF::new(
                meta.f32_or(keys::MIN_ITEM_WIDTH, DEFAULT_MIN_ITEM.width),
                meta.f32_or(keys::MIN_ITEM_HEIGHT, DEFAULT_MIN_ITEM.height),
            ),
            max_item: SizeF::new(
                meta.f32_or(keys::MAX_ITEM_WIDTH, DEFAULT_MAX_ITEM.width),
                meta.f32_or(keys::MAX_ITEM_HEIGHT, DEFAULT_MAX_ITEM.height),
            ),
            item_spacing: meta.f32_or(keys::ITEM_SPACING, 0.0),
            line_spacing: meta.f32_or(keys::LINE_SPACING, 0.0),
            title_left_margin: meta.f32_or(keys::TITLE_LEFT_MARGIN, 0.0),
            title_font_size: meta.f32_or(keys::TITLE_FONT_SIZE, DEFAULT_TITLE_FONT_SIZE),
        }
    }

    /// Clamp an item size into the min/max bounds; unmeasured dimensions
    /// (zero) take the maximum so unconfigured items stay visible.
    pub fn clamp_item(&self, size: SizeF) -> SizeF {
        let width = if size.width <= 0.0 {
            self.max_item.width
        } else {
            size.width.clamp(self.min_item.width, self.max_item.width)
        };
        let height = if size.height <= 0.0 {
            self.max_item.height
        } else {
            size.height.clamp(self.min_item.height, self.max_item.height)
        };
        SizeF::new(width, height)
    }

    /// Measured height of the title line.
    pub fn title_height(&self, title: &str) -> f32 {
        measure_text(title, self.title_font_size).height
    }

    /// Extra top offset a title adds to a grid/flow section.
    pub fn title_offset(&self, title: &str) -> f32 {
        if title.is_empty() {
            0.0
        } else {
            self.title_height(title) + TITLE_PADDING
        }
    }

    /// Title frame + separator line geometry, or `None` without a title.
    ///
    /// The title sits at the left margin, pushed down by half its own
    /// height; the separator spans the container minus twice the left
    /// margin and sits `TITLE_PADDING` below the title's bottom edge.
    pub fn title_geometry(&self, title: &str, container_width: f32) -> Option<TitleGeometry> {
        if title.is_empty() {
            return None;
        }
        let measured = measure_text(title, self.title_font_size);
        let frame = RectF::new(
            self.title_left_margin,
            measured.height / 2.0,
            measured.width,
            measured.height,
        );
        let separator = RectF::new(
            self.title_left_margin,
            frame.max_y() + TITLE_PADDING,
            (container_width - 2.0 * self.title_left_margin).max(0.0),
            SEPARATOR_HEIGHT,
        );
        Some(TitleGeometry { frame, separator })
    }

    /// Compute the full section geometry for a grid/flow component.
    pub fn resolve(&self, component: &Component, container: SizeF) -> ResolvedLayout {
        let title = self.title_geometry(&component.title, container.width);
        let top = self.insets.top + self.title_offset(&component.title);
        let frames = match self.variant {
            LayoutVariant::Grid => self.pack_grid(&component.items, container.width, top),
            LayoutVariant::Left => self.pack_flow(&component.items, container.width, top, false),
            LayoutVariant::Flow => self.pack_flow(&component.items, container.width, top, true),
        };
        let content_height = self.total_height(&frames, container);
        ResolvedLayout {
            frames,
            title,
            content_height,
        }
    }

    /// Compute row geometry for a list component: full-width rows whose
    /// heights come from the measure step, clamped to a minimum of 1 so a
    /// degenerate zero-height row is never propagated to the surface.
    /// A title reserves twice its height on top (title + separator room).
    pub fn resolve_rows(&self, component: &Component, container: SizeF) -> ResolvedLayout {
        let title = self.title_geometry(&component.title, container.width);
        let mut top = self.insets.top;
        if component.has_title() {
            top += 2.0 * self.title_height(&component.title);
        }
        let width = (container.width - self.insets.horizontal()).max(0.0);
        let mut y = top;
        let mut frames = Vec::with_capacity(component.items.len());
        for item in &component.items {
            let height = Self::row_height(item);
            frames.push(RectF::new(self.insets.left, y, width, height));
            y += height;
        }
        let content_height = self.total_height(&frames, container);
        ResolvedLayout {
            frames,
            title,
            content_height,
        }
    }

    /// Per-row height for the list variant, clamped to at least 1.
    pub fn row_height(item: &Item) -> f32 {
        item.size.height.max(1.0)
    }

    fn total_height(&self, frames: &[RectF], container: SizeF) -> f32 {
        if frames.is_empty() {
            // Empty sections keep the container height instead of
            // collapsing to insets.
            return container.height;
        }
        let max_y = frames.iter().fold(0.0f32, |acc, f| acc.max(f.max_y()));
        max_y + self.insets.bottom
    }

    fn pack_grid(&self, items: &[Item], container_width: f32, top: f32) -> Vec<RectF> {
        let avail = (container_width - self.insets.horizontal()).max(0.0);
        let cell_max = self.max_item.width.max(1.0);
        let columns = (((avail + self.item_spacing) / (cell_max + self.item_spacing)).floor()
            as usize)
            .max(1);
        let gaps = self.item_spacing * (columns as f32 - 1.0);
        let cell_width = ((avail - gaps) / columns as f32)
            .clamp(self.min_item.width, self.max_item.width);

        let mut frames = Vec::with_capacity(items.len());
        let mut y = top;
        for row in items.chunks(columns) {
            let row_height = row
                .iter()
                .map(|item| self.clamp_item(item.size).height)
                .fold(0.0f32, f32::max);
            for (column, _) in row.iter().enumerate() {
                let x = self.insets.left + column as f32 * (cell_width + self.item_spacing);
                frames.push(RectF::new(x, y, cell_width, row_height));
            }
            y += row_height + self.line_spacing;
        }
        frames
    }

    fn pack_flow(
        &self,
        items: &[Item],
        container_width: f32,
        top: f32,
        justify: bool,
    ) -> Vec<RectF> {
        let right_edge = container_width - self.insets.right;
        let mut frames = Vec::with_capacity(items.len());
        let mut row_start = 0;
        let mut x = self.insets.left;
        let mut y = top;
        let mut row_height = 0.0f32;

        for item in items {
            let size = self.clamp_item(item.size);
            let wraps = x > self.insets.left && x + size.width > right_edge;
            if wraps {
                if justify {
                    Self::justify_row(&mut frames[row_start..], right_edge);
                }
                row_start = frames.len();
                x = self.insets.left;
                y += row_height + self.line_spacing;
                row_height = 0.0;
            }
            frames.push(RectF::new(x, y, size.width, size.height));
            x += size.width + self.item_spacing;
            row_height = row_height.max(size.height);
        }
        if justify {
            Self::justify_row(&mut frames[row_start..], right_edge);
        }
        frames
    }

    /// Distribute a row's leftover width evenly into the gaps between its
    /// items. Single-item rows stay put.
    fn justify_row(row: &mut [RectF], right_edge: f32) {
        if row.len() < 2 {
            return;
        }
        let leftover = right_edge - row.last().map(RectF::max_x).unwrap_or(0.0);
        if leftover <= 0.0 {
            return;
        }
        let gap = leftover / (row.len() as f32 - 1.0);
        for (position, frame) in row.iter_mut().enumerate() {
            frame.origin.x += gap * position as f32;
        }
    }
}
