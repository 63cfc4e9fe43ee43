//! Bordered card view for grid sections

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use spots_core::{Item, ItemView, SizeF, ViewFactory};

/// Default card footprint in layout units.
const DEFAULT_SIZE: SizeF = SizeF {
    width: 24.0,
    height: 8.0,
};

/// A bordered card showing an image glyph, title, and subtitle.
///
/// Measures to the item's own size when one is set, otherwise to its
/// default footprint clamped into the constraints.
#[derive(Debug, Default)]
pub struct CardView;

impl CardView {
    /// Factory entry for registries.
    pub fn factory() -> ViewFactory {
        ViewFactory::Class(|| Box::new(CardView))
    }
}

impl ItemView for CardView {
    fn measure(&self, item: &Item, constraints: SizeF) -> SizeF {
        let wanted = if item.size.is_empty() {
            DEFAULT_SIZE
        } else {
            item.size
        };
        SizeF::new(
            wanted.width.min(constraints.width.max(1.0)),
            wanted.height.min(constraints.height.max(1.0)),
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, item: &Item) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        if !item.image.is_empty() {
            lines.push(Line::raw(item.image.clone()));
        }
        lines.push(Line::styled(
            item.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        if !item.subtitle.is_empty() {
            lines.push(Line::styled(
                item.subtitle.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
