//! Full-bleed banner view for carousel sections

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use spots_core::{Item, ItemView, SizeF, ViewFactory};

/// A page-sized banner: the title centered over the full constraint area.
#[derive(Debug, Default)]
pub struct BannerView;

impl BannerView {
    /// Factory entry for registries.
    pub fn factory() -> ViewFactory {
        ViewFactory::Class(|| Box::new(BannerView))
    }
}

impl ItemView for BannerView {
    fn measure(&self, item: &Item, constraints: SizeF) -> SizeF {
        if item.size.is_empty() {
            constraints
        } else {
            item.size
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, item: &Item) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title = Line::styled(
            item.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        );
        frame.render_widget(
            Paragraph::new(title).alignment(Alignment::Center),
            inner,
        );
    }
}
