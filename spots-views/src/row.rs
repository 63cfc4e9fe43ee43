//! Title/subtitle row view for list sections

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use spots_core::{Item, ItemView, SizeF, ViewFactory};

/// A one- or two-line list row: bold title, dimmed subtitle underneath.
#[derive(Debug, Default)]
pub struct RowView;

impl RowView {
    /// Factory entry for registries.
    pub fn factory() -> ViewFactory {
        ViewFactory::Class(|| Box::new(RowView))
    }
}

impl ItemView for RowView {
    fn measure(&self, item: &Item, constraints: SizeF) -> SizeF {
        let height = if item.subtitle.is_empty() { 1.0 } else { 2.0 };
        SizeF::new(constraints.width.max(1.0), height)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, item: &Item) {
        let mut lines = vec![Line::from(Span::styled(
            item.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if !item.subtitle.is_empty() {
            lines.push(Line::from(Span::styled(
                item.subtitle.clone(),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spots_core::testing::RenderHarness;

    #[test]
    fn test_measure_height_follows_subtitle() {
        let view = RowView;
        let plain = Item::new("a");
        assert_eq!(view.measure(&plain, SizeF::new(40.0, 10.0)).height, 1.0);

        let detailed = Item::new("a").with_subtitle("b");
        assert_eq!(view.measure(&detailed, SizeF::new(40.0, 10.0)).height, 2.0);
    }

    #[test]
    fn test_render_two_lines() {
        let mut harness = RenderHarness::new(20, 2);
        let mut view = RowView;
        let item = Item::new("So What").with_subtitle("Miles Davis");

        let output = harness.render_to_string_plain(|frame| {
            view.render(frame, frame.area(), &item);
        });

        assert!(output.contains("So What"));
        assert!(output.contains("Miles Davis"));
    }
}
