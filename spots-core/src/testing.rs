//! Test utilities for spots-based code
//!
//! Helpers for exercising spots without a live terminal:
//!
//! - builders for components and items,
//! - process-unique temp roots for cache tests,
//! - [`RenderHarness`]: render into a ratatui `TestBackend` buffer and
//!   inspect it as plain text,
//! - a channel pair for capturing [`SpotEvent`]s.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::component::{Component, Item};
use crate::registry::RegistryService;
use crate::spot::{SpotEvent, SpotSender};

static NEXT_ROOT: AtomicUsize = AtomicUsize::new(0);

/// A process-unique directory path for cache tests. The directory is not
/// created; `StateCache::save` creates it on demand.
pub fn temp_cache_root() -> PathBuf {
    let unique = NEXT_ROOT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("spots-test-{}-{unique}", std::process::id()))
}

/// A component with `n` items titled `item 0..n`.
pub fn component_with_items(kind: &str, n: usize) -> Component {
    Component::new(kind).with_items((0..n).map(|i| Item::new(format!("item {i}"))).collect())
}

/// A fresh registry plus an event channel, the wiring every spot needs.
pub fn spot_wiring() -> (
    Arc<RegistryService>,
    SpotSender,
    mpsc::UnboundedReceiver<SpotEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(RegistryService::new()), tx, rx)
}

/// Render buffer contents as plain text, one row per line, styling
/// stripped.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Render harness over a ratatui `TestBackend` terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the test backend cannot be initialized; suitable for
    /// tests only.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("failed to create test terminal");
        Self { terminal }
    }

    /// Run one draw pass and return the buffer as plain text.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        self.terminal.draw(draw).expect("draw failed");
        buffer_to_string_plain(self.terminal.backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_temp_roots_are_unique() {
        assert_ne!(temp_cache_root(), temp_cache_root());
    }

    #[test]
    fn test_component_builder() {
        let component = component_with_items("grid", 3);
        assert_eq!(component.kind, "grid");
        assert_eq!(component.len(), 3);
        assert_eq!(component.items[2].index, 2);
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut harness = RenderHarness::new(10, 2);
        let output = harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert!(output.contains("hello"));
    }
}
