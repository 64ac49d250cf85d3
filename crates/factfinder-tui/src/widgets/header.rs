//! Header bar with the panel title and keybinding hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

const KEY_HINTS: [(&str, &str); 5] = [
    ("↑↓", "Move"),
    ("Enter", "Use"),
    ("r", "Refresh"),
    ("o", "Folder"),
    ("q", "Quit"),
];

/// Title row showing the app name and the keys the panel understands
pub struct PanelHeader {
    show_hints: bool,
}

impl PanelHeader {
    pub fn new() -> Self {
        Self { show_hints: true }
    }

    /// Title only, for when no panel is mounted
    pub fn without_hints(mut self) -> Self {
        self.show_hints = false;
        self
    }
}

impl Default for PanelHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PanelHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(" FactFinder", styles::accent_bold())];
        if self.show_hints {
            spans.push(Span::raw("   "));
            for (key, label) in KEY_HINTS {
                spans.push(Span::styled(format!("[{key}]"), styles::keybinding()));
                spans.push(Span::styled(format!(" {label}  "), styles::text_secondary()));
            }
        }

        Line::from(spans).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_shows_title_and_hints() {
        let mut term = TestTerminal::new();
        let area = Rect::new(0, 0, 80, 3);
        term.render_widget(PanelHeader::new(), area);

        assert!(term.line_contains(1, "FactFinder"));
        assert!(term.line_contains(1, "[Enter] Use"));
        assert!(term.line_contains(1, "[q] Quit"));
    }

    #[test]
    fn test_header_without_hints() {
        let mut term = TestTerminal::new();
        term.render_widget(PanelHeader::new().without_hints(), Rect::new(0, 0, 80, 3));

        assert!(term.line_contains(1, "FactFinder"));
        assert!(!term.buffer_contains("[q]"));
    }
}
