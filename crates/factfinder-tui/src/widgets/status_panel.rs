//! Link status rows for the emulator and the split tracker

use factfinder_core::ConnectionState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, styles};

/// Width the link name column is padded to
const NAME_WIDTH: usize = 14;

/// Two status rows: colored indicator, link name and the backend's message
pub struct StatusPanel<'a> {
    emulator: &'a ConnectionState,
    split_tracker: &'a ConnectionState,
    icons: IconSet,
}

impl<'a> StatusPanel<'a> {
    pub fn new(
        emulator: &'a ConnectionState,
        split_tracker: &'a ConnectionState,
        icons: IconSet,
    ) -> Self {
        Self {
            emulator,
            split_tracker,
            icons,
        }
    }

    fn row(&self, name: &str, state: &'a ConnectionState) -> Line<'a> {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(self.icons.dot(), styles::status_indicator(state.status)),
            Span::raw(" "),
            Span::styled(format!("{name:<NAME_WIDTH$}"), styles::text_secondary()),
            Span::styled(state.message.as_str(), styles::text_primary()),
        ])
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Connections ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = [
            self.row("Emulator", self.emulator),
            self.row("Split Tracker", self.split_tracker),
        ];
        for (i, line) in rows.into_iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            line.render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
