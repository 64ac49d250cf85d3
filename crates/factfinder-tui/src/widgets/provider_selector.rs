//! Fact provider selector
//!
//! Shows the chosen provider (or a placeholder), the fetch status, and the
//! provider list with the cursor row highlighted.

use factfinder_app::panel::{FetchStatus, ProviderList};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{icons::IconSet, styles};

/// Shown while no provider has been chosen
pub const PLACEHOLDER: &str = "Select a Fact Provider";

pub struct ProviderSelector<'a> {
    list: &'a ProviderList,
    icons: IconSet,
}

impl<'a> ProviderSelector<'a> {
    pub fn new(list: &'a ProviderList, icons: IconSet) -> Self {
        Self { list, icons }
    }

    fn chosen_line(&self) -> Line<'a> {
        match self.list.chosen() {
            Some(provider) => Line::from(vec![
                Span::styled(format!(" {} ", self.icons.check()), styles::accent()),
                Span::styled(provider.name.as_str(), styles::accent_bold()),
            ]),
            None => Line::from(Span::styled(format!(" {PLACEHOLDER}"), styles::text_muted())),
        }
    }

    /// Fetch status text; empty when there is nothing to report.
    fn status_lines(&self) -> Vec<Line<'a>> {
        match self.list.status() {
            FetchStatus::NotRequested => Vec::new(),
            FetchStatus::Loading => vec![Line::from(Span::styled(
                format!("{} Loading providers...", self.icons.refresh()),
                styles::text_muted(),
            ))],
            FetchStatus::Loaded if self.list.providers().is_empty() => vec![Line::from(
                Span::styled("No providers found", styles::text_muted()),
            )],
            FetchStatus::Loaded => Vec::new(),
            FetchStatus::Unavailable(reason) => vec![
                Line::from(Span::styled(
                    format!("{} {reason}", self.icons.alert()),
                    styles::error_text(),
                )),
                Line::from(vec![
                    Span::styled("[r]", styles::keybinding()),
                    Span::styled(" Retry", styles::text_secondary()),
                ]),
            ],
        }
    }

    /// Render the status below the chosen line, wrapped to the selector
    /// width. Returns the rows used.
    fn render_status(&self, area: Rect, buf: &mut Buffer) -> u16 {
        let lines = self.status_lines();
        if lines.is_empty() {
            // Keep the list at a fixed offset when there is no status
            return area.height.min(1);
        }

        let text_area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), area.height);
        let status = Paragraph::new(lines).wrap(Wrap { trim: true });
        let height = (status.line_count(text_area.width) as u16).min(area.height);
        status.render(Rect { height, ..text_area }, buf);
        height
    }
}

/// First list index to draw so the cursor stays on screen
fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        cursor + 1 - visible
    }
}

impl Widget for ProviderSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Fact Provider ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut y = inner.y;
        self.chosen_line()
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
        y += 1;

        let rest = Rect::new(inner.x, y, inner.width, inner.bottom() - y);
        y += self.render_status(rest, buf);

        let visible = (inner.bottom() - y) as usize;
        let cursor = self.list.cursor();
        let offset = scroll_offset(cursor, visible);

        for (index, provider) in self
            .list
            .providers()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
        {
            let row = Rect::new(inner.x, y, inner.width, 1);
            let line = if index == cursor {
                Line::from(format!(" {} {}", self.icons.pointer(), provider.name))
                    .style(styles::focused_selected())
            } else {
                Line::from(format!("   {}", provider.name)).style(styles::text_primary())
            };
            line.render(row, buf);
            y += 1;
        }
    }
}
