//! Key/value table for one snapshot stream
//!
//! Rows are drawn positionally in the order the backend sent them, so
//! duplicate keys each get their own row.

use chrono::{DateTime, Local};
use factfinder_app::panel::SnapshotModel;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

use crate::theme::{icons::IconSet, styles};

pub struct SnapshotTable<'a> {
    title: &'a str,
    model: &'a SnapshotModel,
    show_updated_at: bool,
    icons: IconSet,
}

impl<'a> SnapshotTable<'a> {
    pub fn new(title: &'a str, model: &'a SnapshotModel, icons: IconSet) -> Self {
        Self {
            title,
            model,
            show_updated_at: false,
            icons,
        }
    }

    /// Show when the last snapshot arrived in the table border
    pub fn show_updated_at(mut self, show: bool) -> Self {
        self.show_updated_at = show;
        self
    }

    fn updated_title(&self, at: DateTime<Local>) -> Line<'static> {
        Line::from(Span::styled(
            format!(" {} {} ", self.icons.clock(), at.format("%H:%M:%S")),
            styles::text_muted(),
        ))
        .right_aligned()
    }
}

impl Widget for SnapshotTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = styles::glass_block(false).title(Line::from(Span::styled(
            format!(" {} ", self.title),
            styles::text_primary(),
        )));
        if self.show_updated_at {
            if let Some(at) = self.model.last_updated() {
                block = block.title(self.updated_title(at));
            }
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = self.model.current_rows();
        if rows.is_empty() {
            Paragraph::new(Span::styled(" Waiting for data...", styles::text_muted()))
                .render(inner, buf);
            return;
        }

        let table_rows = rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(row.key.as_str(), styles::text_secondary())),
                Cell::from(Span::styled(row.value.as_str(), styles::text_primary())),
            ])
        });

        Table::new(
            table_rows,
            [Constraint::Percentage(50), Constraint::Percentage(50)],
        )
        .column_spacing(1)
        .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use factfinder_core::Snapshot;

    fn render(model: &SnapshotModel, show_updated_at: bool) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(
            SnapshotTable::new("State", model, IconSet::default()).show_updated_at(show_updated_at),
            Rect::new(0, 0, 50, 8),
        );
        term
    }

    #[test]
    fn test_empty_table_shows_waiting() {
        let term = render(&SnapshotModel::new(), true);
        assert!(term.line_contains(0, "State"));
        assert!(term.buffer_contains("Waiting for data"));
    }

    #[test]
    fn test_rows_render_in_arrival_order() {
        let mut model = SnapshotModel::new();
        model.apply_snapshot_event(Snapshot::from_pairs([
            ("HP", "80"),
            ("MP", "50"),
            ("Level", "5"),
        ]));
        let term = render(&model, false);

        assert!(term.line_contains(1, "HP"));
        assert!(term.line_contains(1, "80"));
        assert!(term.line_contains(2, "MP"));
        assert!(term.line_contains(3, "Level"));
        assert!(!term.buffer_contains("Waiting for data"));
    }

    #[test]
    fn test_duplicate_keys_get_their_own_rows() {
        let mut model = SnapshotModel::new();
        model.apply_snapshot_event(Snapshot::from_pairs([("Deaths", "1"), ("Deaths", "2")]));
        let term = render(&model, false);

        assert!(term.line_contains(1, "Deaths"));
        assert!(term.line_contains(1, "1"));
        assert!(term.line_contains(2, "Deaths"));
        assert!(term.line_contains(2, "2"));
    }

    #[test]
    fn test_updated_at_only_when_enabled() {
        let mut model = SnapshotModel::new();
        model.apply_snapshot_event(Snapshot::from_pairs([("HP", "1")]));
        let stamp = model
            .last_updated()
            .expect("timestamp set")
            .format("%H:%M:%S")
            .to_string();

        let shown = render(&model, true);
        assert!(shown.line_contains(0, &stamp));

        let hidden = render(&model, false);
        assert!(!hidden.line_contains(0, &stamp));
    }
}
