//! Main render/view function (View in TEA pattern)


use factfinder_app::state::AppState;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::layout;
use crate::theme::{icons::IconSet, styles};
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure: reads the state and never mutates it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let areas = layout::create(area);
    let icons = IconSet::new(state.settings.ui.icons);

    let Some(panel) = state.panel.as_ref() else {
        frame.render_widget(widgets::PanelHeader::new().without_hints(), areas.header);
        render_unmounted(frame, area);
        return;
    };

    frame.render_widget(widgets::PanelHeader::new(), areas.header);

    frame.render_widget(
        widgets::StatusPanel::new(
            panel.emulator.current_state(),
            panel.split_tracker.current_state(),
            icons,
        ),
        areas.status,
    );

    frame.render_widget(
        widgets::ProviderSelector::new(&panel.providers, icons),
        areas.selector,
    );

    let show_updated_at = state.settings.ui.show_updated_at;
    frame.render_widget(
        widgets::SnapshotTable::new("State", &panel.state_rows, icons)
            .show_updated_at(show_updated_at),
        areas.state_table,
    );
    frame.render_widget(
        widgets::SnapshotTable::new("Watches", &panel.watches, icons)
            .show_updated_at(show_updated_at),
        areas.watches_table,
    );

    frame.render_widget(
        widgets::Footer::new(panel.fault(), &state.settings.bridge.url, icons),
        areas.footer,
    );
}

fn render_unmounted(frame: &mut Frame, area: Rect) {
    let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled("No panel mounted", styles::text_muted()))
            .alignment(Alignment::Center),
        middle,
    );
}
