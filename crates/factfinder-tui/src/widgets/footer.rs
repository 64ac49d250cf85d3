//! One-line footer: the latest decode fault, or the bridge address

use factfinder_app::panel::Fault;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, styles};

pub struct Footer<'a> {
    fault: Option<&'a Fault>,
    bridge_url: &'a str,
    icons: IconSet,
}

impl<'a> Footer<'a> {
    pub fn new(fault: Option<&'a Fault>, bridge_url: &'a str, icons: IconSet) -> Self {
        Self {
            fault,
            bridge_url,
            icons,
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.fault {
            Some(fault) => Line::from(vec![
                Span::styled(format!(" {} ", self.icons.alert()), styles::error_text()),
                Span::styled(
                    format!("Bad '{}' event: {}", fault.channel.name(), fault.reason),
                    styles::error_text(),
                ),
            ]),
            None => Line::from(vec![
                Span::styled(" bridge ", styles::text_muted()),
                Span::styled(self.bridge_url, styles::text_secondary()),
            ]),
        };
        line.render(area, buf);
    }
}
