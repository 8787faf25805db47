//! The back-to-top control, overlaid bottom-right once the page has been
//! scrolled far enough.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const LABEL: &str = " ↑ top (t) ";

pub fn render(frame: &mut Frame, viewport: Rect, theme: &Theme) {
    let width = LABEL.chars().count() as u16;
    if viewport.width < width + 2 || viewport.height < 2 {
        return;
    }
    let area = Rect {
        x: viewport.x + viewport.width - width - 1,
        y: viewport.y + viewport.height - 2,
        width,
        height: 1,
    };

    frame.render_widget(Clear, area);
    let button = Paragraph::new(Line::from(Span::styled(
        LABEL,
        theme.get_component_style("scroll_top", false),
    )));
    frame.render_widget(button, area);
}
