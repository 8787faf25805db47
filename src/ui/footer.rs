//! Footer row: copyright with the year stamped once at startup, social
//! links, and the key help line.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::page::FooterBlock;
use crate::theme::Theme;

/// The copyright text. The year is whatever the app captured at startup;
/// nothing re-stamps it while the program runs.
pub fn copyright_text(footer: &FooterBlock, year: i32) -> String {
    if footer.show_year {
        format!("© {} {}", year, footer.text)
    } else {
        format!("© {}", footer.text)
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    footer: Option<&FooterBlock>,
    year: i32,
    help: &str,
) {
    let style = theme.get_component_style("footer", false);
    let mut spans = Vec::new();

    if let Some(footer) = footer {
        spans.push(Span::raw(" "));
        spans.push(Span::raw(copyright_text(footer, year)));
        for (label, _) in &footer.socials {
            spans.push(Span::raw("  ·  "));
            spans.push(Span::raw(label.clone()));
        }
    }

    let left = Line::from(spans);
    let left_width = left.width() as u16;
    frame.render_widget(Paragraph::new(left).style(style), area);

    // Help on the right, if there is room after the footer text.
    let help_width = help.chars().count() as u16;
    if area.width > left_width + help_width + 2 {
        let help_area = Rect {
            x: area.x + area.width - help_width - 1,
            y: area.y,
            width: help_width,
            height: 1,
        };
        let help_line = Paragraph::new(Line::from(Span::styled(
            help.to_string(),
            theme.get_component_style("help_line", false),
        )))
        .style(style);
        frame.render_widget(help_line, help_area);
    }
}
