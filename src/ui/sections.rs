//! The scrolled page viewport.
//!
//! Walks the measured row plan from the current scroll offset and turns
//! each visible `PageRow` into a styled line. Geometry comes entirely from
//! the layout; this module decides only how a row looks, which for cards
//! depends on how far their reveal has come.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{hero, RenderContext};
use crate::images::LazyState;
use crate::page::PageRow;
use crate::theme::Theme;

/// Left page margin, in columns.
const PAGE_MARGIN: usize = 2;

/// Widest frame an image gets, borders included.
const IMAGE_FRAME_WIDTH: usize = 44;

pub fn render_viewport(frame: &mut Frame, area: Rect, theme: &Theme, ctx: &RenderContext) {
    let top_row = ctx.scroll.top_row();
    let height = area.height as usize;
    let width = area.width as usize;

    let lines: Vec<Line> = ctx
        .layout
        .rows()
        .iter()
        .skip(top_row)
        .take(height)
        .map(|row| build_row(row, theme, ctx, width))
        .collect();

    let body = Paragraph::new(lines).style(theme.get_component_style("body", false));
    frame.render_widget(body, area);
}

fn build_row(row: &PageRow, theme: &Theme, ctx: &RenderContext, width: usize) -> Line<'static> {
    let hero_block = ctx.page.hero.as_ref();
    match row {
        PageRow::Blank => Line::default(),
        PageRow::HeroGreeting => hero_block
            .map(|h| hero::greeting_line(h, theme))
            .unwrap_or_default(),
        PageRow::HeroName => hero_block
            .map(|h| hero::name_line(h, theme))
            .unwrap_or_default(),
        PageRow::HeroTagline => hero_block
            .map(|h| hero::tagline_line(h, theme))
            .unwrap_or_default(),
        PageRow::HeroTyped => hero_block
            .map(|h| hero::typed_line(h, ctx.typed, theme))
            .unwrap_or_default(),
        PageRow::SectionTitle(si) => section_title_row(ctx, *si, theme),
        PageRow::SectionRule(si) => section_rule_row(ctx, *si, theme),
        PageRow::BodyLine(_, text) => Line::from(vec![
            Span::raw(" ".repeat(PAGE_MARGIN)),
            Span::styled(text.clone(), theme.get_component_style("body", false)),
        ]),
        PageRow::CardTop(si, ci) => card_row(ctx, *si, *ci, theme, width, CardPart::Top),
        PageRow::CardLine(si, ci, li) => {
            card_row(ctx, *si, *ci, theme, width, CardPart::Line(*li))
        }
        PageRow::CardBottom(si, ci) => card_row(ctx, *si, *ci, theme, width, CardPart::Bottom),
        PageRow::ImageTop(si, ii) => image_row(ctx, *si, *ii, theme, width, ImagePart::Top),
        PageRow::ImageRow(si, ii, r) => {
            image_row(ctx, *si, *ii, theme, width, ImagePart::Interior(*r))
        }
        PageRow::ImageBottom(si, ii) => image_row(ctx, *si, *ii, theme, width, ImagePart::Bottom),
        PageRow::ContactHint => Line::from(vec![
            Span::raw(" ".repeat(PAGE_MARGIN)),
            Span::styled("Press ", theme.get_component_style("help_line", false)),
            Span::styled("c", theme.get_component_style("hero_typed", false)),
            Span::styled(
                " to open the contact form",
                theme.get_component_style("help_line", false),
            ),
        ]),
    }
}

fn section_title_row(ctx: &RenderContext, si: usize, theme: &Theme) -> Line<'static> {
    let Some(section) = ctx.page.sections.get(si) else {
        return Line::default();
    };
    Line::from(vec![
        Span::raw(" ".repeat(PAGE_MARGIN)),
        Span::styled(
            section.title.clone(),
            theme.get_component_style("section_title", false),
        ),
    ])
}

fn section_rule_row(ctx: &RenderContext, si: usize, theme: &Theme) -> Line<'static> {
    let Some(section) = ctx.page.sections.get(si) else {
        return Line::default();
    };
    Line::from(vec![
        Span::raw(" ".repeat(PAGE_MARGIN)),
        Span::styled(
            "─".repeat(section.title.chars().count().max(4)),
            theme.get_component_style("card_border", false),
        ),
    ])
}

enum CardPart {
    Top,
    Line(usize),
    Bottom,
}

fn card_row(
    ctx: &RenderContext,
    si: usize,
    ci: usize,
    theme: &Theme,
    width: usize,
    part: CardPart,
) -> Line<'static> {
    let Some(card) = ctx.page.sections.get(si).and_then(|s| s.cards.get(ci)) else {
        return Line::default();
    };

    let card_width = width.saturating_sub(2 * PAGE_MARGIN).max(10);
    let hidden = ctx.reveals.is_hidden(&card.key);
    let border = if hidden {
        theme.get_component_style("card_hidden", false)
    } else {
        theme.get_component_style("card_border", false)
    };

    match part {
        CardPart::Top => {
            let title = if hidden { None } else { Some(card.title.as_str()) };
            framed_top(
                title,
                card_width,
                border,
                theme.get_component_style("card_title", false),
            )
        }
        CardPart::Line(li) => {
            // Lines come back from the top as the reveal progresses, which
            // reads as the card sliding up into place.
            let progress = ctx.reveals.progress(&card.key, ctx.now);
            let shown = !hidden && (li as f32) < progress * card.lines.len() as f32;
            let text = if shown { card.lines.get(li).cloned() } else { None };
            framed_interior(
                text,
                card_width,
                border,
                theme.get_component_style("body", false),
                false,
            )
        }
        CardPart::Bottom => framed_bottom(card_width, border),
    }
}

enum ImagePart {
    Top,
    Interior(usize),
    Bottom,
}

fn image_row(
    ctx: &RenderContext,
    si: usize,
    ii: usize,
    theme: &Theme,
    width: usize,
    part: ImagePart,
) -> Line<'static> {
    let Some(image) = ctx.page.sections.get(si).and_then(|s| s.images.get(ii)) else {
        return Line::default();
    };

    let frame_width = width
        .saturating_sub(2 * PAGE_MARGIN)
        .max(10)
        .min(IMAGE_FRAME_WIDTH);
    let border = theme.get_component_style("image_frame", false);
    let caption = theme.get_component_style("help_line", false);

    match part {
        ImagePart::Top => framed_top(
            Some(&image.alt),
            frame_width,
            border,
            theme.get_component_style("card_title", false),
        ),
        ImagePart::Interior(r) => {
            // Graphics payloads are written over the frame after drawing;
            // the interior stays blank in that case.
            let label = if r == 1 {
                interior_label(ctx, &image.key, &image.alt)
            } else {
                None
            };
            framed_interior(label, frame_width, border, caption, true)
        }
        ImagePart::Bottom => framed_bottom(frame_width, border),
    }
}

/// What to print inside an image frame, `None` for blank rows.
fn interior_label(ctx: &RenderContext, key: &str, alt: &str) -> Option<String> {
    let Some(loader) = ctx.images else {
        return Some(alt.to_string());
    };
    let Some(image) = loader.get(key) else {
        return Some(alt.to_string());
    };
    match image.state() {
        LazyState::Loaded(_) => None,
        LazyState::Failed => Some("image unavailable".to_string()),
        LazyState::Pending if image.source().is_some() => Some("loading…".to_string()),
        LazyState::Pending => Some(alt.to_string()),
    }
}

/// `┌─ title ────┐`, or a plain run when there is no title.
fn framed_top(
    title: Option<&str>,
    width: usize,
    border: Style,
    title_style: Style,
) -> Line<'static> {
    let inner = width.saturating_sub(2);
    let mut spans = vec![Span::raw(" ".repeat(PAGE_MARGIN))];
    match title {
        Some(title) if !title.is_empty() => {
            let title: String = title.chars().take(inner.saturating_sub(4)).collect();
            let used = 2 + title.chars().count() + 1;
            spans.push(Span::styled("┌─ ".to_string(), border));
            spans.push(Span::styled(title, title_style));
            spans.push(Span::styled(
                format!(" {}┐", "─".repeat(inner.saturating_sub(used))),
                border,
            ));
        }
        _ => {
            spans.push(Span::styled(format!("┌{}┐", "─".repeat(inner)), border));
        }
    }
    Line::from(spans)
}

/// `│ text │` padded to the frame width, optionally centered.
fn framed_interior(
    text: Option<String>,
    width: usize,
    border: Style,
    text_style: Style,
    centered: bool,
) -> Line<'static> {
    let inner = width.saturating_sub(2);
    let content_width = inner.saturating_sub(2);
    let text: String = text
        .unwrap_or_default()
        .chars()
        .take(content_width)
        .collect();
    let pad = content_width - text.chars().count();
    let (left, right) = if centered {
        (pad / 2, pad - pad / 2)
    } else {
        (0, pad)
    };

    Line::from(vec![
        Span::raw(" ".repeat(PAGE_MARGIN)),
        Span::styled("│ ".to_string(), border),
        Span::raw(" ".repeat(left)),
        Span::styled(text, text_style),
        Span::raw(" ".repeat(right)),
        Span::styled(" │".to_string(), border),
    ])
}

fn framed_bottom(width: usize, border: Style) -> Line<'static> {
    let inner = width.saturating_sub(2);
    Line::from(vec![
        Span::raw(" ".repeat(PAGE_MARGIN)),
        Span::styled(format!("└{}┘", "─".repeat(inner)), border),
    ])
}
