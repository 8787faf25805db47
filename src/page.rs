//! Runtime page model and measured layout.
//!
//! `Page` flattens the page file into what the renderer needs; `PageLayout`
//! turns it into a row plan at a given width. The layout is the single
//! source of truth for geometry: the renderer draws exactly these rows, the
//! section highlighter reads section tops and heights from them, and the
//! intersection watchers get card and image rectangles from them. Row
//! heights never depend on animation state, so a layout stays valid until
//! the width changes.
//!
//! The row plan is indexed by row; published geometry (section tops and
//! heights, card and image rectangles) is in scroll units, `ROW_UNITS` per
//! row, so it composes directly with offsets and thresholds.

use crate::config::{NavLink, PageFile, HERO_SECTION_ID};
use crate::observe::PageRect;
use crate::scroll::{ROW_UNITS, SECTION_HIGHLIGHT_OFFSET};
use std::path::PathBuf;

/// Rows a framed image occupies, borders included.
pub const IMAGE_FRAME_ROWS: usize = 6;

/// Rows the hero block occupies when present.
pub const HERO_ROWS: usize = 8;

#[derive(Debug, Clone)]
pub struct Page {
    pub brand: String,
    pub nav_links: Vec<NavLink>,
    pub hero: Option<HeroBlock>,
    pub sections: Vec<Section>,
    /// Contact form recipient; `None` disables the form.
    pub recipient: Option<String>,
    pub footer: Option<FooterBlock>,
}

#[derive(Debug, Clone)]
pub struct HeroBlock {
    pub greeting: String,
    pub name: String,
    pub tagline: String,
    pub prefix: String,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub body: String,
    pub cards: Vec<Card>,
    pub images: Vec<PageImage>,
}

#[derive(Debug, Clone)]
pub struct Card {
    /// Stable key shared with the reveal effect and its watcher.
    pub key: String,
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PageImage {
    /// Stable key shared with the lazy loader and its watcher.
    pub key: String,
    pub alt: String,
    pub source: Option<PathBuf>,
    pub deferred_source: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct FooterBlock {
    pub text: String,
    pub socials: Vec<(String, String)>,
    pub show_year: bool,
}

impl Page {
    pub fn from_file(file: &PageFile) -> Self {
        let sections = file
            .sections
            .iter()
            .map(|section| Section {
                id: section.id.clone(),
                title: section.title.clone(),
                body: section.body.clone(),
                cards: section
                    .cards
                    .iter()
                    .enumerate()
                    .map(|(i, card)| Card {
                        key: format!("{}.card{}", section.id, i),
                        title: card.title.clone(),
                        lines: card.lines.clone(),
                    })
                    .collect(),
                images: section
                    .images
                    .iter()
                    .enumerate()
                    .map(|(i, image)| PageImage {
                        key: format!("{}.img{}", section.id, i),
                        alt: image.alt.clone(),
                        source: image.source.clone(),
                        deferred_source: image.deferred_source.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            brand: file.brand().to_string(),
            nav_links: file.nav_links().to_vec(),
            hero: file.hero.as_ref().map(|hero| HeroBlock {
                greeting: hero.greeting.clone(),
                name: file.profile.name.clone(),
                tagline: file.profile.tagline.clone(),
                prefix: hero.prefix.clone(),
            }),
            sections,
            recipient: file.contact.as_ref().map(|c| c.recipient.clone()),
            footer: file.footer.as_ref().map(|footer| FooterBlock {
                text: footer.text.clone(),
                socials: footer
                    .socials
                    .iter()
                    .map(|s| (s.label.clone(), s.url.clone()))
                    .collect(),
                show_year: footer.show_year,
            }),
        }
    }

    /// All cards across all sections, in page order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.sections.iter().flat_map(|s| s.cards.iter())
    }

    /// All images across all sections, in page order.
    pub fn images(&self) -> impl Iterator<Item = &PageImage> {
        self.sections.iter().flat_map(|s| s.images.iter())
    }
}

/// One row of the page body, resolved against `Page` at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRow {
    Blank,
    HeroGreeting,
    HeroName,
    HeroTagline,
    /// The typing line; the animator supplies the moving part.
    HeroTyped,
    SectionTitle(usize),
    SectionRule(usize),
    BodyLine(usize, String),
    /// Card border row carrying the card title.
    CardTop(usize, usize),
    CardLine(usize, usize, usize),
    CardBottom(usize, usize),
    ImageTop(usize, usize),
    /// Interior row `r` of a framed image.
    ImageRow(usize, usize, usize),
    ImageBottom(usize, usize),
    /// Hint under the contact section when the form is enabled.
    ContactHint,
}

/// Where a section sits on the page, in scroll units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGeometry {
    pub id: String,
    pub top: usize,
    pub height: usize,
}

/// The measured row plan of the whole page at one width.
#[derive(Debug, Clone)]
pub struct PageLayout {
    rows: Vec<PageRow>,
    sections: Vec<SectionGeometry>,
    card_rects: Vec<(String, PageRect)>,
    image_rects: Vec<(String, PageRect)>,
    width: u16,
}

impl PageLayout {
    pub fn measure(page: &Page, width: u16) -> Self {
        let text_width = usize::from(width.max(20)).saturating_sub(4);
        let mut rows = Vec::new();
        let mut sections = Vec::new();
        let mut card_rects = Vec::new();
        let mut image_rects = Vec::new();

        if page.hero.is_some() {
            let top = rows.len();
            rows.push(PageRow::Blank);
            rows.push(PageRow::HeroGreeting);
            rows.push(PageRow::HeroName);
            rows.push(PageRow::HeroTagline);
            rows.push(PageRow::Blank);
            rows.push(PageRow::HeroTyped);
            rows.push(PageRow::Blank);
            rows.push(PageRow::Blank);
            debug_assert_eq!(rows.len() - top, HERO_ROWS);
            sections.push(SectionGeometry {
                id: HERO_SECTION_ID.to_string(),
                top: top * ROW_UNITS,
                height: (rows.len() - top) * ROW_UNITS,
            });
        }

        for (si, section) in page.sections.iter().enumerate() {
            let top = rows.len();
            rows.push(PageRow::Blank);
            rows.push(PageRow::SectionTitle(si));
            rows.push(PageRow::SectionRule(si));
            for line in wrap_text(&section.body, text_width) {
                rows.push(PageRow::BodyLine(si, line));
            }
            if section.id == "contact" && page.recipient.is_some() {
                rows.push(PageRow::Blank);
                rows.push(PageRow::ContactHint);
            }
            for (ci, card) in section.cards.iter().enumerate() {
                rows.push(PageRow::Blank);
                let card_top = rows.len();
                rows.push(PageRow::CardTop(si, ci));
                for li in 0..card.lines.len() {
                    rows.push(PageRow::CardLine(si, ci, li));
                }
                rows.push(PageRow::CardBottom(si, ci));
                card_rects.push((
                    card.key.clone(),
                    PageRect::new(card_top * ROW_UNITS, (rows.len() - card_top) * ROW_UNITS),
                ));
            }
            for (ii, image) in section.images.iter().enumerate() {
                rows.push(PageRow::Blank);
                let image_top = rows.len();
                rows.push(PageRow::ImageTop(si, ii));
                for r in 0..IMAGE_FRAME_ROWS - 2 {
                    rows.push(PageRow::ImageRow(si, ii, r));
                }
                rows.push(PageRow::ImageBottom(si, ii));
                debug_assert_eq!(rows.len() - image_top, IMAGE_FRAME_ROWS);
                image_rects.push((
                    image.key.clone(),
                    PageRect::new(image_top * ROW_UNITS, IMAGE_FRAME_ROWS * ROW_UNITS),
                ));
            }
            rows.push(PageRow::Blank);
            sections.push(SectionGeometry {
                id: section.id.clone(),
                top: top * ROW_UNITS,
                height: (rows.len() - top) * ROW_UNITS,
            });
        }

        Self {
            rows,
            sections,
            card_rects,
            image_rects,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn rows(&self) -> &[PageRow] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn sections(&self) -> &[SectionGeometry] {
        &self.sections
    }

    pub fn card_rects(&self) -> &[(String, PageRect)] {
        &self.card_rects
    }

    pub fn image_rects(&self) -> &[(String, PageRect)] {
        &self.image_rects
    }

    /// Top of the section with `id` in scroll units, if it exists on the
    /// page. This is what anchor scrolls target.
    pub fn section_top(&self, id: &str) -> Option<usize> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.top)
    }

    /// The section the offset currently "belongs" to, for nav highlighting.
    ///
    /// A section matches while the offset (in units) sits in
    /// [top - 100, top - 100 + height). Every section is checked in page
    /// order and each match overwrites the last, so with overlapping ranges
    /// the last one in page order wins. `None` when nothing matches; the
    /// caller keeps whatever was active before.
    pub fn active_section(&self, offset: usize) -> Option<&str> {
        let offset = offset as i64;
        let mut active = None;
        for section in &self.sections {
            let lead_top = section.top as i64 - SECTION_HIGHLIGHT_OFFSET as i64;
            if offset >= lead_top && offset < lead_top + section.height as i64 {
                active = Some(section.id.as_str());
            }
        }
        active
    }
}

/// Greedy word wrap by character count. Words longer than the width are
/// split hard.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            if !text.trim().is_empty() && !lines.is_empty() {
                lines.push(String::new());
            }
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            // Hard-split oversized words.
            while word.chars().count() > width {
                let split: String = word.chars().take(width).collect();
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(split.clone());
                word = &word[split.len()..];
            }
            if line.is_empty() {
                line.push_str(word);
            } else if line.chars().count() + 1 + word.chars().count() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}
