//! Top navigation bar.
//!
//! Wide terminals show the brand and every link inline; below
//! `NAV_COLLAPSE_WIDTH` columns the links fold behind a menu that drops
//! down over the page. Activating a link always closes the menu, whether
//! or not it was open.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::config::NavLink;
use crate::theme::Theme;

/// Width below which the link row collapses behind a menu.
pub const NAV_COLLAPSE_WIDTH: u16 = 80;

/// Interactive state of the navigation bar.
#[derive(Debug, Default)]
pub struct NavBarState {
    brand: String,
    links: Vec<NavLink>,
    selected: usize,
    menu_open: bool,
    collapsed: bool,
}

impl NavBarState {
    pub fn new(brand: impl Into<String>, links: Vec<NavLink>) -> Self {
        Self {
            brand: brand.into(),
            links,
            selected: 0,
            menu_open: false,
            collapsed: false,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Follow the terminal width. The open flag survives expansion, the
    /// dropdown just stops being drawn.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn select_next(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + 1) % self.links.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + self.links.len() - 1) % self.links.len();
        }
    }

    /// Activate the link at `index` and return its target section.
    /// A real link closes the menu; an out-of-range index touches nothing.
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let target = self.links.get(index)?.target.clone();
        self.selected = index;
        self.menu_open = false;
        Some(target)
    }

    pub fn activate_selected(&mut self) -> Option<String> {
        self.activate(self.selected)
    }
}

/// Render the bar itself, one row high.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    nav: &NavBarState,
    active_section: Option<&str>,
    scrolled: bool,
) {
    let bar_style = if scrolled {
        theme.get_component_style("navbar_scrolled", false)
    } else {
        theme.get_component_style("navbar", false)
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", nav.brand()),
        theme.get_component_style("navbar_brand", false),
    )];

    if nav.is_collapsed() {
        if !nav.links().is_empty() {
            let marker = if nav.is_menu_open() { "▾ menu" } else { "▸ menu" };
            spans.push(Span::styled(
                marker,
                theme.get_component_style("nav_link", false),
            ));
        }
    } else {
        for (i, link) in nav.links().iter().enumerate() {
            let active = active_section == Some(link.target.as_str());
            let name = if active { "nav_link_active" } else { "nav_link" };
            spans.push(Span::styled(
                format!(" {} ", link.label),
                theme.get_component_style(name, i == nav.selected()),
            ));
        }
    }

    let bar = Paragraph::new(Line::from(spans)).style(bar_style);
    frame.render_widget(bar, area);
}

/// Render the dropdown over the page area. Only called while the bar is
/// collapsed and the menu is open.
pub fn render_menu(frame: &mut Frame, below: Rect, theme: &Theme, nav: &NavBarState) {
    if nav.links().is_empty() || below.height == 0 {
        return;
    }

    let longest = nav
        .links()
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let area = Rect {
        x: below.x,
        y: below.y,
        width: (longest + 6).min(below.width),
        height: (nav.links().len() as u16 + 2).min(below.height),
    };

    let items: Vec<ListItem> = nav
        .links()
        .iter()
        .enumerate()
        .map(|(i, link)| {
            ListItem::new(format!("{} {}", i + 1, link.label))
                .style(theme.get_component_style("nav_link", i == nav.selected()))
        })
        .collect();

    frame.render_widget(Clear, area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .style(theme.get_component_style("navbar", false)),
    );
    frame.render_widget(list, area);
}
