pub mod contact_form;
pub mod footer;
pub mod hero;
pub mod navbar;
pub mod scroll_top;
pub mod sections;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::time::Instant;

use crate::config::NavLink;
use crate::images::LazyImageLoader;
use crate::page::{Page, PageLayout};
use crate::reveal::RevealEffect;
use crate::scroll::ScrollState;
use crate::theme::Theme;

use self::contact_form::ContactFormState;
use self::navbar::NavBarState;

// Re-export the types the event layer works with.
pub use self::contact_form::{FormAction, FormField};
pub use self::navbar::NAV_COLLAPSE_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UIMode {
    Browse,
    ContactForm,
}

/// Everything the renderer needs from the app for one frame.
pub struct RenderContext<'a> {
    pub page: &'a Page,
    pub layout: &'a PageLayout,
    pub scroll: &'a ScrollState,
    /// Currently visible part of the typing animation.
    pub typed: &'a str,
    pub active_section: Option<&'a str>,
    pub reveals: &'a RevealEffect,
    /// `None` when the terminal has no graphics support.
    pub images: Option<&'a LazyImageLoader>,
    pub now: Instant,
    /// Captured once at startup.
    pub year: i32,
}

pub struct UI {
    mode: UIMode,
    theme: Theme,
    nav: NavBarState,
    form: ContactFormState,
    help: String,
}

impl UI {
    pub fn new(theme: Theme, brand: impl Into<String>, links: Vec<NavLink>, help: String) -> Self {
        Self {
            mode: UIMode::Browse,
            theme,
            nav: NavBarState::new(brand, links),
            form: ContactFormState::new(),
            help,
        }
    }

    pub fn mode(&self) -> UIMode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn open_contact_form(&mut self) {
        self.mode = UIMode::ContactForm;
    }

    /// Back to browsing. Field contents survive, like scrolling away from
    /// a form and back.
    pub fn close_contact_form(&mut self) {
        self.mode = UIMode::Browse;
    }

    pub fn contact_form(&self) -> &ContactFormState {
        &self.form
    }

    pub fn contact_form_mut(&mut self) -> &mut ContactFormState {
        &mut self.form
    }

    pub fn toggle_menu(&mut self) {
        self.nav.toggle_menu();
    }

    pub fn is_menu_open(&self) -> bool {
        self.nav.is_menu_open()
    }

    pub fn select_next_link(&mut self) {
        self.nav.select_next();
    }

    pub fn select_prev_link(&mut self) {
        self.nav.select_prev();
    }

    pub fn activate_selected_link(&mut self) -> Option<String> {
        self.nav.activate_selected()
    }

    pub fn activate_link(&mut self, index: usize) -> Option<String> {
        self.nav.activate(index)
    }

    pub fn render(&mut self, frame: &mut Frame, ctx: &RenderContext) {
        let size = frame.size();
        self.nav.set_collapsed(size.width < NAV_COLLAPSE_WIDTH);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        navbar::render(
            frame,
            chunks[0],
            &self.theme,
            &self.nav,
            ctx.active_section,
            ctx.scroll.is_navbar_scrolled(),
        );

        match self.mode {
            UIMode::Browse => {
                sections::render_viewport(frame, chunks[1], &self.theme, ctx);
                if ctx.scroll.is_scroll_top_visible() {
                    scroll_top::render(frame, chunks[1], &self.theme);
                }
                if self.nav.is_collapsed() && self.nav.is_menu_open() {
                    navbar::render_menu(frame, chunks[1], &self.theme, &self.nav);
                }
            }
            UIMode::ContactForm => {
                let recipient = ctx.page.recipient.as_deref().unwrap_or_default();
                contact_form::render(frame, chunks[1], &self.theme, &self.form, recipient);
            }
        }

        footer::render(
            frame,
            chunks[2],
            &self.theme,
            ctx.page.footer.as_ref(),
            ctx.year,
            &self.help,
        );
    }
}
