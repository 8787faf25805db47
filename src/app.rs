use anyhow::Result;
use chrono::Datelike;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{PageFile, PageSource};
use crate::contact::{FormStatus, Submission, SUCCESS_MESSAGE};
use crate::events::{EventHandler, EventResult};
use crate::images::{ImageManager, LazyImageLoader, LazyState};
use crate::observe::IntersectionWatcher;
use crate::page::{Page, PageLayout, IMAGE_FRAME_ROWS};
use crate::reveal::{RevealEffect, REVEAL_BOTTOM_MARGIN, REVEAL_THRESHOLD};
use crate::scroll::{ScrollManager, ROW_UNITS};
use crate::theme::Theme;
use crate::typing::TypingAnimator;
use crate::ui::{RenderContext, UIMode, UI};

/// Rows taken by the fixed navbar and footer.
const CHROME_ROWS: u16 = 2;

pub struct App {
    should_quit: bool,
    ui: UI,
    event_handler: EventHandler,
    page: Page,
    layout: PageLayout,
    scroll: ScrollManager,
    /// `None` when the page declares no usable typing phrases.
    typing: Option<TypingAnimator>,
    reveals: RevealEffect,
    reveal_watcher: IntersectionWatcher,
    /// `None` when the terminal has no graphics protocol; images then stay
    /// placeholders and are never promoted or loaded.
    images: Option<LazyImageLoader>,
    image_watcher: IntersectionWatcher,
    /// Last section the highlighter matched. Kept as-is when no section
    /// matches the current offset.
    active_section: Option<String>,
    /// Captured once at startup.
    year: i32,
    last_mailto: Option<String>,
    mailto_enabled: bool,
}

impl App {
    pub fn new(file: PageFile, source: PageSource, theme: Theme, mut images: ImageManager) -> Self {
        let now = Instant::now();
        let page = Page::from_file(&file);
        let layout = PageLayout::measure(&page, 100);
        let event_handler = EventHandler::new();
        let help = event_handler.keyboard_manager().help_line();
        let ui = UI::new(theme, page.brand.clone(), page.nav_links.clone(), help);

        let typing = TypingAnimator::new(file.typing_phrases(), now);
        if typing.is_none() {
            debug!("no typing phrases; the hero line stays static");
        }

        let mut reveals = RevealEffect::new();
        for card in page.cards() {
            reveals.register(card.key.clone());
        }

        let supports_images = images.supports_images();
        // Encode against the frame interior (4 rows, ~40 columns inside the
        // border) so payloads never overdraw the page below the frame.
        images.set_max_dimensions(40, (IMAGE_FRAME_ROWS - 2) as u32);
        let loader = supports_images.then(|| {
            let mut loader = LazyImageLoader::new(images);
            for image in page.images() {
                loader.register(
                    image.key.clone(),
                    image.alt.clone(),
                    image.source.clone(),
                    image.deferred_source.clone(),
                );
            }
            loader
        });
        if loader.is_none() {
            info!("terminal graphics unavailable; images stay as placeholders");
        }

        info!(
            "page loaded from {source}: {} sections, {} cards, {} images",
            page.sections.len(),
            page.cards().count(),
            page.images().count()
        );

        Self {
            should_quit: false,
            ui,
            event_handler,
            page,
            layout,
            scroll: ScrollManager::new(0, 0),
            typing,
            reveals,
            reveal_watcher: IntersectionWatcher::new(REVEAL_THRESHOLD, REVEAL_BOTTOM_MARGIN),
            images: loader,
            // Any overlap at all promotes a lazy image.
            image_watcher: IntersectionWatcher::new(0.0, 0),
            active_section: None,
            year: chrono::Local::now().year(),
            last_mailto: None,
            mailto_enabled: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "portafolio needs a terminal (TTY) to run"
            ));
        }

        enable_raw_mode()
            .map_err(|e| anyhow::anyhow!("failed to enable raw mode: {e}"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| anyhow::anyhow!("failed to enter the alternate screen: {e}"))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        if let Some(images) = &mut self.images {
            images.load_eager().await;
        }

        let mut first_frame = true;
        loop {
            let size = terminal.size()?;
            let viewport = size.height.saturating_sub(CHROME_ROWS) as usize;
            let resized = self.sync_layout(size.width, viewport);

            if first_frame || resized {
                // Whatever starts out, or newly lands, in view counts as
                // entered; a clamped offset moves the highlight too.
                self.on_scroll_changed(Instant::now()).await;
                first_frame = false;
            }

            let now = Instant::now();
            let typed = self
                .typing
                .as_ref()
                .map(|t| t.visible_text())
                .unwrap_or_default();
            let ctx = RenderContext {
                page: &self.page,
                layout: &self.layout,
                scroll: self.scroll.state(),
                typed: &typed,
                active_section: self.active_section.as_deref(),
                reveals: &self.reveals,
                images: self.images.as_ref(),
                now,
                year: self.year,
            };
            terminal.draw(|f| self.ui.render(f, &ctx))?;
            self.flush_graphics()?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    let result = self.event_handler.handle_key_event(key, &mut self.ui);
                    self.apply_event(result, Instant::now()).await;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick(Instant::now()).await;
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Re-measure the layout when the width changed and keep the scroll
    /// extents and watcher geometry in step with it. Returns true when the
    /// viewport geometry moved (new width, new viewport extent, or an
    /// offset clamped by the shorter range) and the offset-derived state
    /// is owed a recompute.
    fn sync_layout(&mut self, width: u16, viewport_rows: usize) -> bool {
        let mut changed = false;
        if self.layout.width() != width {
            self.layout = PageLayout::measure(&self.page, width);
            debug!(
                "layout measured at width {width}: {} rows",
                self.layout.total_rows()
            );
            changed = true;
        }

        let offset_before = self.scroll.offset();
        let rows_before = self.scroll.state().viewport_rows();
        self.scroll.resize(viewport_rows, self.layout.total_rows());
        changed |= self.scroll.offset() != offset_before
            || self.scroll.state().viewport_rows() != rows_before;

        // observe() updates rectangles in place and keeps entry state.
        for (key, rect) in self.layout.card_rects() {
            self.reveal_watcher.observe(key.clone(), *rect);
        }
        if let Some(images) = &self.images {
            for (key, rect) in self.layout.image_rects() {
                let deferred = images
                    .get(key)
                    .map(|i| i.deferred_source().is_some())
                    .unwrap_or(false);
                if deferred {
                    self.image_watcher.observe(key.clone(), *rect);
                }
            }
        }

        changed
    }

    /// Everything derived from the scroll offset, run whenever it changed:
    /// the active-section highlight, card reveals, and lazy image loads.
    async fn on_scroll_changed(&mut self, now: Instant) {
        let offset = self.scroll.offset();
        let viewport_units = self.scroll.state().viewport_rows() * ROW_UNITS;

        if let Some(active) = self.layout.active_section(offset) {
            if self.active_section.as_deref() != Some(active) {
                debug!("active section: {active}");
                self.active_section = Some(active.to_string());
            }
        }
        // No match keeps the previous highlight.

        for key in self.reveal_watcher.sweep(offset, viewport_units) {
            self.reveals.begin(&key, now);
        }

        let mut promoted = Vec::new();
        if self.images.is_some() {
            for key in self.image_watcher.sweep(offset, viewport_units) {
                promoted.push(key);
            }
        }
        for key in promoted {
            if let Some(images) = &mut self.images {
                if images.promote(&key) {
                    self.image_watcher.unobserve(&key);
                    images.load(&key).await;
                }
            }
        }
    }

    async fn on_tick(&mut self, now: Instant) {
        if let Some(typing) = &mut self.typing {
            typing.tick(now);
        }
        if self.scroll.tick(now) {
            self.on_scroll_changed(now).await;
        }
        self.reveals.advance(now);
        self.ui.contact_form_mut().expire_status(now);
    }

    async fn apply_event(&mut self, result: EventResult, now: Instant) {
        let changed = match result {
            EventResult::Continue => false,
            EventResult::Quit => {
                self.should_quit = true;
                false
            }
            EventResult::ScrollDown(rows) => self.scroll.scroll_by_rows(rows),
            EventResult::ScrollUp(rows) => self.scroll.scroll_by_rows(-rows),
            EventResult::PageDown => {
                let step = self.scroll.state().page_rows();
                self.scroll.scroll_by_rows(step)
            }
            EventResult::PageUp => {
                let step = self.scroll.state().page_rows();
                self.scroll.scroll_by_rows(-step)
            }
            EventResult::JumpTop => self.scroll.jump_to(0),
            EventResult::JumpBottom => {
                let max = self.scroll.state().max_offset();
                self.scroll.jump_to(max)
            }
            EventResult::ScrollTopButton => {
                // Only honored while the button is on screen.
                if self.scroll.state().is_scroll_top_visible() {
                    self.scroll.animate_to_top(now);
                }
                false
            }
            EventResult::Anchor(target) => {
                self.navigate_to(&target, now);
                false
            }
            EventResult::OpenContactForm => {
                if self.page.recipient.is_some() {
                    self.ui.open_contact_form();
                } else {
                    debug!("no contact recipient; form stays disabled");
                }
                false
            }
            EventResult::SubmitContact => {
                self.submit_contact(now);
                false
            }
        };
        if changed {
            self.on_scroll_changed(now).await;
        }
    }

    /// Scroll so `target` sits just under the navbar. A link to a section
    /// that is not on the page does nothing.
    fn navigate_to(&mut self, target: &str, now: Instant) {
        if let Some(top) = self.layout.section_top(target) {
            self.scroll.animate_to_anchor(top, now);
        } else {
            debug!("nav target '{target}' not on this page");
        }
    }

    fn submit_contact(&mut self, now: Instant) {
        let Some(recipient) = self.page.recipient.clone() else {
            return;
        };
        let form = self.ui.contact_form();
        match Submission::validate(form.name(), form.email(), form.message()) {
            Ok(submission) => {
                let url = submission.mailto_url(&recipient);
                if self.mailto_enabled {
                    info!("opening mail client for {recipient}");
                    if let Err(err) = webbrowser::open(&url) {
                        // Best effort, like the page it mirrors: the user
                        // still gets the success message.
                        warn!("failed to open mail client: {err}");
                    }
                }
                self.last_mailto = Some(url);
                let form = self.ui.contact_form_mut();
                form.set_status(FormStatus::success(SUCCESS_MESSAGE, now));
                form.reset_fields();
            }
            Err(err) => {
                self.ui
                    .contact_form_mut()
                    .set_status(FormStatus::error(err.to_string(), now));
            }
        }
    }

    /// Write loaded image payloads over their frames, straight to the
    /// terminal. Runs after the buffer draw so the escapes are not mangled
    /// by the cell diff.
    // TODO: transmit kitty images once and re-place them by id instead of
    // resending the payload every frame.
    fn flush_graphics(&self) -> Result<()> {
        let Some(images) = &self.images else {
            return Ok(());
        };
        if self.ui.mode() != UIMode::Browse {
            return Ok(());
        }

        let top_row = self.scroll.state().top_row();
        let viewport = self.scroll.state().viewport_rows();
        let mut out = io::stdout();
        for (key, rect) in self.layout.image_rects() {
            let Some(image) = images.get(key) else {
                continue;
            };
            let LazyState::Loaded(encoded) = image.state() else {
                continue;
            };
            // First interior row of the frame, in content rows.
            let interior = rect.top / ROW_UNITS + 1;
            let Some(screen_row) = interior.checked_sub(top_row) else {
                continue;
            };
            if screen_row + encoded.cell_rows() > viewport {
                continue;
            }
            // +1 for the navbar row; x 4 clears the margin and border.
            queue!(out, MoveTo(4, screen_row as u16 + 1), Print(&encoded.payload))?;
        }
        out.flush()?;
        Ok(())
    }
}
