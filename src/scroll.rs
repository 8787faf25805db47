//! Scroll state for the page viewport.
//!
//! Offsets are kept in scroll units, not rows: one terminal row counts as
//! `ROW_UNITS` units, matching the 8x16 pixel cell geometry the image code
//! assumes. Thresholds and anchor headroom stay on that unit scale, where
//! a whole page is a few thousand units long; only the renderer divides
//! back down to rows. Everything the page derives from the scroll position
//! (navbar treatment, scroll-to-top button, active nav link) is a pure
//! function of the current offset, recomputed whenever the offset changes. `ScrollManager` bundles the offset with the eased
//! animation used by anchor jumps and the scroll-to-top button.

use std::time::{Duration, Instant};

/// Scroll units per terminal row.
pub const ROW_UNITS: usize = 16;

/// Offset above which the navbar switches to its scrolled treatment.
pub const NAVBAR_SCROLL_THRESHOLD: usize = 50;

/// Offset above which the scroll-to-top button is shown.
pub const SCROLL_TOP_THRESHOLD: usize = 300;

/// Units reserved above an anchor target so the navbar never covers it.
pub const ANCHOR_OFFSET: usize = 80;

/// Units of lead used when matching the active section to the offset.
pub const SECTION_HIGHLIGHT_OFFSET: usize = 100;

/// Duration of an animated scroll.
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(400);

/// Current scroll position plus the viewport and content extents that
/// bound it.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: usize,
    viewport_rows: usize,
    content_rows: usize,
}

impl ScrollState {
    pub fn new(viewport_rows: usize, content_rows: usize) -> Self {
        Self {
            offset: 0,
            viewport_rows,
            content_rows,
        }
    }

    /// Current offset, in scroll units.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// First content row the viewport shows.
    pub fn top_row(&self) -> usize {
        self.offset / ROW_UNITS
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows) * ROW_UNITS
    }

    /// Replace the extents, clamping the offset into the new range.
    pub fn resize(&mut self, viewport_rows: usize, content_rows: usize) {
        self.viewport_rows = viewport_rows;
        self.content_rows = content_rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Jump to an absolute offset in units, clamped. Returns true if the
    /// offset actually changed.
    pub fn scroll_to(&mut self, offset: usize) -> bool {
        let clamped = offset.min(self.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Move by a signed number of rows, clamped at both ends.
    pub fn scroll_by_rows(&mut self, delta: i64) -> bool {
        let target = self.offset as i64 + delta * ROW_UNITS as i64;
        self.scroll_to(target.max(0) as usize)
    }

    /// Rows one PageUp/PageDown step covers.
    pub fn page_rows(&self) -> i64 {
        self.viewport_rows.saturating_sub(1).max(1) as i64
    }

    /// Navbar "scrolled" marker: at the threshold exactly it is still off.
    pub fn is_navbar_scrolled(&self) -> bool {
        self.offset > NAVBAR_SCROLL_THRESHOLD
    }

    /// Scroll-to-top "visible" marker.
    pub fn is_scroll_top_visible(&self) -> bool {
        self.offset > SCROLL_TOP_THRESHOLD
    }
}

/// An in-flight animated scroll with cubic ease-out pacing.
#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    from: usize,
    to: usize,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: usize, to: usize, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
            duration: SMOOTH_SCROLL_DURATION,
        }
    }

    pub fn target(&self) -> usize {
        self.to
    }

    /// Offset at `now`, eased toward the target.
    pub fn value_at(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = ease_out_cubic(t);
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round().max(0.0) as usize
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Scroll offset plus the animation driving it, advanced by the app tick.
#[derive(Debug, Default)]
pub struct ScrollManager {
    state: ScrollState,
    animation: Option<ScrollAnimation>,
}

impl ScrollManager {
    pub fn new(viewport_rows: usize, content_rows: usize) -> Self {
        Self {
            state: ScrollState::new(viewport_rows, content_rows),
            animation: None,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> usize {
        self.state.offset()
    }

    pub fn resize(&mut self, viewport_rows: usize, content_rows: usize) {
        self.state.resize(viewport_rows, content_rows);
    }

    /// Immediate (non-animated) scroll by rows; cancels any animation in
    /// flight. Returns true if the offset changed.
    pub fn scroll_by_rows(&mut self, delta: i64) -> bool {
        self.animation = None;
        self.state.scroll_by_rows(delta)
    }

    /// Immediate jump, cancelling any animation in flight.
    pub fn jump_to(&mut self, offset: usize) -> bool {
        self.animation = None;
        self.state.scroll_to(offset)
    }

    /// Start an animated scroll toward `target`. A new request replaces any
    /// animation in flight.
    pub fn animate_to(&mut self, target: usize, now: Instant) {
        let clamped = target.min(self.state.max_offset());
        if clamped == self.state.offset() {
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation::new(self.state.offset(), clamped, now));
    }

    /// Animated scroll to an anchor target, keeping `ANCHOR_OFFSET` units
    /// of headroom above it.
    pub fn animate_to_anchor(&mut self, target_top: usize, now: Instant) {
        self.animate_to(target_top.saturating_sub(ANCHOR_OFFSET), now);
    }

    /// Animated scroll back to the top of the page.
    pub fn animate_to_top(&mut self, now: Instant) {
        self.animate_to(0, now);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the animation one tick. Returns true if the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };
        let value = animation.value_at(now);
        if animation.is_finished(now) {
            self.animation = None;
        }
        self.state.scroll_to(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_threshold_is_exclusive() {
        let mut state = ScrollState::new(24, 1000);
        for offset in [0, 1, 49, 50] {
            state.scroll_to(offset);
            assert!(!state.is_navbar_scrolled(), "offset {offset}");
        }
        for offset in [51, 52, 300, 999] {
            state.scroll_to(offset);
            assert!(state.is_navbar_scrolled(), "offset {offset}");
        }
    }

    #[test]
    fn test_scroll_top_threshold_is_exclusive() {
        let mut state = ScrollState::new(24, 1000);
        for offset in [0, 50, 299, 300] {
            state.scroll_to(offset);
            assert!(!state.is_scroll_top_visible(), "offset {offset}");
        }
        for offset in [301, 500] {
            state.scroll_to(offset);
            assert!(state.is_scroll_top_visible(), "offset {offset}");
        }
    }

    #[test]
    fn test_markers_agree_at_every_offset() {
        let mut state = ScrollState::new(10, 40);
        assert!(state.max_offset() > SCROLL_TOP_THRESHOLD);
        for offset in 0..=state.max_offset() {
            state.scroll_to(offset);
            assert_eq!(state.is_navbar_scrolled(), offset > NAVBAR_SCROLL_THRESHOLD);
            assert_eq!(state.is_scroll_top_visible(), offset > SCROLL_TOP_THRESHOLD);
        }
    }

    #[test]
    fn test_row_stepping_and_top_row() {
        let mut state = ScrollState::new(20, 100);
        state.scroll_by_rows(3);
        assert_eq!(state.offset(), 3 * ROW_UNITS);
        assert_eq!(state.top_row(), 3);

        // Partway through a row still shows that row.
        state.scroll_to(3 * ROW_UNITS + 7);
        assert_eq!(state.top_row(), 3);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut state = ScrollState::new(20, 50);
        state.scroll_to(100_000);
        assert_eq!(state.offset(), 30 * ROW_UNITS);
        state.scroll_by_rows(-1000);
        assert_eq!(state.offset(), 0);
        // Content shorter than the viewport cannot scroll at all.
        state.resize(20, 10);
        assert_eq!(state.max_offset(), 0);
        assert!(!state.scroll_to(5));
    }

    #[test]
    fn test_animation_reaches_target() {
        let now = Instant::now();
        let animation = ScrollAnimation::new(0, 120, now);
        assert_eq!(animation.value_at(now), 0);
        let mid = animation.value_at(now + Duration::from_millis(200));
        assert!(mid > 0 && mid < 120, "midpoint {mid}");
        assert_eq!(animation.value_at(now + SMOOTH_SCROLL_DURATION), 120);
        assert!(animation.is_finished(now + SMOOTH_SCROLL_DURATION));
    }

    #[test]
    fn test_animation_is_monotonic() {
        let now = Instant::now();
        let animation = ScrollAnimation::new(40, 400, now);
        let mut last = 0;
        for ms in (0..=400).step_by(50) {
            let value = animation.value_at(now + Duration::from_millis(ms));
            assert!(value >= last, "value {value} regressed below {last}");
            last = value;
        }
        assert_eq!(last, 400);
    }

    #[test]
    fn test_manager_animates_to_anchor_with_headroom() {
        let now = Instant::now();
        let mut scroll = ScrollManager::new(24, 1000);
        scroll.animate_to_anchor(200, now);
        assert!(scroll.is_animating());
        scroll.tick(now + SMOOTH_SCROLL_DURATION);
        assert_eq!(scroll.offset(), 200 - ANCHOR_OFFSET);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_anchor_near_top_clamps_to_zero() {
        let now = Instant::now();
        let mut scroll = ScrollManager::new(24, 1000);
        scroll.jump_to(300);
        scroll.animate_to_anchor(30, now);
        scroll.tick(now + SMOOTH_SCROLL_DURATION);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_new_request_replaces_animation_in_flight() {
        let now = Instant::now();
        let mut scroll = ScrollManager::new(24, 1000);
        scroll.animate_to(500, now);
        scroll.tick(now + Duration::from_millis(100));
        let partway = scroll.offset();
        assert!(partway > 0 && partway < 500);
        scroll.animate_to(0, now + Duration::from_millis(100));
        scroll.tick(now + Duration::from_millis(100) + SMOOTH_SCROLL_DURATION);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let now = Instant::now();
        let mut scroll = ScrollManager::new(24, 1000);
        scroll.animate_to(500, now);
        scroll.scroll_by_rows(3);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset(), 3 * ROW_UNITS);
    }
}
