//! Viewport intersection watching.
//!
//! Page elements (cards, images) register a rectangle with a watcher; after
//! every scroll-offset change the app sweeps the watcher and receives the
//! keys of elements that just entered the effective viewport. Entry is
//! edge-triggered: an element reports once when it crosses in and not again
//! until it has left and re-entered. The effective viewport can be shrunk at
//! the bottom (a negative margin) and a visibility threshold governs how
//! much of the element must show before it counts as inside.
//!
//! The watcher has no opinion about scale: rectangles, offsets, and the
//! viewport extent just have to agree. The page feeds it scroll units.

/// Extent of a watched element along the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRect {
    pub top: usize,
    pub height: usize,
}

impl PageRect {
    pub fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> usize {
        self.top + self.height
    }
}

#[derive(Debug, Clone)]
struct WatchTarget {
    key: String,
    rect: PageRect,
    was_inside: bool,
}

/// Watches registered rectangles for entry into the viewport.
#[derive(Debug, Clone)]
pub struct IntersectionWatcher {
    /// Fraction of the element that must be visible, 0.0 meaning any
    /// overlap at all.
    threshold: f32,
    /// Added to the viewport bottom; negative values shrink it.
    bottom_margin: i64,
    targets: Vec<WatchTarget>,
}

impl IntersectionWatcher {
    pub fn new(threshold: f32, bottom_margin: i64) -> Self {
        Self {
            threshold,
            bottom_margin,
            targets: Vec::new(),
        }
    }

    /// Register `key` at `rect`, or move an already-registered key to a new
    /// rectangle (its entry state is kept, so a move alone never re-fires).
    pub fn observe(&mut self, key: impl Into<String>, rect: PageRect) {
        let key = key.into();
        if let Some(target) = self.targets.iter_mut().find(|t| t.key == key) {
            target.rect = rect;
        } else {
            self.targets.push(WatchTarget {
                key,
                rect,
                was_inside: false,
            });
        }
    }

    /// Stop watching `key` entirely.
    pub fn unobserve(&mut self, key: &str) {
        self.targets.retain(|t| t.key != key);
    }

    pub fn is_watching(&self, key: &str) -> bool {
        self.targets.iter().any(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Recheck every target against the viewport `[offset, offset + extent)`
    /// and return the keys that just entered.
    pub fn sweep(&mut self, offset: usize, extent: usize) -> Vec<String> {
        let view_top = offset as i64;
        let view_bottom = offset as i64 + extent as i64 + self.bottom_margin;

        let mut entered = Vec::new();
        for target in &mut self.targets {
            let inside = intersects(target.rect, view_top, view_bottom, self.threshold);
            if inside && !target.was_inside {
                entered.push(target.key.clone());
            }
            target.was_inside = inside;
        }
        entered
    }
}

/// Whether enough of `rect` lies within [view_top, view_bottom).
fn intersects(rect: PageRect, view_top: i64, view_bottom: i64, threshold: f32) -> bool {
    if rect.height == 0 || view_bottom <= view_top {
        return false;
    }
    let top = rect.top as i64;
    let bottom = rect.bottom() as i64;
    let overlap = bottom.min(view_bottom) - top.max(view_top);
    if overlap <= 0 {
        return false;
    }
    let fraction = overlap as f32 / rect.height as f32;
    fraction >= threshold
}
