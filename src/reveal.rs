//! Fade-in reveal state for content cards.
//!
//! Cards start hidden. The first time one enters the effective viewport it
//! begins a short ramp to full visibility and then stays revealed for good;
//! scrolling it back out never hides it again.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Visibility threshold for the reveal watcher.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Scroll units trimmed from the viewport bottom for the reveal watcher.
pub const REVEAL_BOTTOM_MARGIN: i64 = -50;

/// Length of the ramp from hidden to fully visible.
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq)]
enum RevealPhase {
    Hidden,
    Revealing { since: Instant },
    Revealed,
}

/// Per-card reveal state, keyed the same way as the watcher entries.
#[derive(Debug, Default)]
pub struct RevealEffect {
    cards: HashMap<String, RevealPhase>,
}

impl RevealEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a card, starting hidden. Re-registering a known card keeps its
    /// state.
    pub fn register(&mut self, key: impl Into<String>) {
        self.cards.entry(key.into()).or_insert(RevealPhase::Hidden);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// First viewport entry: begin the ramp. Later calls are ignored, so a
    /// card can never be re-hidden or restarted.
    pub fn begin(&mut self, key: &str, now: Instant) {
        if let Some(phase) = self.cards.get_mut(key) {
            if *phase == RevealPhase::Hidden {
                *phase = RevealPhase::Revealing { since: now };
            }
        }
    }

    /// Promote finished ramps to the permanent revealed state.
    pub fn advance(&mut self, now: Instant) {
        for phase in self.cards.values_mut() {
            if let RevealPhase::Revealing { since } = *phase {
                if now.saturating_duration_since(since) >= REVEAL_DURATION {
                    *phase = RevealPhase::Revealed;
                }
            }
        }
    }

    /// Ramp progress in [0.0, 1.0]; unknown keys render as fully visible.
    pub fn progress(&self, key: &str, now: Instant) -> f32 {
        match self.cards.get(key) {
            None | Some(RevealPhase::Revealed) => 1.0,
            Some(RevealPhase::Hidden) => 0.0,
            Some(RevealPhase::Revealing { since }) => {
                let elapsed = now.saturating_duration_since(*since);
                (elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32()).min(1.0)
            }
        }
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        matches!(self.cards.get(key), Some(RevealPhase::Hidden))
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        matches!(self.cards.get(key), Some(RevealPhase::Revealed))
    }
}
