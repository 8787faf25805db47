//! Typing animation for the hero line.
//!
//! Types each phrase a character at a time, holds it, deletes it, and moves
//! on to the next phrase, wrapping around the list forever. The animator is
//! an explicit state machine with a single pending deadline; the app tick
//! calls `tick` and the animator decides whether a step is due.

use std::time::{Duration, Instant};

/// Delay between typed characters.
pub const TYPE_DELAY: Duration = Duration::from_millis(100);

/// Delay between deleted characters.
pub const DELETE_DELAY: Duration = Duration::from_millis(50);

/// Hold after a phrase is fully typed.
pub const FULL_PAUSE: Duration = Duration::from_millis(2000);

/// Hold after a phrase is fully deleted, before the next one starts.
pub const EMPTY_PAUSE: Duration = Duration::from_millis(500);

/// Delay before the very first character.
pub const START_DELAY: Duration = Duration::from_millis(1000);

/// Where the animator is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausedAtFull,
    Deleting,
    PausedAtEmpty,
}

/// The typing state machine.
///
/// One phrase is active at a time; `cursor` counts how many of its
/// characters are currently shown. Each due step performs exactly one
/// character operation (or leaves a pause), then schedules the next
/// deadline.
#[derive(Debug, Clone)]
pub struct TypingAnimator {
    phrases: Vec<String>,
    index: usize,
    cursor: usize,
    phase: TypingPhase,
    next_step: Instant,
}

impl TypingAnimator {
    /// Build an animator over `phrases`. Empty strings are skipped; returns
    /// `None` when nothing remains to type, which disables the behavior.
    pub fn new(phrases: &[String], now: Instant) -> Option<Self> {
        let phrases: Vec<String> = phrases
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            index: 0,
            cursor: 0,
            phase: TypingPhase::Typing,
            next_step: now + START_DELAY,
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn phrase(&self) -> &str {
        &self.phrases[self.index]
    }

    /// The characters currently shown.
    pub fn visible_text(&self) -> String {
        self.phrase().chars().take(self.cursor).collect()
    }

    /// Advance if the pending deadline has passed. Returns true when the
    /// visible text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next_step {
            return false;
        }
        self.step(now)
    }

    /// Perform one step: a single character typed or deleted, with the
    /// pauses expressed as longer gaps before the next step.
    fn step(&mut self, now: Instant) -> bool {
        match self.phase {
            TypingPhase::Typing => self.type_one(now),
            TypingPhase::PausedAtFull => {
                self.phase = TypingPhase::Deleting;
                self.delete_one(now)
            }
            TypingPhase::Deleting => self.delete_one(now),
            TypingPhase::PausedAtEmpty => {
                self.phase = TypingPhase::Typing;
                self.type_one(now)
            }
        }
    }

    fn phrase_len(&self) -> usize {
        self.phrases[self.index].chars().count()
    }

    fn type_one(&mut self, now: Instant) -> bool {
        self.cursor += 1;
        if self.cursor >= self.phrase_len() {
            self.phase = TypingPhase::PausedAtFull;
            self.next_step = now + FULL_PAUSE;
        } else {
            self.next_step = now + TYPE_DELAY;
        }
        true
    }

    fn delete_one(&mut self, now: Instant) -> bool {
        self.cursor -= 1;
        if self.cursor == 0 {
            // The next phrase is chosen as soon as this one is gone; the
            // pause happens on the empty line.
            self.index = (self.index + 1) % self.phrases.len();
            self.phase = TypingPhase::PausedAtEmpty;
            self.next_step = now + EMPTY_PAUSE;
        } else {
            self.next_step = now + DELETE_DELAY;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the animator in small simulated steps, collecting every
    /// distinct visible text in order.
    fn drive(animator: &mut TypingAnimator, start: Instant, total: Duration) -> Vec<String> {
        let mut seen = vec![animator.visible_text()];
        let step = Duration::from_millis(10);
        let mut now = start;
        while now < start + total {
            now += step;
            if animator.tick(now) {
                seen.push(animator.visible_text());
            }
        }
        seen
    }

    #[test]
    fn test_empty_phrase_list_disables_animator() {
        let now = Instant::now();
        assert!(TypingAnimator::new(&[], now).is_none());
        assert!(TypingAnimator::new(&[String::new()], now).is_none());
    }

    #[test]
    fn test_nothing_happens_before_start_delay() {
        let now = Instant::now();
        let mut animator = TypingAnimator::new(&["Hi".to_string()], now).unwrap();
        assert!(!animator.tick(now + Duration::from_millis(990)));
        assert_eq!(animator.visible_text(), "");
        assert!(animator.tick(now + START_DELAY));
        assert_eq!(animator.visible_text(), "H");
    }

    #[test]
    fn test_full_cycle_of_single_phrase() {
        let now = Instant::now();
        let mut animator = TypingAnimator::new(&["Hi".to_string()], now).unwrap();
        let seen = drive(&mut animator, now, Duration::from_secs(10));
        // Type H, Hi; hold; delete to H, to empty; hold; type again.
        assert_eq!(&seen[..6], &["", "H", "Hi", "H", "", "H"]);
    }

    #[test]
    fn test_pause_at_full_phrase() {
        let now = Instant::now();
        let mut animator = TypingAnimator::new(&["Hi".to_string()], now).unwrap();
        // 1000ms start + 100ms for the second character.
        let full_at = now + START_DELAY + TYPE_DELAY;
        animator.tick(now + START_DELAY);
        animator.tick(full_at);
        assert_eq!(animator.visible_text(), "Hi");
        assert_eq!(animator.phase(), TypingPhase::PausedAtFull);
        // Still held just before the pause elapses.
        assert!(!animator.tick(full_at + FULL_PAUSE - Duration::from_millis(10)));
        assert_eq!(animator.visible_text(), "Hi");
        // First deletion lands once the pause is over.
        assert!(animator.tick(full_at + FULL_PAUSE));
        assert_eq!(animator.visible_text(), "H");
        assert_eq!(animator.phase(), TypingPhase::Deleting);
    }

    #[test]
    fn test_phrases_cycle_in_order_and_wrap() {
        let now = Instant::now();
        let phrases = vec!["Programmer".to_string(), "Blogger".to_string()];
        let mut animator = TypingAnimator::new(&phrases, now).unwrap();
        let seen = drive(&mut animator, now, Duration::from_secs(30));

        let full_phrases: Vec<&String> = seen
            .iter()
            .filter(|t| t.as_str() == "Programmer" || t.as_str() == "Blogger")
            .collect();
        // Fully typed in list order, then wrapping back to the start.
        assert!(full_phrases.len() >= 3);
        assert_eq!(full_phrases[0], "Programmer");
        assert_eq!(full_phrases[1], "Blogger");
        assert_eq!(full_phrases[2], "Programmer");
    }

    #[test]
    fn test_character_steps_per_period() {
        let now = Instant::now();
        let phrases = vec!["Programmer".to_string(), "Blogger".to_string()];
        let mut animator = TypingAnimator::new(&phrases, now).unwrap();

        // One period types and deletes every phrase once.
        let expected_steps = 2 * ("Programmer".len() + "Blogger".len());

        let step = Duration::from_millis(10);
        let mut current = now;
        let mut steps = 0;
        // Run until the start of the second period: empty text, first
        // phrase pending again, one full pass recorded.
        loop {
            current += step;
            if animator.tick(current) {
                steps += 1;
            }
            if steps > 0
                && animator.phase() == TypingPhase::PausedAtEmpty
                && animator.phrase() == "Programmer"
            {
                break;
            }
        }
        assert_eq!(steps, expected_steps);
    }

    #[test]
    fn test_visible_text_is_prefix_of_current_phrase() {
        let now = Instant::now();
        let phrases = vec!["ab".to_string(), "xyz".to_string()];
        let mut animator = TypingAnimator::new(&phrases, now).unwrap();
        let step = Duration::from_millis(10);
        let mut current = now;
        for _ in 0..2_000 {
            current += step;
            animator.tick(current);
            let text = animator.visible_text();
            assert!(
                animator.phrase().starts_with(&text),
                "{text:?} is not a prefix of {:?}",
                animator.phrase()
            );
        }
    }
}
