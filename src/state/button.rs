//! Button debounce handling.
//!
//! Provides time-based stabilization with edge detection so that one physical
//! press produces exactly one [`Click`], however much the contacts bounce.
//!
//! Buttons are active-low with pull-ups: `true` is the resting (released)
//! level and `false` means pressed. A raw level is committed only after it has
//! held steady for the hold time; only the committed release → press
//! transition produces a click. Presses closer together than the hold time
//! are indistinguishable from bounce and coalesce into one click.

use crate::config::HOLD_US;

/// One confirmed press of a button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Click;

/// Button debounce state with time-based stabilization.
#[derive(Clone, Copy, Debug)]
pub struct ButtonState {
    /// Stable level reported to the rest of the system.
    committed_level: bool,
    /// Most recent instantaneous read.
    raw_level: bool,
    /// Timestamp (µs) of the last raw level change.
    last_raw_change_us: u64,
    /// Required stable time (µs) before a level is committed.
    hold_us: u64,
}

impl ButtonState {
    /// Create a new button state at the resting level (released).
    pub const fn new() -> Self { Self::with_hold(HOLD_US) }

    /// Create a released button state with a custom hold time.
    pub const fn with_hold(hold_us: u64) -> Self {
        Self {
            committed_level: true,
            raw_level: true,
            last_raw_change_us: 0,
            hold_us,
        }
    }

    /// Feed one instantaneous read of the line.
    ///
    /// Returns `Some(Click)` only when a press is committed. Releases commit
    /// silently. Never blocks.
    pub fn poll(
        &mut self,
        raw_level: bool,
        now_us: u64,
    ) -> Option<Click> {
        if raw_level != self.raw_level {
            self.raw_level = raw_level;
            self.last_raw_change_us = now_us;
        }

        let stable_for = now_us.saturating_sub(self.last_raw_change_us);
        if stable_for >= self.hold_us && raw_level != self.committed_level {
            self.committed_level = raw_level;
            // Active-low: committing `false` means the button went down.
            if !raw_level {
                return Some(Click);
            }
        }

        None
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000;
    const POLL: u64 = 5 * MS;

    /// Feed `(duration_ms, level)` segments polled every 5 ms, return click count.
    fn count_clicks(
        state: &mut ButtonState,
        segments: &[(u64, bool)],
    ) -> usize {
        let mut now = 0;
        let mut clicks = 0;
        for &(duration_ms, level) in segments {
            let end = now + duration_ms * MS;
            while now < end {
                if state.poll(level, now).is_some() {
                    clicks += 1;
                }
                now += POLL;
            }
        }
        clicks
    }

    #[test]
    fn test_new_state_is_released() {
        let state = ButtonState::new();
        assert!(state.committed_level);
        assert_eq!(state.hold_us, crate::config::HOLD_MS * MS);
    }

    #[test]
    fn test_clean_press_commits_after_hold() {
        let mut state = ButtonState::new();
        assert_eq!(state.poll(false, 0), None);
        assert_eq!(state.poll(false, HOLD_US - 1), None);
        assert_eq!(state.poll(false, HOLD_US), Some(Click));
        assert!(!state.committed_level);

        // Holding the button does not repeat the click
        assert_eq!(state.poll(false, HOLD_US + 100 * MS), None);
    }

    #[test]
    fn test_release_commits_silently() {
        let mut state = ButtonState::new();
        state.poll(false, 0);
        assert_eq!(state.poll(false, HOLD_US), Some(Click));

        let release_at = 200 * MS;
        assert_eq!(state.poll(true, release_at), None);
        assert_eq!(state.poll(true, release_at + HOLD_US), None);
        assert!(state.committed_level);
    }

    #[test]
    fn test_bouncy_press_yields_one_click() {
        let mut state = ButtonState::new();
        let clicks = count_clicks(
            &mut state,
            &[
                (20, true),
                // Contact bounce on press
                (5, false),
                (5, true),
                (5, false),
                (10, true),
                (5, false),
                // Settled pressed
                (60, false),
                // Bounce on release
                (5, true),
                (5, false),
                (5, true),
                // Settled released
                (60, true),
            ],
        );
        assert_eq!(clicks, 1);
        assert!(state.committed_level);
    }

    #[test]
    fn test_never_settling_chatter_yields_no_click() {
        let mut state = ButtonState::new();
        let mut segments = [(0u64, true); 200];
        for (i, segment) in segments.iter_mut().enumerate() {
            *segment = (5, i % 2 == 0);
        }
        assert_eq!(count_clicks(&mut state, &segments), 0);
        assert!(state.committed_level);
    }

    #[test]
    fn test_presses_faster_than_hold_coalesce() {
        let mut state = ButtonState::new();
        let clicks = count_clicks(&mut state, &[(20, false), (15, true), (60, false), (60, true)]);
        assert_eq!(clicks, 1);
    }

    #[test]
    fn test_separate_presses_each_click() {
        let mut state = ButtonState::new();
        let clicks = count_clicks(
            &mut state,
            &[(60, false), (60, true), (60, false), (60, true), (60, false)],
        );
        assert_eq!(clicks, 3);
    }

    #[test]
    fn test_custom_hold() {
        let mut state = ButtonState::with_hold(0);
        assert_eq!(state.poll(false, 7), Some(Click));
        assert_eq!(state.poll(true, 8), None);
        assert_eq!(state.poll(false, 9), Some(Click));
    }
}
