//! Deadline-based cooperative scheduler.
//!
//! Three periodic activities share one loop iteration:
//!
//! | Activity | Period | On rate change |
//! |----------|--------|----------------|
//! | Button poll | [`BUTTON_POLL_PERIOD_US`] | unchanged |
//! | Sensor sample | `1e6 / rate` | phase reset to `now + period` |
//! | Display refresh | [`DISPLAY_PERIOD_US`] | unchanged |
//!
//! Deadlines advance by `next += period`, never `now + period`, so loop
//! latency does not accumulate into drift. A tick that is late runs on the
//! next iteration; there is no other catch-up logic.
//!
//! Time is a plain `u64` microsecond count so this module has no dependency
//! on a timer driver and can be tested on the host.

use crate::config::{BUTTON_POLL_PERIOD_US, DISPLAY_PERIOD_US};

/// One periodic deadline.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Deadline {
    next_us: u64,
    period_us: u64,
}

impl Deadline {
    /// First due at `start_us`. A zero period is raised to 1 µs.
    pub const fn new(
        start_us: u64,
        period_us: u64,
    ) -> Self {
        Self {
            next_us: start_us,
            period_us: if period_us == 0 { 1 } else { period_us },
        }
    }

    /// If the deadline has passed, advance it by one period and return true.
    pub fn poll(
        &mut self,
        now_us: u64,
    ) -> bool {
        if now_us >= self.next_us {
            self.next_us += self.period_us;
            true
        } else {
            false
        }
    }

    /// Replace the period and restart the phase at `now + period`.
    pub fn reset(
        &mut self,
        now_us: u64,
        period_us: u64,
    ) {
        self.period_us = if period_us == 0 { 1 } else { period_us };
        self.next_us = now_us + self.period_us;
    }

    /// Time of the next firing.
    #[inline]
    pub const fn next_us(&self) -> u64 { self.next_us }

    /// Current period.
    #[inline]
    pub const fn period_us(&self) -> u64 { self.period_us }
}

/// Scheduler state for the three activities.
#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    buttons: Deadline,
    sample: Deadline,
    display: Deadline,
}

impl Scheduler {
    /// All three activities first fire at `start_us`.
    pub const fn new(
        start_us: u64,
        sample_period_us: u64,
    ) -> Self {
        Self {
            buttons: Deadline::new(start_us, BUTTON_POLL_PERIOD_US),
            sample: Deadline::new(start_us, sample_period_us),
            display: Deadline::new(start_us, DISPLAY_PERIOD_US),
        }
    }

    /// Whether the button poll is due (advances its deadline if so).
    #[inline]
    pub fn buttons_due(
        &mut self,
        now_us: u64,
    ) -> bool {
        self.buttons.poll(now_us)
    }

    /// Whether a sample is due (advances its deadline if so).
    #[inline]
    pub fn sample_due(
        &mut self,
        now_us: u64,
    ) -> bool {
        self.sample.poll(now_us)
    }

    /// Whether a display refresh is due (advances its deadline if so).
    #[inline]
    pub fn display_due(
        &mut self,
        now_us: u64,
    ) -> bool {
        self.display.poll(now_us)
    }

    /// New sample period; the next sample fires at `now + period`.
    pub fn reschedule_sample(
        &mut self,
        now_us: u64,
        period_us: u64,
    ) {
        self.sample.reset(now_us, period_us);
    }

    #[inline]
    pub const fn sample_deadline(&self) -> &Deadline { &self.sample }

    #[inline]
    pub const fn display_deadline(&self) -> &Deadline { &self.display }

    #[inline]
    pub const fn button_deadline(&self) -> &Deadline { &self.buttons }
}

// =============================================================================
// Unit Tests
// =============================================================================
