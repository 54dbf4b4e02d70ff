//! Sample-rate and window-length selection.
//!
//! Each button cycles through a fixed, ordered option list:
//!
//! | Button | Options | Power-up |
//! |--------|---------|----------|
//! | Rate   | 500 / 1000 / 5000 Hz | 1000 Hz |
//! | Window | 8 / 32 / 128 / 512 samples | 8 |

use crate::config::{DEFAULT_RATE_INDEX, DEFAULT_WINDOW_INDEX, RATE_OPTIONS_HZ, WINDOW_OPTIONS};

/// Cursor into an immutable, non-empty option list.
#[derive(Clone, Copy, Debug)]
pub struct OptionCycle<T: Copy + 'static> {
    options: &'static [T],
    index: usize,
}

impl<T: Copy + 'static> OptionCycle<T> {
    /// Create a cursor at `index`. An out-of-range index falls back to 0.
    ///
    /// `options` must not be empty; the configured lists are checked at
    /// compile time.
    pub const fn new(
        options: &'static [T],
        index: usize,
    ) -> Self {
        let index = if index < options.len() { index } else { 0 };
        Self { options, index }
    }

    /// Currently selected option.
    #[inline]
    pub fn current(&self) -> T { self.options[self.index] }

    /// Current index into the option list.
    #[inline]
    pub const fn index(&self) -> usize { self.index }

    /// Number of options in the list.
    #[inline]
    pub const fn len(&self) -> usize { self.options.len() }

    /// Always false for configured lists.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.options.is_empty() }

    /// Step to the next option (wrapping) and return it.
    pub fn advance(&mut self) -> T {
        self.index = (self.index + 1) % self.options.len();
        self.current()
    }
}

/// Operator selection state for sample rate and window length.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    rate: OptionCycle<u32>,
    window: OptionCycle<usize>,
}

impl Selector {
    /// Power-up selection (1000 Hz, 8 samples).
    pub const fn new() -> Self { Self::with_indices(DEFAULT_RATE_INDEX, DEFAULT_WINDOW_INDEX) }

    /// Selection starting at explicit indices into the configured lists.
    pub const fn with_indices(
        rate_index: usize,
        window_index: usize,
    ) -> Self {
        Self {
            rate: OptionCycle::new(&RATE_OPTIONS_HZ, rate_index),
            window: OptionCycle::new(&WINDOW_OPTIONS, window_index),
        }
    }

    /// Selected sample rate in Hz.
    #[inline]
    pub fn rate_hz(&self) -> u32 { self.rate.current() }

    /// Selected window length in samples.
    #[inline]
    pub fn window_length(&self) -> usize { self.window.current() }

    /// Index of the selected rate.
    #[inline]
    pub const fn rate_index(&self) -> usize { self.rate.index() }

    /// Index of the selected window length.
    #[inline]
    pub const fn window_index(&self) -> usize { self.window.index() }

    /// Sample period for the selected rate.
    #[inline]
    pub fn sample_period_us(&self) -> u64 { period_us(self.rate_hz()) }

    /// Cycle to the next rate and return it.
    pub fn advance_rate(&mut self) -> u32 { self.rate.advance() }

    /// Cycle to the next window length and return it.
    pub fn advance_window(&mut self) -> usize { self.window.advance() }
}

impl Default for Selector {
    fn default() -> Self { Self::new() }
}

/// Convert a rate in Hz to a period in microseconds.
///
/// A 0 Hz rate falls back to the power-up rate; the period never drops below
/// 1 µs.
pub const fn period_us(rate_hz: u32) -> u64 {
    let rate_hz = if rate_hz == 0 {
        RATE_OPTIONS_HZ[DEFAULT_RATE_INDEX]
    } else {
        rate_hz
    };
    let period = 1_000_000 / rate_hz as u64;
    if period == 0 { 1 } else { period }
}

// =============================================================================
// Unit Tests
// =============================================================================
