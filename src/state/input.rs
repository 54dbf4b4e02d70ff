//! Input handling for button events.
//!
//! Reads both buttons, runs them through their debouncers and converts the
//! resulting clicks into selection changes.

use embedded_hal::digital::InputPin;

use super::{ButtonState, Selector};

/// Result of processing button inputs for a single poll tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct InputResult {
    /// New sample rate (Hz) if the rate button clicked.
    pub new_rate_hz: Option<u32>,
    /// New window length if the window button clicked.
    pub new_window: Option<usize>,
}

impl InputResult {
    /// Whether any selection changed this tick.
    #[inline]
    pub const fn changed(&self) -> bool { self.new_rate_hz.is_some() || self.new_window.is_some() }
}

/// Debounce state for the two selection buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct Buttons {
    pub rate: ButtonState,
    pub window: ButtonState,
}

impl Buttons {
    pub const fn new() -> Self {
        Self {
            rate: ButtonState::new(),
            window: ButtonState::new(),
        }
    }
}

/// Read an active-low line. A failed read counts as released.
#[inline]
pub fn read_level<P: InputPin>(pin: &mut P) -> bool { pin.is_high().unwrap_or(true) }

/// Process raw button levels and apply clicks to the selector.
///
/// # Arguments
///
/// * `buttons` - Debounce state for both buttons
/// * `selector` - Rate/window selection to advance on click
/// * `rate_level` - Instantaneous level of the rate button (`false` = pressed)
/// * `window_level` - Instantaneous level of the window button (`false` = pressed)
/// * `now_us` - Current time in microseconds
///
/// # Returns
///
/// An `InputResult` describing which selections changed.
pub fn process_buttons(
    buttons: &mut Buttons,
    selector: &mut Selector,
    rate_level: bool,
    window_level: bool,
    now_us: u64,
) -> InputResult {
    let mut result = InputResult::default();

    if buttons.rate.poll(rate_level, now_us).is_some() {
        result.new_rate_hz = Some(selector.advance_rate());
    }

    if buttons.window.poll(window_level, now_us).is_some() {
        result.new_window = Some(selector.advance_window());
    }

    result
}
