//! Application configuration.
//!
//! - `layout`: Character display dimensions
//! - `sampling`: Rate/window option lists, scheduler periods, debounce hold
//! - `sensors`: Analog front-end defaults (reference voltage, oversampling)

pub mod layout;
pub mod sampling;
pub mod sensors;

// Re-export layout constants at config level for convenience
pub use layout::{LCD_COLUMNS, LCD_I2C_ADDR, LCD_I2C_FREQUENCY_HZ, LCD_ROWS};
// Re-export sampling constants at config level for convenience
pub use sampling::{
    BUTTON_POLL_PERIOD_US,
    DEFAULT_RATE_INDEX,
    DEFAULT_WINDOW_INDEX,
    DISPLAY_PERIOD_US,
    HOLD_MS,
    HOLD_US,
    LOOP_TICK_US,
    RATE_OPTIONS_HZ,
    RING_CAPACITY,
    WINDOW_OPTIONS,
};
// Re-export sensor defaults at config level for convenience
pub use sensors::{ADC_FULL_SCALE, DEFAULT_OVERSAMPLE, DEFAULT_REFERENCE_MV, LM35_MV_PER_DEGREE};
