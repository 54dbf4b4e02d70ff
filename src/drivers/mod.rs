//! Hardware drivers for the monitor.
//!
//! - `hd44780`: 20x4 character LCD behind a PCF8574 I2C backpack

mod hd44780;

pub use hd44780::{Hd44780, LcdError};
