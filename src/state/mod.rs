//! State management for the monitor.
//!
//! - `button`: Button debounce handling
//! - `selector`: Sample-rate and window-length option cycling
//! - `window`: Sliding-window accumulator over the sample ring
//! - `extrema`: Session min/max tracking
//! - `input`: Button input processing and selection dispatch

mod button;
mod extrema;
mod input;
mod selector;
mod window;

pub use button::{ButtonState, Click};
pub use extrema::{MinMax, SessionExtrema};
pub use input::{Buttons, InputResult, process_buttons, read_level};
pub use selector::{OptionCycle, Selector, period_us};
pub use window::{Average, Sample, WindowAccumulator};
