//! Character display configuration.
//!
//! The monitor drives a 20x4 HD44780-compatible LCD through a PCF8574 I2C
//! backpack. Every line handed to the display is padded to [`LCD_COLUMNS`]
//! so that shorter text overwrites stale trailing characters.

/// Number of character columns per row.
pub const LCD_COLUMNS: usize = 20;

/// Number of physical rows.
pub const LCD_ROWS: usize = 4;

/// 7-bit I2C address of the PCF8574 backpack (A0..A2 pulled high).
pub const LCD_I2C_ADDR: u8 = 0x27;

/// I2C bus clock for the backpack (standard mode).
pub const LCD_I2C_FREQUENCY_HZ: u32 = 100_000;

/// DDRAM base address of each row on a 20x4 module.
///
/// Rows 2 and 3 continue rows 0 and 1 in controller memory, hence the
/// interleaved offsets.
pub const LCD_ROW_OFFSETS: [u8; LCD_ROWS] = [0x00, 0x40, 0x14, 0x54];

const _: () = assert!(LCD_COLUMNS > 0 && LCD_COLUMNS <= 40);
