//! HD44780 character LCD driven through a PCF8574 I2C port expander.
//!
//! The expander's eight outputs map onto the LCD bus in 4-bit mode:
//!
//! | Bit | Signal |
//! |-----|--------|
//! | 0 | RS (register select) |
//! | 1 | RW (held low, write only) |
//! | 2 | E (enable strobe) |
//! | 3 | Backlight |
//! | 4-7 | D4-D7 |
//!
//! Every byte is sent as two nibbles, each latched by pulsing E. The
//! backlight bit is set on every write. The driver is blocking and generic
//! over embedded-hal 1.0 `I2c` and `DelayNs`.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::layout::LCD_ROW_OFFSETS;
use crate::config::{LCD_COLUMNS, LCD_ROWS};
use crate::render::TextDisplay;

// Expander bits
const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

// HD44780 commands
const CLEAR_DISPLAY: u8 = 0x01;
const ENTRY_MODE_INCREMENT: u8 = 0x06;
const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
const SET_DDRAM_ADDR: u8 = 0x80;

// Raw nibbles of the 4-bit wake-up sequence
const WAKE_8BIT: u8 = 0x30;
const WAKE_4BIT: u8 = 0x20;

/// Driver error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LcdError<E> {
    /// I2C transfer failed.
    Bus(E),
    /// Cursor position outside the 20x4 grid.
    Position { row: u8, col: u8 },
}

/// 20x4 HD44780 behind a PCF8574 backpack.
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Hd44780<I2C, D> {
    /// Wrap the bus; call [`Self::init`] before writing.
    pub const fn new(
        i2c: I2C,
        delay: D,
        address: u8,
    ) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Run the 4-bit initialization sequence and clear the screen.
    pub fn init(&mut self) -> Result<(), LcdError<I2C::Error>> {
        // Power-on settle, expander outputs low apart from backlight
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        self.write_nibble(WAKE_8BIT)?;
        self.delay.delay_us(4_500);
        self.write_nibble(WAKE_8BIT)?;
        self.delay.delay_us(4_500);
        self.write_nibble(WAKE_8BIT)?;
        self.delay.delay_us(150);
        self.write_nibble(WAKE_4BIT)?;

        self.command(FUNCTION_SET_4BIT_2LINE)?;
        self.command(DISPLAY_ON_CURSOR_OFF)?;
        self.command(ENTRY_MODE_INCREMENT)?;
        self.clear()
    }

    /// Blank all rows and home the cursor.
    pub fn clear(&mut self) -> Result<(), LcdError<I2C::Error>> {
        self.command(CLEAR_DISPLAY)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn command(
        &mut self,
        cmd: u8,
    ) -> Result<(), LcdError<I2C::Error>> {
        self.send(cmd, 0)
    }

    fn write_data(
        &mut self,
        byte: u8,
    ) -> Result<(), LcdError<I2C::Error>> {
        self.send(byte, RS)
    }

    fn send(
        &mut self,
        byte: u8,
        mode: u8,
    ) -> Result<(), LcdError<I2C::Error>> {
        self.write_nibble((byte & 0xF0) | mode)?;
        self.write_nibble(((byte << 4) & 0xF0) | mode)
    }

    fn write_nibble(
        &mut self,
        bits: u8,
    ) -> Result<(), LcdError<I2C::Error>> {
        self.expander_write(bits | ENABLE)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(
        &mut self,
        bits: u8,
    ) -> Result<(), LcdError<I2C::Error>> {
        self.i2c.write(self.address, &[bits | BACKLIGHT]).map_err(LcdError::Bus)
    }
}

impl<I2C: I2c, D: DelayNs> TextDisplay for Hd44780<I2C, D> {
    type Error = LcdError<I2C::Error>;

    fn set_cursor(
        &mut self,
        row: u8,
        col: u8,
    ) -> Result<(), Self::Error> {
        if usize::from(row) >= LCD_ROWS || usize::from(col) >= LCD_COLUMNS {
            return Err(LcdError::Position { row, col });
        }
        self.command(SET_DDRAM_ADDR | (LCD_ROW_OFFSETS[usize::from(row)] + col))
    }

    /// Bytes outside printable ASCII are shown as `?`.
    fn print(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            let byte = if byte.is_ascii_graphic() || byte == b' ' { byte } else { b'?' };
            self.write_data(byte)?;
        }
        Ok(())
    }
}
