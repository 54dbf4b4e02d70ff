//! Analog front-end defaults for the LM35 and LDR channels.

/// ADC reference voltage in millivolts (Pico ADC_VREF = 3V3 rail).
pub const DEFAULT_REFERENCE_MV: u32 = 3300;

/// Conversions averaged per reading when no explicit count is given.
pub const DEFAULT_OVERSAMPLE: u16 = 8;

/// Raw reading that corresponds to the reference voltage (12-bit ADC).
pub const ADC_FULL_SCALE: u32 = 4095;

/// LM35 transfer function: 10 mV per degree Celsius.
pub const LM35_MV_PER_DEGREE: f32 = 10.0;

const _: () = assert!(DEFAULT_REFERENCE_MV > 0);
const _: () = assert!(DEFAULT_OVERSAMPLE > 0);
