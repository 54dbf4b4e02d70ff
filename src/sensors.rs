//! Analog sensor front-ends.
//!
//! Both sensors sit on the same 12-bit ADC. A reading throws away one
//! conversion (the sample-and-hold settles after a channel switch) and then
//! takes the integer mean of `oversample` conversions.
//!
//! | Sensor | Output | Conversion |
//! |--------|--------|------------|
//! | LM35 | °C | `mV / 10` |
//! | LDR divider | mV | `raw * vref / 4095` |

use crate::config::{ADC_FULL_SCALE, DEFAULT_OVERSAMPLE, DEFAULT_REFERENCE_MV, LM35_MV_PER_DEGREE};

/// One ADC channel producing raw 12-bit conversions.
pub trait AdcSource {
    type Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

impl<S: AdcSource + ?Sized> AdcSource for &mut S {
    type Error = S::Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error> { (**self).read_raw() }
}

/// Temperature in degrees Celsius.
pub trait TemperatureSensor {
    type Error;

    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}

/// Light level as the divider voltage in millivolts.
pub trait LightSensor {
    type Error;

    fn read_millivolts(&mut self) -> Result<u32, Self::Error>;
}

// =============================================================================
// Conversion
// =============================================================================

/// Reference voltage and averaging depth for one front-end.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct AnalogConfig {
    reference_mv: u32,
    oversample: u16,
}

impl AnalogConfig {
    /// Zero values fall back to [`DEFAULT_REFERENCE_MV`] / [`DEFAULT_OVERSAMPLE`].
    pub const fn new(
        reference_mv: u32,
        oversample: u16,
    ) -> Self {
        Self {
            reference_mv: if reference_mv == 0 { DEFAULT_REFERENCE_MV } else { reference_mv },
            oversample: if oversample == 0 { DEFAULT_OVERSAMPLE } else { oversample },
        }
    }

    /// One conversion per reading.
    pub const fn single_shot(reference_mv: u32) -> Self { Self::new(reference_mv, 1) }

    #[inline]
    pub const fn reference_mv(&self) -> u32 { self.reference_mv }

    #[inline]
    pub const fn oversample(&self) -> u16 { self.oversample }

    /// One averaged reading from `source`, scaled to millivolts.
    pub fn read_millivolts<S: AdcSource>(
        &self,
        source: &mut S,
    ) -> Result<u32, S::Error> {
        let raw = read_averaged(source, self.oversample)?;
        Ok(raw_to_millivolts(raw, self.reference_mv))
    }
}

impl Default for AnalogConfig {
    fn default() -> Self { Self::new(DEFAULT_REFERENCE_MV, DEFAULT_OVERSAMPLE) }
}

/// Scale a raw conversion to millivolts.
#[inline]
pub const fn raw_to_millivolts(
    raw: u16,
    reference_mv: u32,
) -> u32 {
    (raw as u64 * reference_mv as u64 / ADC_FULL_SCALE as u64) as u32
}

/// LM35 transfer function.
#[inline]
pub fn millivolts_to_celsius(millivolts: u32) -> f32 { millivolts as f32 / LM35_MV_PER_DEGREE }

/// Discard one conversion, then return the integer mean of `oversample` more.
pub fn read_averaged<S: AdcSource>(
    source: &mut S,
    oversample: u16,
) -> Result<u16, S::Error> {
    let count = u32::from(oversample.max(1));

    source.read_raw()?;

    let mut sum = 0u32;
    for _ in 0..count {
        sum += u32::from(source.read_raw()?);
    }
    Ok((sum / count) as u16)
}

// =============================================================================
// Front-ends
// =============================================================================

/// LM35 linear temperature sensor (10 mV/°C).
pub struct Lm35<S> {
    source: S,
    config: AnalogConfig,
}

impl<S: AdcSource> Lm35<S> {
    pub const fn new(
        source: S,
        config: AnalogConfig,
    ) -> Self {
        Self { source, config }
    }

    #[inline]
    pub const fn config(&self) -> &AnalogConfig { &self.config }

    /// Averaged reading in millivolts.
    pub fn read_millivolts(&mut self) -> Result<u32, S::Error> { self.config.read_millivolts(&mut self.source) }
}

impl<S: AdcSource> TemperatureSensor for Lm35<S> {
    type Error = S::Error;

    fn read_celsius(&mut self) -> Result<f32, Self::Error> { self.read_millivolts().map(millivolts_to_celsius) }
}

/// Light-dependent resistor in a voltage divider.
pub struct Ldr<S> {
    source: S,
    config: AnalogConfig,
}

impl<S: AdcSource> Ldr<S> {
    pub const fn new(
        source: S,
        config: AnalogConfig,
    ) -> Self {
        Self { source, config }
    }

    #[inline]
    pub const fn config(&self) -> &AnalogConfig { &self.config }
}

impl<S: AdcSource> LightSensor for Ldr<S> {
    type Error = S::Error;

    fn read_millivolts(&mut self) -> Result<u32, Self::Error> { self.config.read_millivolts(&mut self.source) }
}
