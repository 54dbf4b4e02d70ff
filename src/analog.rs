//! RP2040 ADC glue.
//!
//! The LM35 and LDR share the single on-chip ADC. Each sensor owns its
//! [`Channel`] and borrows the converter through a blocking mutex, so the
//! two front-ends never need to know about each other.

use core::cell::RefCell;

use embassy_rp::adc::{Adc, Blocking, Channel, Error};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use sensor_monitor::sensors::AdcSource;

/// The converter, shared by every channel on the single executor thread.
pub type SharedAdc<'d> = Mutex<NoopRawMutex, RefCell<Adc<'d, Blocking>>>;

/// One ADC input pin bound to the shared converter.
pub struct AdcChannel<'a, 'd> {
    adc: &'a SharedAdc<'d>,
    channel: Channel<'d>,
}

impl<'a, 'd> AdcChannel<'a, 'd> {
    pub const fn new(
        adc: &'a SharedAdc<'d>,
        channel: Channel<'d>,
    ) -> Self {
        Self { adc, channel }
    }
}

impl AdcSource for AdcChannel<'_, '_> {
    type Error = Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        let channel = &mut self.channel;
        self.adc.lock(|adc| adc.borrow_mut().blocking_read(channel))
    }
}
