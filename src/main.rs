//! Temperature/light monitor firmware for Raspberry Pi Pico (RP2040)
//!
//! Samples an LM35 and an LDR divider, averages them over a selectable
//! sliding window and shows the result on a 20x4 HD44780 LCD.
//!
//! # Wiring
//!
//! | Function | Pin |
//! |----------|-----|
//! | LM35 output | GPIO26 (ADC0) |
//! | LDR divider | GPIO27 (ADC1) |
//! | Rate button (to GND) | GPIO15 |
//! | Window button (to GND) | GPIO14 |
//! | LCD SDA / SCL (I2C0) | GPIO4 / GPIO5 |
//!
//! # Button Controls
//!
//! - **Rate**: Cycle sample rate (500 → 1000 → 5000 Hz)
//! - **Window**: Cycle averaging window (8 → 32 → 128 → 512 samples)
//!
//! Host builds compile an empty `main` so `cargo test` can run on the
//! development machine; the firmware itself only exists for ARM targets.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod analog;

#[cfg(target_arch = "arm")]
use {
    core::cell::RefCell,
    defmt::{debug, info, warn},
    embassy_executor::Spawner,
    embassy_rp::adc::{self, Adc, Channel},
    embassy_rp::gpio::{Input, Pull},
    embassy_rp::i2c::{self, I2c},
    embassy_time::{Delay, Instant, Timer},
    sensor_monitor::config::{LCD_I2C_ADDR, LCD_I2C_FREQUENCY_HZ, LOOP_TICK_US},
    sensor_monitor::drivers::Hd44780,
    sensor_monitor::sensors::{AnalogConfig, Ldr, Lm35},
    sensor_monitor::{Board, Monitor, SampleOutcome, StepReport},
    static_cell::StaticCell,
    {defmt_rtt as _, panic_probe as _},
};

#[cfg(target_arch = "arm")]
use crate::analog::{AdcChannel, SharedAdc};

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sensor monitor starting...");

    let p = embassy_rp::init(Default::default());

    // =========================================================================
    // Analog front-ends
    // =========================================================================

    let adc: SharedAdc<'_> = SharedAdc::new(RefCell::new(Adc::new_blocking(p.ADC, adc::Config::default())));
    let analog_config = AnalogConfig::default();
    let temperature = Lm35::new(
        AdcChannel::new(&adc, Channel::new_pin(p.PIN_26, Pull::None)),
        analog_config,
    );
    let light = Ldr::new(
        AdcChannel::new(&adc, Channel::new_pin(p.PIN_27, Pull::None)),
        analog_config,
    );
    info!(
        "ADC ready: vref {} mV, {} conversions per reading",
        analog_config.reference_mv(),
        analog_config.oversample()
    );

    // =========================================================================
    // Display
    // =========================================================================

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = LCD_I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut lcd = Hd44780::new(i2c, Delay, LCD_I2C_ADDR);
    if lcd.init().is_ok() {
        info!("LCD initialized at 0x{:02x}", LCD_I2C_ADDR);
    } else {
        warn!("LCD init failed at 0x{:02x}, retrying after each failed refresh", LCD_I2C_ADDR);
    }

    // =========================================================================
    // Buttons (active-low, internal pull-ups)
    // =========================================================================

    let rate_button = Input::new(p.PIN_15, Pull::Up);
    let window_button = Input::new(p.PIN_14, Pull::Up);
    info!("Buttons initialized!");

    let mut board = Board {
        temperature,
        light,
        display: lcd,
        rate_button,
        window_button,
    };

    // 512-entry ring; keep it off the task stack
    static MONITOR: StaticCell<Monitor> = StaticCell::new();
    let start_us = Instant::now().as_micros();
    let monitor: &'static mut Monitor = MONITOR.init_with(|| Monitor::new(start_us));

    info!(
        "Main loop starting: {} Hz, window {}",
        monitor.selector().rate_hz(),
        monitor.selector().window_length()
    );

    loop {
        let report = monitor.step(Instant::now().as_micros(), &mut board);
        log_report(&report, monitor);

        // A failed write may have left the controller out of sync: re-init,
        // which clears the screen, and repaint everything on the next refresh.
        if report.refresh.is_some_and(|stats| stats.write_errors > 0) && board.display.init().is_ok() {
            monitor.invalidate_display();
            info!("LCD re-initialized");
        }

        Timer::after_micros(LOOP_TICK_US).await;
    }
}

#[cfg(target_arch = "arm")]
fn log_report(
    report: &StepReport,
    monitor: &Monitor,
) {
    if let Some(rate_hz) = report.input.new_rate_hz {
        info!("Sample rate: {} Hz", rate_hz);
    }
    if let Some(window) = report.input.new_window {
        info!("Window: {} samples", window);
    }

    match report.sample {
        Some(SampleOutcome::TemperatureFailed) => {
            warn!("Temperature read failed ({} dropped)", monitor.sample_errors());
        }
        Some(SampleOutcome::LightFailed) => {
            warn!("Light read failed ({} dropped)", monitor.sample_errors());
        }
        _ => {}
    }

    if let Some(stats) = report.refresh {
        if stats.write_errors > 0 {
            warn!("LCD write failed on {} rows", stats.write_errors);
        }
        debug!("Refresh: {}", stats);
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
