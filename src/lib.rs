//! Sensor monitor library - testable modules for the temperature/light monitor.
//!
//! This library contains the core logic that can be tested on the host machine.
//! The binary (`main.rs`) uses this library and adds the RP2040-specific glue
//! (ADC channels, GPIO, I2C, timer).
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux
//! cargo test --lib --target aarch64-apple-darwin      # macOS
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no ARM dependencies) ===

// Configuration
pub mod config;

// Control loop
pub mod monitor;
pub mod scheduler;
pub mod state;

// Rendering
pub mod render;

// Collaborators (generic over embedded-hal / library traits)
pub mod drivers;
pub mod sensors;

pub use monitor::{Board, Monitor, SampleOutcome, StepReport};
