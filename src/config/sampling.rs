//! Sampling, averaging and scheduling configuration.
//!
//! All option lists are compile-time constants with validation assertions.
//! An empty list or a zero entry fails the build instead of reaching the
//! division in the period/average computations.

// =============================================================================
// Operator-Selectable Options
// =============================================================================

/// Sample rates (Hz) cycled by the rate button.
pub const RATE_OPTIONS_HZ: [u32; 3] = [500, 1000, 5000];

/// Sliding-window lengths cycled by the window button.
pub const WINDOW_OPTIONS: [usize; 4] = [8, 32, 128, 512];

/// Rate selected at power-up (1000 Hz).
pub const DEFAULT_RATE_INDEX: usize = 1;

/// Window selected at power-up (8 samples).
pub const DEFAULT_WINDOW_INDEX: usize = 0;

/// Number of slots in the sample ring. Must hold the largest window.
pub const RING_CAPACITY: usize = 512;

const _: () = assert!(!RATE_OPTIONS_HZ.is_empty());
const _: () = assert!(!WINDOW_OPTIONS.is_empty());
const _: () = assert!(DEFAULT_RATE_INDEX < RATE_OPTIONS_HZ.len());
const _: () = assert!(DEFAULT_WINDOW_INDEX < WINDOW_OPTIONS.len());
const _: () = {
    let mut i = 0;
    while i < RATE_OPTIONS_HZ.len() {
        assert!(RATE_OPTIONS_HZ[i] > 0 && RATE_OPTIONS_HZ[i] <= 1_000_000);
        i += 1;
    }
};
const _: () = {
    let mut i = 0;
    while i < WINDOW_OPTIONS.len() {
        assert!(WINDOW_OPTIONS[i] > 0 && WINDOW_OPTIONS[i] <= RING_CAPACITY);
        i += 1;
    }
};

// =============================================================================
// Scheduler Periods
// =============================================================================

/// Button poll period in microseconds.
pub const BUTTON_POLL_PERIOD_US: u64 = 5_000;

/// Display refresh period in microseconds (independent of sample rate).
pub const DISPLAY_PERIOD_US: u64 = 1_000_000;

/// Fixed wait between loop iterations. Coarse scheduling tick.
/// Shorter than the fastest sample period (200 µs at 5 kHz).
pub const LOOP_TICK_US: u64 = 100;

// =============================================================================
// Debounce
// =============================================================================

/// Time a raw button level must hold steady before it is committed.
pub const HOLD_MS: u64 = 40;

/// [`HOLD_MS`] in scheduler units.
pub const HOLD_US: u64 = HOLD_MS * 1_000;

const _: () = assert!(BUTTON_POLL_PERIOD_US < HOLD_US);
const _: () = assert!(LOOP_TICK_US < BUTTON_POLL_PERIOD_US);
