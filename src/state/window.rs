//! Sliding-window accumulator over the sample ring.
//!
//! Keeps the most recent `N` readings in a fixed ring and maintains running
//! sums over the last `K` of them, where `K` is the selected window length.
//!
//! # Complexity
//!
//! - [`WindowAccumulator::push`] is O(1): add the new reading and, once the
//!   window is full, subtract the reading that falls out of it.
//! - [`WindowAccumulator::set_window_length`] is O(K): the ring keeps no
//!   per-K history, so the sums are rebuilt from the newest `K` entries.
//!
//! # Exact Sums
//!
//! The ring stores temperature as fixed-point centi-degrees (`i32`) and light
//! as millivolts (`u32`); both sums are integers (`i64`, `u64`). Subtracting
//! an evicted entry therefore undoes its addition exactly, whatever the
//! magnitudes involved, and the incremental sums always equal a full scan.
//! Readings outside the `i32` centi-degree range saturate and NaN stores as 0.

use crate::config::RING_CAPACITY;

/// Fixed-point scale of stored temperatures (0.01 °C).
const CENTI_PER_DEGREE: f64 = 100.0;

/// One reading from each sensor, taken in the same sample tick.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Sample {
    /// LM35 temperature in degrees Celsius.
    pub temperature_c: f32,
    /// LDR divider voltage in millivolts.
    pub light_mv: u32,
}

impl Sample {
    pub const fn new(
        temperature_c: f32,
        light_mv: u32,
    ) -> Self {
        Self {
            temperature_c,
            light_mv,
        }
    }
}

/// Windowed means. Zero until the first sample is pushed.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Average {
    pub temperature_c: f32,
    pub light_mv: f32,
}

/// Ring entry in integer units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Entry {
    centi_c: i32,
    light_mv: u32,
}

impl Entry {
    const ZERO: Self = Self { centi_c: 0, light_mv: 0 };

    fn from_sample(sample: Sample) -> Self {
        Self {
            centi_c: celsius_to_centi(sample.temperature_c),
            light_mv: sample.light_mv,
        }
    }

    fn to_sample(self) -> Sample { Sample::new((f64::from(self.centi_c) / CENTI_PER_DEGREE) as f32, self.light_mv) }
}

/// Round half away from zero to 0.01 °C. `as` saturates and maps NaN to 0.
fn celsius_to_centi(celsius: f32) -> i32 {
    let scaled = f64::from(celsius) * CENTI_PER_DEGREE;
    let rounded = if scaled < 0.0 { scaled - 0.5 } else { scaled + 0.5 };
    rounded as i32
}

/// Fixed-capacity ring with O(1) sliding sums.
pub struct WindowAccumulator<const N: usize = RING_CAPACITY> {
    entries: [Entry; N],
    /// Next slot to write.
    write_cursor: usize,
    /// Number of valid entries (saturates at `N`).
    filled: usize,
    /// Selected window length `K` (1..=N).
    window: usize,
    sum_centi_c: i64,
    sum_light: u64,
}

impl<const N: usize> WindowAccumulator<N> {
    const CAPACITY_OK: () = assert!(N > 0, "ring capacity must be non-zero");

    /// Create an empty accumulator with window length `window`.
    pub const fn new(window: usize) -> Self {
        let () = Self::CAPACITY_OK;
        Self {
            entries: [Entry::ZERO; N],
            write_cursor: 0,
            filled: 0,
            window: Self::clamp_window(window),
            sum_centi_c: 0,
            sum_light: 0,
        }
    }

    /// Guard against a degenerate window: 0 becomes 1, oversize clamps to `N`.
    const fn clamp_window(window: usize) -> usize {
        if window == 0 {
            1
        } else if window > N {
            N
        } else {
            window
        }
    }

    /// Ring capacity.
    #[inline]
    pub const fn capacity(&self) -> usize { N }

    /// Selected window length.
    #[inline]
    pub const fn window_length(&self) -> usize { self.window }

    /// Number of entries written so far (saturates at capacity).
    #[inline]
    pub const fn filled(&self) -> usize { self.filled }

    /// Number of entries currently inside the window.
    #[inline]
    pub const fn len(&self) -> usize { if self.filled < self.window { self.filled } else { self.window } }

    /// True before the first push.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.filled == 0 }

    /// Ring slot holding the entry `age` pushes ago (0 = newest).
    #[inline]
    const fn slot(
        &self,
        age: usize,
    ) -> usize {
        (self.write_cursor + N - 1 - age) % N
    }

    /// Record one sample.
    pub fn push(
        &mut self,
        sample: Sample,
    ) {
        let entry = Entry::from_sample(sample);

        // Window already full: the entry K slots behind the cursor falls out.
        // Checked before writing because for K == N that slot is overwritten.
        if self.len() == self.window {
            let evicted = self.entries[(self.write_cursor + N - self.window) % N];
            self.sum_centi_c -= i64::from(evicted.centi_c);
            self.sum_light -= u64::from(evicted.light_mv);
        }

        self.entries[self.write_cursor] = entry;
        self.write_cursor = (self.write_cursor + 1) % N;
        if self.filled < N {
            self.filled += 1;
        }

        self.sum_centi_c += i64::from(entry.centi_c);
        self.sum_light += u64::from(entry.light_mv);
    }

    /// Change the window length and rebuild the sums from the ring.
    pub fn set_window_length(
        &mut self,
        window: usize,
    ) {
        self.window = Self::clamp_window(window);
        self.recompute();
    }

    /// Rebuild the running sums from the newest `min(filled, K)` entries.
    pub fn recompute(&mut self) {
        let (centi_c, light) = self.scan_sums();
        self.sum_centi_c = centi_c;
        self.sum_light = light;
    }

    fn scan_sums(&self) -> (i64, u64) {
        let mut centi_c = 0i64;
        let mut light = 0u64;
        for age in 0..self.len() {
            let entry = &self.entries[self.slot(age)];
            centi_c += i64::from(entry.centi_c);
            light += u64::from(entry.light_mv);
        }
        (centi_c, light)
    }

    /// Windowed means; zero when empty.
    pub fn average(&self) -> Average {
        let have = self.len();
        if have == 0 {
            return Average::default();
        }
        Average {
            temperature_c: (self.sum_centi_c as f64 / have as f64 / CENTI_PER_DEGREE) as f32,
            light_mv: (self.sum_light as f64 / have as f64) as f32,
        }
    }

    /// Most recently pushed sample, at 0.01 °C resolution.
    pub fn latest(&self) -> Option<Sample> {
        if self.filled == 0 {
            None
        } else {
            Some(self.entries[self.slot(0)].to_sample())
        }
    }
}

impl Default for WindowAccumulator<RING_CAPACITY> {
    fn default() -> Self { Self::new(crate::config::WINDOW_OPTIONS[crate::config::DEFAULT_WINDOW_INDEX]) }
}

// =============================================================================
// Unit Tests
// =============================================================================
