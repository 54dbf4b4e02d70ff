//! Session-lifetime minimum/maximum tracking.
//!
//! Bounds only ever widen; nothing resets them short of a power cycle.

use super::window::Sample;

/// Widening `[min, max]` range. `None` until the first value.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MinMax<T> {
    bounds: Option<(T, T)>,
}

impl<T: Copy + PartialOrd> MinMax<T> {
    /// Empty (unreached) range.
    pub const fn new() -> Self { Self { bounds: None } }

    /// Widen the range to include `value`.
    pub fn update(
        &mut self,
        value: T,
    ) {
        self.bounds = match self.bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((
                if value < min { value } else { min },
                if value > max { value } else { max },
            )),
        };
    }

    /// Smallest value seen.
    #[inline]
    pub fn min(&self) -> Option<T> { self.bounds.map(|(min, _)| min) }

    /// Largest value seen.
    #[inline]
    pub fn max(&self) -> Option<T> { self.bounds.map(|(_, max)| max) }

    /// Both bounds, if any value has been seen.
    #[inline]
    pub const fn bounds(&self) -> Option<(T, T)> { self.bounds }
}

impl<T: Copy + PartialOrd> Default for MinMax<T> {
    fn default() -> Self { Self::new() }
}

/// Extrema of both sensors since power-up.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SessionExtrema {
    pub temperature_c: MinMax<f32>,
    pub light_mv: MinMax<u32>,
}

impl SessionExtrema {
    pub const fn new() -> Self {
        Self {
            temperature_c: MinMax::new(),
            light_mv: MinMax::new(),
        }
    }

    /// Widen both ranges with one sample.
    pub fn record(
        &mut self,
        sample: &Sample,
    ) {
        self.temperature_c.update(sample.temperature_c);
        self.light_mv.update(sample.light_mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreached_before_first_sample() {
        let extrema = SessionExtrema::new();
        assert_eq!(extrema.temperature_c.bounds(), None);
        assert_eq!(extrema.light_mv.min(), None);
    }

    #[test]
    fn test_first_sample_sets_both_bounds() {
        let mut extrema = SessionExtrema::new();
        extrema.record(&Sample::new(21.5, 800));
        assert_eq!(extrema.temperature_c.bounds(), Some((21.5, 21.5)));
        assert_eq!(extrema.light_mv.bounds(), Some((800, 800)));
    }

    #[test]
    fn test_bounds_only_widen() {
        let mut extrema = SessionExtrema::new();
        for (t, l) in [(22.0, 500), (19.5, 900), (25.0, 100), (21.0, 600)] {
            extrema.record(&Sample::new(t, l));
        }
        assert_eq!(extrema.temperature_c.min(), Some(19.5));
        assert_eq!(extrema.temperature_c.max(), Some(25.0));
        assert_eq!(extrema.light_mv.bounds(), Some((100, 900)));
    }
}
