//! Application state and the per-iteration control step.
//!
//! [`Monitor`] owns every piece of mutable state: selection, sample ring,
//! session extrema, debounce state, deadlines and the display line cache.
//! The hardware it talks to is borrowed per call through [`Board`], so tests
//! drive it with plain mocks and the firmware with embassy-rp peripherals.
//!
//! # Loop Iteration
//!
//! ```text
//! step(now)
//!   ├─ buttons due? ── read both levels ── debounce ── click?
//!   │                                        ├─ window: resize + recompute
//!   │                                        └─ rate:   sample phase = now + period
//!   ├─ sample due?  ── read both sensors ── extrema ── push
//!   └─ display due? ── format 4 lines ── write changed rows
//! ```

use embedded_hal::digital::InputPin;

use crate::config::RING_CAPACITY;
use crate::render::{LineRenderer, Readout, RefreshStats, TextDisplay, format_lines};
use crate::scheduler::Scheduler;
use crate::sensors::{LightSensor, TemperatureSensor};
use crate::state::{Buttons, InputResult, Sample, Selector, SessionExtrema, WindowAccumulator, process_buttons, read_level};

/// Collaborators used by one loop iteration.
pub struct Board<T, L, D, R, W> {
    pub temperature: T,
    pub light: L,
    pub display: D,
    /// Active-low sample-rate button.
    pub rate_button: R,
    /// Active-low window-length button.
    pub window_button: W,
}

/// What happened to a due sample.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SampleOutcome {
    /// Both sensors read; the pair was pushed.
    Stored(Sample),
    /// Temperature read failed; sample dropped.
    TemperatureFailed,
    /// Light read failed; sample dropped.
    LightFailed,
}

impl SampleOutcome {
    #[inline]
    pub const fn is_stored(&self) -> bool { matches!(self, Self::Stored(_)) }
}

/// Summary of one [`Monitor::step`].
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct StepReport {
    /// Selection changes from this iteration's button poll.
    pub input: InputResult,
    /// Set when the sample deadline fired.
    pub sample: Option<SampleOutcome>,
    /// Set when the display deadline fired.
    pub refresh: Option<RefreshStats>,
}

/// All runtime state of the monitor.
pub struct Monitor<const N: usize = RING_CAPACITY> {
    selector: Selector,
    window: WindowAccumulator<N>,
    extrema: SessionExtrema,
    scheduler: Scheduler,
    buttons: Buttons,
    renderer: LineRenderer,
    sample_errors: u32,
    display_errors: u32,
}

impl<const N: usize> Monitor<N> {
    /// Power-up selection; every activity first runs at `start_us`.
    pub fn new(start_us: u64) -> Self { Self::with_selector(start_us, Selector::new()) }

    /// Start from an explicit selection.
    pub fn with_selector(
        start_us: u64,
        selector: Selector,
    ) -> Self {
        Self {
            window: WindowAccumulator::new(selector.window_length()),
            scheduler: Scheduler::new(start_us, selector.sample_period_us()),
            selector,
            extrema: SessionExtrema::new(),
            buttons: Buttons::new(),
            renderer: LineRenderer::new(),
            sample_errors: 0,
            display_errors: 0,
        }
    }

    /// Run every activity whose deadline has passed, in button, sample,
    /// display order.
    pub fn step<T, L, D, R, W>(
        &mut self,
        now_us: u64,
        board: &mut Board<T, L, D, R, W>,
    ) -> StepReport
    where
        T: TemperatureSensor,
        L: LightSensor,
        D: TextDisplay,
        R: InputPin,
        W: InputPin,
    {
        let mut report = StepReport::default();

        if self.scheduler.buttons_due(now_us) {
            let rate_level = read_level(&mut board.rate_button);
            let window_level = read_level(&mut board.window_button);
            report.input = self.handle_buttons(rate_level, window_level, now_us);
        }

        if self.scheduler.sample_due(now_us) {
            report.sample = Some(self.take_sample(&mut board.temperature, &mut board.light));
        }

        if self.scheduler.display_due(now_us) {
            report.refresh = Some(self.refresh(&mut board.display));
        }

        report
    }

    /// Debounce one pair of raw levels and apply any resulting clicks.
    pub fn handle_buttons(
        &mut self,
        rate_level: bool,
        window_level: bool,
        now_us: u64,
    ) -> InputResult {
        let result = process_buttons(&mut self.buttons, &mut self.selector, rate_level, window_level, now_us);

        if let Some(window) = result.new_window {
            self.window.set_window_length(window);
        }
        if result.new_rate_hz.is_some() {
            self.scheduler.reschedule_sample(now_us, self.selector.sample_period_us());
        }

        result
    }

    /// Read both sensors and record the pair. A failed read drops the sample.
    pub fn take_sample<T: TemperatureSensor, L: LightSensor>(
        &mut self,
        temperature: &mut T,
        light: &mut L,
    ) -> SampleOutcome {
        let Ok(temperature_c) = temperature.read_celsius() else {
            self.sample_errors = self.sample_errors.saturating_add(1);
            return SampleOutcome::TemperatureFailed;
        };
        let Ok(light_mv) = light.read_millivolts() else {
            self.sample_errors = self.sample_errors.saturating_add(1);
            return SampleOutcome::LightFailed;
        };

        let sample = Sample::new(temperature_c, light_mv);
        self.record(sample);
        SampleOutcome::Stored(sample)
    }

    /// Widen extrema and push into the window.
    pub fn record(
        &mut self,
        sample: Sample,
    ) {
        self.extrema.record(&sample);
        self.window.push(sample);
    }

    /// Snapshot of what the display should show.
    pub fn readout(&self) -> Readout {
        Readout {
            rate_hz: self.selector.rate_hz(),
            window: self.selector.window_length(),
            latest: self.window.latest(),
            average: self.window.average(),
            extrema: self.extrema,
        }
    }

    /// Format the current readout and write the rows that changed.
    pub fn refresh<D: TextDisplay>(
        &mut self,
        display: &mut D,
    ) -> RefreshStats {
        let lines = format_lines(&self.readout());
        let stats = self.renderer.render_all(display, &lines);
        self.display_errors = self.display_errors.saturating_add(u32::from(stats.write_errors));
        stats
    }

    /// Forget what the display shows, e.g. after the controller was
    /// re-initialized and cleared. The next refresh repaints every row.
    pub fn invalidate_display(&mut self) { self.renderer.invalidate(); }

    #[inline]
    pub const fn selector(&self) -> &Selector { &self.selector }

    #[inline]
    pub const fn window(&self) -> &WindowAccumulator<N> { &self.window }

    #[inline]
    pub const fn extrema(&self) -> &SessionExtrema { &self.extrema }

    #[inline]
    pub const fn scheduler(&self) -> &Scheduler { &self.scheduler }

    #[inline]
    pub const fn renderer(&self) -> &LineRenderer { &self.renderer }

    /// Samples dropped because a sensor read failed.
    #[inline]
    pub const fn sample_errors(&self) -> u32 { self.sample_errors }

    /// Row writes that failed.
    #[inline]
    pub const fn display_errors(&self) -> u32 { self.display_errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BUTTON_POLL_PERIOD_US, DISPLAY_PERIOD_US, HOLD_US, LCD_ROWS};
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::collections::VecDeque;

    /// Replays temperatures; `None` entries fail.
    struct ScriptedTemperature(VecDeque<Option<f32>>);

    impl TemperatureSensor for ScriptedTemperature {
        type Error = ();

        fn read_celsius(&mut self) -> Result<f32, ()> { self.0.pop_front().flatten().ok_or(()) }
    }

    struct ConstantLight(Option<u32>);

    impl LightSensor for ConstantLight {
        type Error = ();

        fn read_millivolts(&mut self) -> Result<u32, ()> { self.0.ok_or(()) }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        writes: usize,
        fail: bool,
    }

    impl TextDisplay for RecordingDisplay {
        type Error = ();

        fn set_cursor(
            &mut self,
            _row: u8,
            _col: u8,
        ) -> Result<(), ()> {
            Ok(())
        }

        fn print(
            &mut self,
            _text: &str,
        ) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes += 1;
            Ok(())
        }
    }

    struct LevelPin(bool);

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl InputPin for LevelPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(self.0) }

        fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(!self.0) }
    }

    type TestBoard = Board<ScriptedTemperature, ConstantLight, RecordingDisplay, LevelPin, LevelPin>;

    fn board(temperatures: impl IntoIterator<Item = f32>) -> TestBoard {
        Board {
            temperature: ScriptedTemperature(temperatures.into_iter().map(Some).collect()),
            light: ConstantLight(Some(1000)),
            display: RecordingDisplay::default(),
            rate_button: LevelPin(true),
            window_button: LevelPin(true),
        }
    }

    fn monitor() -> Monitor { Monitor::new(0) }

    /// Hold a button long enough to commit the press, then release it.
    fn click_window(
        monitor: &mut Monitor,
        at_us: u64,
    ) -> InputResult {
        monitor.handle_buttons(true, false, at_us);
        let result = monitor.handle_buttons(true, false, at_us + HOLD_US);
        monitor.handle_buttons(true, true, at_us + HOLD_US + 1);
        monitor.handle_buttons(true, true, at_us + 2 * HOLD_US + 1);
        result
    }

    #[test]
    fn test_power_up_state() {
        let monitor = monitor();
        assert_eq!(monitor.selector().rate_hz(), 1000);
        assert_eq!(monitor.selector().window_length(), 8);
        assert_eq!(monitor.window().window_length(), 8);
        assert!(monitor.window().is_empty());
        assert_eq!(monitor.extrema().temperature_c.bounds(), None);
    }

    #[test]
    fn test_average_of_last_eight() {
        let mut monitor = monitor();
        let mut board = board((20..30).map(|t| t as f32));
        for _ in 20..30 {
            assert!(monitor.take_sample(&mut board.temperature, &mut board.light).is_stored());
        }
        assert_eq!(monitor.window().average().temperature_c, 25.5);
        assert_eq!(monitor.window().average().light_mv, 1000.0);
        assert_eq!(monitor.extrema().temperature_c.bounds(), Some((20.0, 29.0)));
    }

    #[test]
    fn test_window_grow_then_fill() {
        let mut monitor = monitor();
        assert_eq!(click_window(&mut monitor, 0).new_window, Some(32));
        assert_eq!(monitor.window().window_length(), 32);

        let mut board = board((1..=20).map(|t| t as f32));
        for _ in 0..20 {
            monitor.take_sample(&mut board.temperature, &mut board.light);
        }
        assert_eq!(monitor.window().len(), 20);
        assert_eq!(monitor.window().average().temperature_c, 10.5);
    }

    #[test]
    fn test_window_shrink_recomputes() {
        let mut monitor = monitor();
        // 8 -> 32 -> 128 -> 512 -> 8
        for i in 0..3 {
            click_window(&mut monitor, i * 1_000_000);
        }
        for t in 0..100 {
            monitor.record(Sample::new(t as f32, 0));
        }
        assert_eq!(monitor.window().average().temperature_c, 49.5);
        assert_eq!(click_window(&mut monitor, 5_000_000).new_window, Some(8));
        // last 8: 92..99
        assert_eq!(monitor.window().average().temperature_c, 95.5);
    }

    #[test]
    fn test_rate_change_resets_sample_phase() {
        let mut monitor: Monitor = Monitor::with_selector(0, Selector::with_indices(0, 0));
        assert_eq!(monitor.scheduler().sample_deadline().period_us(), 2_000);

        monitor.handle_buttons(false, true, 1_000);
        let now = 1_000 + HOLD_US;
        let result = monitor.handle_buttons(false, true, now);
        assert_eq!(result.new_rate_hz, Some(1000));
        assert_eq!(monitor.scheduler().sample_deadline().next_us(), now + 1_000);
    }

    #[test]
    fn test_first_step_runs_everything() {
        let mut monitor = monitor();
        let mut board = board([21.0]);
        let report = monitor.step(0, &mut board);

        assert_eq!(report.input, InputResult::default());
        assert_eq!(report.sample, Some(SampleOutcome::Stored(Sample::new(21.0, 1000))));
        assert_eq!(report.refresh.map(|r| r.lines_written), Some(LCD_ROWS as u8));
        assert_eq!(board.display.writes, LCD_ROWS);
    }

    #[test]
    fn test_step_cadence_over_one_second() {
        let mut monitor = monitor();
        let mut board = board(core::iter::repeat_n(22.0, 2_000));
        let mut samples = 0;
        let mut refreshes = 0;
        let mut now = 0;
        while now < DISPLAY_PERIOD_US {
            let report = monitor.step(now, &mut board);
            samples += usize::from(report.sample.is_some());
            refreshes += usize::from(report.refresh.is_some());
            now += 100;
        }
        assert_eq!(samples, 1000);
        assert_eq!(refreshes, 1);
        assert_eq!(monitor.window().len(), 8);
    }

    #[test]
    fn test_button_press_through_step() {
        let mut monitor = monitor();
        let mut board = board(core::iter::repeat_n(22.0, 100));
        monitor.step(0, &mut board);

        board.window_button.0 = false;
        let mut changes = Vec::new();
        let mut now = BUTTON_POLL_PERIOD_US;
        while now <= BUTTON_POLL_PERIOD_US + 2 * HOLD_US {
            let report = monitor.step(now, &mut board);
            if report.input.changed() {
                changes.push(report.input);
            }
            now += BUTTON_POLL_PERIOD_US;
        }
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new_window, Some(32));
    }

    #[test]
    fn test_window_click_applies_to_sample_in_same_step() {
        let mut monitor = monitor();
        let mut board = board(core::iter::repeat_n(22.0, 100));
        board.window_button.0 = false;

        // Buttons every 5 ms, pressed from t=0: commits on the poll at HOLD_US.
        // The 1 kHz sample deadline is behind, so every poll step also samples.
        let mut now = 0;
        while now < HOLD_US {
            let report = monitor.step(now, &mut board);
            assert!(!report.input.changed());
            assert!(report.sample.is_some_and(|s| s.is_stored()));
            now += BUTTON_POLL_PERIOD_US;
        }
        assert_eq!(monitor.window().len(), 8);

        let report = monitor.step(HOLD_US, &mut board);
        assert_eq!(report.input.new_window, Some(32));
        assert_eq!(report.sample, Some(SampleOutcome::Stored(Sample::new(22.0, 1000))));
        // 9 samples so far, all inside the new window
        assert_eq!(monitor.window().window_length(), 32);
        assert_eq!(monitor.window().len(), 9);
        assert_eq!(monitor.window().filled(), 9);
    }

    #[test]
    fn test_rate_click_at_sample_deadline_defers_sample() {
        // 500 Hz: samples at every even millisecond
        let mut monitor: Monitor = Monitor::with_selector(0, Selector::with_indices(0, 0));
        let mut board = board(core::iter::repeat_n(22.0, 100));
        board.rate_button.0 = false;

        let mut now = 0;
        while now < HOLD_US {
            let report = monitor.step(now, &mut board);
            assert_eq!(report.sample.is_some(), now % 2_000 == 0);
            now += 1_000;
        }
        assert_eq!(monitor.scheduler().sample_deadline().next_us(), HOLD_US);

        let report = monitor.step(HOLD_US, &mut board);
        assert_eq!(report.input.new_rate_hz, Some(1000));
        assert_eq!(report.sample, None);
        assert_eq!(monitor.scheduler().sample_deadline().next_us(), HOLD_US + 1_000);

        assert_eq!(monitor.step(HOLD_US + 999, &mut board).sample, None);
        assert!(monitor.step(HOLD_US + 1_000, &mut board).sample.is_some());
        assert_eq!(monitor.scheduler().sample_deadline().next_us(), HOLD_US + 2_000);
    }

    #[test]
    fn test_invalidate_display_repaints_every_row() {
        let mut monitor = monitor();
        let mut display = RecordingDisplay::default();
        monitor.refresh(&mut display);
        monitor.invalidate_display();
        assert_eq!(monitor.refresh(&mut display).lines_written, LCD_ROWS as u8);
        assert_eq!(display.writes, 2 * LCD_ROWS);
    }

    #[test]
    fn test_unchanged_refresh_writes_nothing() {
        let mut monitor = monitor();
        let mut display = RecordingDisplay::default();
        monitor.refresh(&mut display);
        assert_eq!(monitor.refresh(&mut display).lines_written, 0);
        assert_eq!(display.writes, LCD_ROWS);
    }

    #[test]
    fn test_failed_sensor_read_drops_sample() {
        let mut monitor = monitor();
        let mut board = board(core::iter::empty());
        board.temperature.0.push_back(None);
        assert_eq!(
            monitor.take_sample(&mut board.temperature, &mut board.light),
            SampleOutcome::TemperatureFailed
        );

        board.temperature.0.push_back(Some(20.0));
        board.light.0 = None;
        assert_eq!(monitor.take_sample(&mut board.temperature, &mut board.light), SampleOutcome::LightFailed);

        assert!(monitor.window().is_empty());
        assert_eq!(monitor.extrema().light_mv.bounds(), None);
        assert_eq!(monitor.sample_errors(), 2);
    }

    #[test]
    fn test_failed_display_write_retried() {
        let mut monitor = monitor();
        let mut display = RecordingDisplay {
            fail: true,
            ..Default::default()
        };
        assert_eq!(monitor.refresh(&mut display).write_errors, LCD_ROWS as u8);
        assert_eq!(monitor.display_errors(), LCD_ROWS as u32);

        display.fail = false;
        assert_eq!(monitor.refresh(&mut display).lines_written, LCD_ROWS as u8);
    }
}
