//! Line formatting and flicker-free display updates.
//!
//! This module provides:
//! - [`TextDisplay`] - Minimal character-display interface (cursor + print)
//! - [`Readout`] / [`format_lines`] - The four text lines shown to the operator
//! - [`LineRenderer`] - Per-row cache that skips unchanged lines
//!
//! # Layout (20 columns)
//!
//! | Row | Example | Content |
//! |-----|---------|---------|
//! | 0 | `1000Hz N=8` | Sample rate and window length |
//! | 1 | `T 25.3 av 25.1C` | Latest and windowed mean temperature |
//! | 2 | `L 1234 av 1200mV` | Latest and windowed mean light |
//! | 3 | `T20/30 L100/3300` | Session extrema |
//!
//! # Update Strategy
//!
//! Every line is padded to the full display width, so a shorter text
//! overwrites whatever was there before. A row is rewritten only when its
//! padded text differs from what was last painted; an unchanged refresh costs
//! zero bus traffic and therefore never flickers.

use core::fmt::Write;

use heapless::String;

use crate::config::{LCD_COLUMNS, LCD_ROWS};
use crate::state::{Average, Sample, SessionExtrema};

/// One display row, exactly [`LCD_COLUMNS`] characters once fitted.
pub type Line = String<LCD_COLUMNS>;

/// Scratch capacity for formatting before fitting to the display width.
const SCRATCH_LEN: usize = 32;

/// Character display driven by the renderer.
pub trait TextDisplay {
    type Error;

    /// Move the write position to `row`, `col` (both zero-based).
    fn set_cursor(
        &mut self,
        row: u8,
        col: u8,
    ) -> Result<(), Self::Error>;

    /// Write text at the current position.
    fn print(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error>;
}

// =============================================================================
// Formatting
// =============================================================================

/// Everything shown in one display refresh.
#[derive(Clone, Copy, Debug)]
pub struct Readout {
    pub rate_hz: u32,
    pub window: usize,
    /// Most recent single sample (not an average).
    pub latest: Option<Sample>,
    pub average: Average,
    pub extrema: SessionExtrema,
}

/// Pad with spaces or truncate to exactly [`LCD_COLUMNS`] characters.
pub fn fit_line(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars().take(LCD_COLUMNS) {
        if line.push(c).is_err() {
            break;
        }
    }
    while line.len() < LCD_COLUMNS {
        let _ = line.push(' ');
    }
    line
}

/// Format the four display rows.
pub fn format_lines(readout: &Readout) -> [Line; LCD_ROWS] {
    let mut scratch: String<SCRATCH_LEN> = String::new();
    let mut lines: [Line; LCD_ROWS] = [const { Line::new() }; LCD_ROWS];

    let _ = write!(scratch, "{}Hz N={}", readout.rate_hz, readout.window);
    lines[0] = fit_line(&scratch);

    scratch.clear();
    match readout.latest {
        Some(sample) => {
            let _ = write!(scratch, "T{:5.1} av{:5.1}C", sample.temperature_c, readout.average.temperature_c);
        }
        None => {
            let _ = write!(scratch, "T --.- av{:5.1}C", readout.average.temperature_c);
        }
    }
    lines[1] = fit_line(&scratch);

    scratch.clear();
    match readout.latest {
        Some(sample) => {
            let _ = write!(scratch, "L{:5} av{:5.0}mV", sample.light_mv, readout.average.light_mv);
        }
        None => {
            let _ = write!(scratch, "L ---- av{:5.0}mV", readout.average.light_mv);
        }
    }
    lines[2] = fit_line(&scratch);

    scratch.clear();
    match readout.extrema.temperature_c.bounds() {
        Some((min, max)) => {
            let _ = write!(scratch, "T{:.0}/{:.0}", min, max);
        }
        None => {
            let _ = scratch.push_str("T--/--");
        }
    }
    match readout.extrema.light_mv.bounds() {
        Some((min, max)) => {
            let _ = write!(scratch, " L{}/{}", min, max);
        }
        None => {
            let _ = scratch.push_str(" L--/--");
        }
    }
    lines[3] = fit_line(&scratch);

    lines
}

// =============================================================================
// Diff Renderer
// =============================================================================

/// Outcome of one full refresh.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct RefreshStats {
    /// Rows physically rewritten.
    pub lines_written: u8,
    /// Rows whose write failed (left stale, retried next refresh).
    pub write_errors: u8,
}

/// Tracks what each row currently shows to avoid redundant writes.
pub struct LineRenderer {
    cache: [Line; LCD_ROWS],
}

impl LineRenderer {
    /// Fresh renderer; the first refresh paints every row.
    pub const fn new() -> Self {
        Self {
            cache: [const { Line::new() }; LCD_ROWS],
        }
    }

    /// Write `text` to `row` if it differs from what the row shows.
    ///
    /// Returns `Ok(true)` when a write was issued. The cache is only updated
    /// after the write succeeds. Rows outside the display are ignored.
    pub fn render<D: TextDisplay>(
        &mut self,
        display: &mut D,
        row: usize,
        text: &str,
    ) -> Result<bool, D::Error> {
        let Some(cached) = self.cache.get_mut(row) else {
            return Ok(false);
        };

        let line = fit_line(text);
        if *cached == line {
            return Ok(false);
        }

        display.set_cursor(row as u8, 0)?;
        display.print(&line)?;
        *cached = line;
        Ok(true)
    }

    /// Render all rows, continuing past failed writes.
    pub fn render_all<D: TextDisplay>(
        &mut self,
        display: &mut D,
        lines: &[Line; LCD_ROWS],
    ) -> RefreshStats {
        let mut stats = RefreshStats::default();
        for (row, line) in lines.iter().enumerate() {
            match self.render(display, row, line) {
                Ok(true) => stats.lines_written += 1,
                Ok(false) => {}
                Err(_) => stats.write_errors += 1,
            }
        }
        stats
    }

    /// Text last painted to `row`.
    pub fn cached(
        &self,
        row: usize,
    ) -> Option<&str> {
        self.cache.get(row).map(Line::as_str)
    }

    /// Forget the cache so the next refresh repaints every row.
    pub fn invalidate(&mut self) {
        for line in &mut self.cache {
            line.clear();
        }
    }
}

impl Default for LineRenderer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
