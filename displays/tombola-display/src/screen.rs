//! Screen buffer
//!
//! Character-based screen buffer for text-mode displays. The 128x64 OLED
//! fits 8 rows of 21 characters with a 6x8 font.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode displays
///
/// Each row carries a column mask of highlighted (inverted) cells, so a row
/// may highlight several separate spans.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlighted columns per row, bit n = column n
    highlights: [u32; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        const EMPTY: String<LINE_LEN> = String::new();
        Self {
            lines: [EMPTY; SCREEN_ROWS],
            highlights: [0; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is truncated.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let mut new_line: String<LINE_LEN> = String::new();
        for c in text.chars() {
            if new_line.push(c).is_err() {
                break;
            }
        }

        if *line != new_line {
            *line = new_line;
            self.dirty = true;
        }
    }

    /// Set the content of a row, centered
    pub fn set_line_centered(&mut self, row: usize, text: &str) {
        let len = text.chars().count().min(LINE_LEN);
        let pad = (LINE_LEN - len) / 2;

        let mut centered: String<LINE_LEN> = String::new();
        for _ in 0..pad {
            let _ = centered.push(' ');
        }
        for c in text.chars() {
            if centered.push(c).is_err() {
                break;
            }
        }
        self.set_line(row, &centered);
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Highlight columns `start_col..end_col` of a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if let Some(&mask) = self.highlights.get(row) {
            self.set_highlight_mask(row, mask | span_mask(start_col, end_col));
        }
    }

    /// Replace the highlighted columns of a row, bit n = column n
    pub fn set_highlight_mask(&mut self, row: usize, mask: u32) {
        let Some(current) = self.highlights.get_mut(row) else {
            return;
        };

        let mask = mask & span_mask(0, SCREEN_COLS as u8);
        if *current != mask {
            *current = mask;
            self.dirty = true;
        }
    }

    /// Clear highlight for a row
    pub fn clear_highlight(&mut self, row: usize) {
        if let Some(mask) = self.highlights.get_mut(row) {
            if *mask != 0 {
                *mask = 0;
                self.dirty = true;
            }
        }
    }

    /// Check if a cell is highlighted
    pub fn is_highlighted(&self, row: usize, col: u8) -> bool {
        (col as usize) < SCREEN_COLS
            && self
                .highlights
                .get(row)
                .is_some_and(|mask| mask & (1 << col) != 0)
    }

    /// Highlighted spans of a row as `(start_col, end_col)` pairs
    pub fn highlight_spans(&self, row: usize) -> impl Iterator<Item = (u8, u8)> + '_ {
        let mask = self.highlights.get(row).copied().unwrap_or(0);
        let mut col = 0u8;

        core::iter::from_fn(move || {
            while (col as usize) < SCREEN_COLS && mask & (1 << col) == 0 {
                col += 1;
            }
            if col as usize >= SCREEN_COLS {
                return None;
            }

            let start = col;
            while (col as usize) < SCREEN_COLS && mask & (1 << col) != 0 {
                col += 1;
            }
            Some((start, col))
        })
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Push the whole screen to a backend and mark it clean
    pub fn render_to<B: DisplayBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line)?;
            }
        }
        for row in 0..SCREEN_ROWS {
            for (start, end) in self.highlight_spans(row) {
                backend.invert_region(row as u8, start, end)?;
            }
        }
        backend.flush()?;

        self.mark_clean();
        Ok(())
    }
}

/// Column mask covering `start_col..end_col`
pub fn span_mask(start_col: u8, end_col: u8) -> u32 {
    let end = end_col.min(SCREEN_COLS as u8);
    (start_col..end).fold(0, |mask, col| mask | 1 << col)
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
