//! Reel screen layout
//!
//! Turns a spinner snapshot into screen content:
//!
//! ```text
//! row 0   CONGRATULATIONS
//! row 2      1ST PRIZE          (after the reveal, inverted on Alternate)
//! row 4    4  7  2  9  1        (stopped reels inverted)
//! row 7        SPIN             (SPINNING... while spinning)
//! ```

use heapless::String;
use tombola_core::config::MAX_LABEL_LEN;
use tombola_core::reveal::BlinkPhase;
use tombola_core::spinner::SpinnerView;

use crate::screen::{span_mask, Screen, LINE_LEN, SCREEN_COLS};

/// Title row
pub const TITLE_ROW: usize = 0;
/// Prize label row
pub const PRIZE_ROW: usize = 2;
/// Reel digits row
pub const DIGIT_ROW: usize = 4;
/// Start control row
pub const CONTROL_ROW: usize = 7;

const TITLE: &str = "CONGRATULATIONS";
const CONTROL_IDLE: &str = "SPIN";
const CONTROL_SPINNING: &str = "SPINNING...";

/// Reel screen renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    prize_label: String<MAX_LABEL_LEN>,
}

impl Renderer {
    /// Create a renderer for the given prize label
    ///
    /// Labels longer than `MAX_LABEL_LEN` are truncated.
    pub fn new(prize_label: &str) -> Self {
        let mut label = String::new();
        for c in prize_label.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self { prize_label: label }
    }

    /// Prize label shown after the reveal
    pub fn prize_label(&self) -> &str {
        &self.prize_label
    }

    /// Lay out a snapshot on the screen
    ///
    /// Rows are rewritten in place so an unchanged snapshot leaves the
    /// screen clean.
    pub fn render(&self, view: &SpinnerView, screen: &mut Screen) {
        screen.set_line_centered(TITLE_ROW, TITLE);

        self.render_prize(view, screen);
        Self::render_digits(view, screen);

        let control = if view.is_spinning {
            CONTROL_SPINNING
        } else {
            CONTROL_IDLE
        };
        screen.set_line_centered(CONTROL_ROW, control);
    }

    fn render_prize(&self, view: &SpinnerView, screen: &mut Screen) {
        if !view.show_result {
            screen.set_line(PRIZE_ROW, "");
            screen.set_highlight_mask(PRIZE_ROW, 0);
            return;
        }

        screen.set_line_centered(PRIZE_ROW, &self.prize_label);

        let mut mask = 0;
        if view.blink_phase == BlinkPhase::Alternate {
            let len = self.prize_label.chars().count().min(LINE_LEN);
            let start = ((LINE_LEN - len) / 2) as u8;
            mask = span_mask(start, start + len as u8);
        }
        screen.set_highlight_mask(PRIZE_ROW, mask);
    }

    fn render_digits(view: &SpinnerView, screen: &mut Screen) {
        let count = view.slots.len();
        if count == 0 {
            screen.set_line(DIGIT_ROW, "");
            screen.set_highlight_mask(DIGIT_ROW, 0);
            return;
        }

        // Three-column cells when they fit, two otherwise
        let cell = if count * 3 <= SCREEN_COLS { 3 } else { 2 };
        let pad = (SCREEN_COLS - count * cell) / 2;

        let mut line: String<LINE_LEN> = String::new();
        for _ in 0..pad {
            let _ = line.push(' ');
        }
        for slot in view.slots.iter() {
            let digit = char::from_digit(slot.value as u32, 10).unwrap_or('?');
            if cell == 3 {
                let _ = line.push(' ');
            }
            let _ = line.push(digit);
            let _ = line.push(' ');
        }
        screen.set_line(DIGIT_ROW, &line);

        let mut mask = 0;
        for (i, slot) in view.slots.iter().enumerate() {
            if slot.stopped || view.show_result {
                let start = (pad + i * cell) as u8;
                mask |= span_mask(start, start + cell as u8);
            }
        }
        screen.set_highlight_mask(DIGIT_ROW, mask);
    }
}
