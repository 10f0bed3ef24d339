//! Per-reel state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of a single reel
///
/// Reels are the atomic units of a spin. Each one ticks a fixed number of
/// times per cycle and then holds its final digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotState {
    /// Digit shown at the start of every cycle
    pub seed_value: u8,
    /// Digit currently shown
    pub current_value: u8,
    /// Digit the reel locks onto
    pub final_value: u8,
    /// Ticks applied this cycle
    pub ticks_elapsed: u16,
    /// Ticks this reel performs per cycle
    pub ticks_total: u16,
    /// Locked on the final digit for the rest of the cycle
    pub stopped: bool,
}

impl SlotState {
    /// Create an idle reel showing its seed digit
    pub const fn new(seed_value: u8, final_value: u8, ticks_total: u16) -> Self {
        Self {
            seed_value,
            current_value: seed_value,
            final_value,
            ticks_elapsed: 0,
            ticks_total,
            stopped: false,
        }
    }

    /// Return to the seed digit for a new cycle
    pub fn reset(&mut self, ticks_total: u16) {
        self.current_value = self.seed_value;
        self.ticks_elapsed = 0;
        self.ticks_total = ticks_total;
        self.stopped = false;
    }

    /// Show a spinning digit and count the tick
    ///
    /// Returns true when the tick budget is used up.
    pub fn apply_tick(&mut self, digit: u8) -> bool {
        self.current_value = digit;
        self.ticks_elapsed = self.ticks_elapsed.saturating_add(1);
        self.ticks_elapsed >= self.ticks_total
    }

    /// Lock onto the final digit
    pub fn lock(&mut self) {
        self.current_value = self.final_value;
        self.stopped = true;
    }
}
