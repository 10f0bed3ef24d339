//! Prize label blink
//!
//! Once the reveal fires, the prize label alternates between two looks at a
//! fixed period until a new cycle starts or the display is torn down.

use crate::scheduler::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Blink phase of the prize label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlinkPhase {
    /// Normal rendering
    #[default]
    Primary,
    /// Highlighted rendering
    Alternate,
}

impl BlinkPhase {
    /// The other phase
    pub const fn toggled(self) -> Self {
        match self {
            BlinkPhase::Primary => BlinkPhase::Alternate,
            BlinkPhase::Alternate => BlinkPhase::Primary,
        }
    }
}

/// Fixed-period blink timer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RevealBlink {
    /// Time between toggles (ms)
    period_ms: Millis,
    /// Current phase
    phase: BlinkPhase,
    /// Next toggle time, `None` while disarmed
    next_toggle: Option<Millis>,
}

impl RevealBlink {
    /// Create a disarmed blink timer
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: (period_ms as Millis).max(1),
            phase: BlinkPhase::Primary,
            next_toggle: None,
        }
    }

    /// Start toggling from the primary phase
    pub fn arm(&mut self, now_ms: Millis) {
        self.phase = BlinkPhase::Primary;
        self.next_toggle = Some(now_ms + self.period_ms);
    }

    /// Stop toggling and return to the primary phase
    pub fn disarm(&mut self) {
        self.phase = BlinkPhase::Primary;
        self.next_toggle = None;
    }

    /// Check if the timer is running
    pub fn is_armed(&self) -> bool {
        self.next_toggle.is_some()
    }

    /// Current phase
    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Next toggle time, if armed
    pub fn next_deadline(&self) -> Option<Millis> {
        self.next_toggle
    }

    /// Apply every toggle due at `now_ms`
    ///
    /// Returns the new phase if it changed. Toggles stay on the
    /// `arm + k * period` grid regardless of how late this is called.
    pub fn advance(&mut self, now_ms: Millis) -> Option<BlinkPhase> {
        let due = self.next_toggle?;
        if now_ms < due {
            return None;
        }

        let toggles = (now_ms - due) / self.period_ms + 1;
        self.next_toggle = Some(due + toggles * self.period_ms);

        let before = self.phase;
        if toggles % 2 == 1 {
            self.phase = self.phase.toggled();
        }

        if self.phase != before {
            Some(self.phase)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_toggles() {
        let mut blink = RevealBlink::new(500);
        assert!(!blink.is_armed());
        assert_eq!(blink.advance(10_000), None);
        assert_eq!(blink.phase(), BlinkPhase::Primary);
        assert_eq!(blink.next_deadline(), None);
    }

    #[test]
    fn test_toggles_every_period() {
        let mut blink = RevealBlink::new(500);
        blink.arm(1_000);

        assert_eq!(blink.next_deadline(), Some(1_500));
        assert_eq!(blink.advance(1_499), None);
        assert_eq!(blink.advance(1_500), Some(BlinkPhase::Alternate));
        assert_eq!(blink.advance(2_000), Some(BlinkPhase::Primary));
        assert_eq!(blink.advance(2_500), Some(BlinkPhase::Alternate));
        assert_eq!(blink.next_deadline(), Some(3_000));
    }

    #[test]
    fn test_late_advance_stays_on_grid() {
        let mut blink = RevealBlink::new(500);
        blink.arm(0);

        // Two toggles due (500, 1000): phase returns to primary
        assert_eq!(blink.advance(1_200), None);
        assert_eq!(blink.phase(), BlinkPhase::Primary);
        assert_eq!(blink.next_deadline(), Some(1_500));

        // Three toggles due (1500, 2000, 2500)
        assert_eq!(blink.advance(2_700), Some(BlinkPhase::Alternate));
        assert_eq!(blink.next_deadline(), Some(3_000));
    }

    #[test]
    fn test_disarm_resets_phase() {
        let mut blink = RevealBlink::new(500);
        blink.arm(0);
        blink.advance(500);
        assert_eq!(blink.phase(), BlinkPhase::Alternate);

        blink.disarm();
        assert_eq!(blink.phase(), BlinkPhase::Primary);
        assert!(!blink.is_armed());
        assert_eq!(blink.advance(5_000), None);
    }

    #[test]
    fn test_rearm_restarts_grid() {
        let mut blink = RevealBlink::new(300);
        blink.arm(0);
        blink.advance(300);

        blink.arm(1_000);
        assert_eq!(blink.phase(), BlinkPhase::Primary);
        assert_eq!(blink.next_deadline(), Some(1_300));
    }
}
