//! Lifecycle state machine
//!
//! What the display shows (control label, prize label, LED) is a function
//! of the current phase.

use super::events::Event;

/// Spinner lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on, no cycle run yet
    #[default]
    Idle,
    /// At least one reel still spinning
    Spinning,
    /// All reels stopped, reveal delay running
    Settling,
    /// Prize label visible and blinking
    Revealed,
}

impl Phase {
    /// Check if the start control is accepted in this phase
    pub fn accepts_start(&self) -> bool {
        !self.is_spinning()
    }

    /// Check if reels are moving
    pub fn is_spinning(&self) -> bool {
        matches!(self, Phase::Spinning)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            // A new cycle may begin from any resting phase
            (Phase::Idle | Phase::Settling | Phase::Revealed, Event::SpinStarted { .. }) => {
                Phase::Spinning
            }

            (Phase::Spinning, Event::AllStopped) => Phase::Settling,

            (Phase::Settling, Event::Revealed) => Phase::Revealed,

            // Default: stay in current phase
            _ => self,
        }
    }
}
