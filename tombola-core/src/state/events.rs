//! Events produced while a spin cycle runs

use crate::reveal::BlinkPhase;
use crate::scheduler::CycleId;

/// Events that can trigger lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Scheduler events
    /// A new cycle was accepted and all reels began spinning
    SpinStarted { cycle: CycleId },
    /// A reel locked onto its final digit
    SlotStopped { slot: u8, value: u8 },
    /// The last reel stopped; the reveal is pending
    AllStopped,
    /// The reveal delay elapsed; the prize label is visible
    Revealed,

    // Presentation events
    /// The prize label blink flipped phase
    BlinkToggled(BlinkPhase),
}
