//! Spinner facade
//!
//! Combines the spin scheduler, the reveal blink and the lifecycle phase so
//! the whole start-to-reveal contract can be driven from one place, on the
//! board or in host tests.

use heapless::Vec;

use crate::config::{ConfigError, SpinnerConfig, MAX_SLOTS};
use crate::reveal::{BlinkPhase, RevealBlink};
use crate::scheduler::{CycleId, Events, Millis, SpinScheduler};
use crate::state::{Event, Phase};
use crate::traits::DigitSource;

/// Reel as seen by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotView {
    /// Digit to draw
    pub value: u8,
    /// Locked on its final digit
    pub stopped: bool,
}

/// Snapshot of everything the display may show
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinnerView {
    /// Reels, left to right
    pub slots: Vec<SlotView, MAX_SLOTS>,
    /// A cycle is in progress
    pub is_spinning: bool,
    /// Prize label visible
    pub show_result: bool,
    /// Prize label blink phase
    pub blink_phase: BlinkPhase,
    /// Cycle the snapshot belongs to
    pub cycle: CycleId,
}

/// Spinner: scheduler plus reveal decoration
#[derive(Debug, Clone)]
pub struct Spinner {
    scheduler: SpinScheduler,
    blink: RevealBlink,
    phase: Phase,
}

impl Spinner {
    /// Create an idle spinner
    pub fn new(config: SpinnerConfig) -> Result<Self, ConfigError> {
        let blink = RevealBlink::new(config.timing.blink_period_ms);
        let scheduler = SpinScheduler::new(config)?;

        Ok(Self {
            scheduler,
            blink,
            phase: Phase::Idle,
        })
    }

    /// Underlying scheduler
    pub fn scheduler(&self) -> &SpinScheduler {
        &self.scheduler
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current prize label blink phase
    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    /// Check if the blink timer is running
    pub fn is_blinking(&self) -> bool {
        self.blink.is_armed()
    }

    /// Start a new cycle
    ///
    /// Ignored while reels are spinning. An accepted start stops the blink
    /// of the previous reveal.
    pub fn start(&mut self, now_ms: Millis) -> Option<Event> {
        let event = self.scheduler.start(now_ms)?;
        self.blink.disarm();
        self.phase = self.phase.transition(event);
        Some(event)
    }

    /// Fire everything due at `now_ms`
    ///
    /// Scheduler events come first, in firing order, followed by a blink
    /// toggle if one happened.
    pub fn advance<D: DigitSource>(&mut self, now_ms: Millis, digits: &mut D) -> Events {
        let mut events = self.scheduler.advance(now_ms, digits);

        for event in events.iter() {
            self.phase = self.phase.transition(*event);
            if *event == Event::Revealed {
                self.blink.arm(now_ms);
            }
        }

        if let Some(phase) = self.blink.advance(now_ms) {
            // A reveal arms the blink, so scheduler events leave room
            if events.push(Event::BlinkToggled(phase)).is_err() {
                let _ = events.pop();
                let _ = events.push(Event::BlinkToggled(phase));
            }
        }

        events
    }

    /// Earliest time anything changes
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.scheduler.next_deadline(), self.blink.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Tear down the decoration (display going away)
    pub fn shutdown(&mut self) {
        self.blink.disarm();
    }

    /// Snapshot for rendering
    pub fn view(&self) -> SpinnerView {
        let slots = self
            .scheduler
            .slots()
            .iter()
            .map(|s| SlotView {
                value: s.current_value,
                stopped: s.stopped,
            })
            .collect();

        SpinnerView {
            slots,
            is_spinning: self.scheduler.is_spinning(),
            show_result: self.scheduler.show_result(),
            blink_phase: self.blink.phase(),
            cycle: self.scheduler.cycle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDigits(u8);

    impl DigitSource for FixedDigits {
        fn next_digit(&mut self) -> u8 {
            self.0
        }
    }

    fn reference_spinner() -> Spinner {
        Spinner::new(SpinnerConfig::default()).unwrap()
    }

    /// Drive the spinner until the reveal fires; returns the reveal time
    fn run_to_reveal(spinner: &mut Spinner, digits: &mut FixedDigits) -> Millis {
        loop {
            let deadline = spinner.next_deadline().unwrap();
            let events = spinner.advance(deadline, digits);
            if events.contains(&Event::Revealed) {
                return deadline;
            }
        }
    }

    #[test]
    fn test_idle_view() {
        let spinner = reference_spinner();
        let view = spinner.view();

        assert_eq!(spinner.phase(), Phase::Idle);
        assert_eq!(view.slots.len(), 5);
        assert!(view.slots.iter().all(|s| s.value == 1 && !s.stopped));
        assert!(!view.is_spinning);
        assert!(!view.show_result);
        assert_eq!(spinner.next_deadline(), None);
    }

    #[test]
    fn test_phases_follow_cycle() {
        let mut spinner = reference_spinner();
        let mut digits = FixedDigits(3);

        spinner.start(0);
        assert_eq!(spinner.phase(), Phase::Spinning);

        while spinner.scheduler().is_spinning() {
            let deadline = spinner.next_deadline().unwrap();
            spinner.advance(deadline, &mut digits);
            assert!(!spinner.view().show_result);
        }
        assert_eq!(spinner.phase(), Phase::Settling);

        run_to_reveal(&mut spinner, &mut digits);
        assert_eq!(spinner.phase(), Phase::Revealed);
        assert!(spinner.view().show_result);
        assert!(spinner.is_blinking());
    }

    #[test]
    fn test_blink_runs_until_next_start() {
        let mut spinner = reference_spinner();
        let mut digits = FixedDigits(3);
        spinner.start(0);
        let revealed_at = run_to_reveal(&mut spinner, &mut digits);

        // Toggles every 500 ms, indefinitely
        let mut expected = BlinkPhase::Primary;
        for k in 1..=9u64 {
            let t = revealed_at + k * 500;
            assert_eq!(spinner.next_deadline(), Some(t));
            let events = spinner.advance(t, &mut digits);
            expected = expected.toggled();
            assert_eq!(events.as_slice(), &[Event::BlinkToggled(expected)]);
            assert_eq!(spinner.view().blink_phase, expected);
        }
        assert_eq!(spinner.blink_phase(), BlinkPhase::Alternate);

        let now = spinner.next_deadline().unwrap() - 1;
        assert!(spinner.start(now).is_some());
        assert!(!spinner.is_blinking());
        assert_eq!(spinner.blink_phase(), BlinkPhase::Primary);

        // Only reel ticks remain; no blink events until the next reveal
        let events = spinner.advance(now + 5_000, &mut digits);
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::BlinkToggled(_))));
    }

    #[test]
    fn test_start_ignored_while_spinning() {
        let mut spinner = reference_spinner();
        assert!(spinner.start(0).is_some());
        assert!(spinner.start(1).is_none());
        assert_eq!(spinner.scheduler().cycle(), 1);
        assert_eq!(spinner.phase(), Phase::Spinning);
    }

    #[test]
    fn test_shutdown_stops_blink() {
        let mut spinner = reference_spinner();
        let mut digits = FixedDigits(3);
        spinner.start(0);
        let revealed_at = run_to_reveal(&mut spinner, &mut digits);

        spinner.shutdown();
        assert!(!spinner.is_blinking());
        assert_eq!(spinner.next_deadline(), None);
        assert!(spinner.advance(revealed_at + 10_000, &mut digits).is_empty());
    }

    #[test]
    fn test_view_tracks_stopped_slots() {
        let mut spinner = reference_spinner();
        let mut digits = FixedDigits(6);
        spinner.start(0);

        while spinner.scheduler().stopped_count() == 0 {
            let deadline = spinner.next_deadline().unwrap();
            spinner.advance(deadline, &mut digits);
        }

        let view = spinner.view();
        assert_eq!(view.slots[0], SlotView { value: 4, stopped: true });
        assert!(view.slots[1..].iter().all(|s| s.value == 6 && !s.stopped));
        assert!(view.is_spinning);
        assert_eq!(view.cycle, 1);
    }
}
