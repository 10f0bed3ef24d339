//! Spin cycle scheduler
//!
//! Runs one spin cycle at a time: every reel ticks on its own decelerating
//! schedule, locks onto its final digit, and once the last reel has stopped
//! a single reveal fires after a fixed delay. Generates events for the
//! lifecycle state machine.

use heapless::Vec;

use super::easing::tick_delay;
use super::slot::SlotState;
use super::timer::{TimerKind, TimerQueue};
use crate::config::{ConfigError, SpinnerConfig, MAX_SLOTS};
use crate::state::Event;
use crate::traits::DigitSource;

/// Milliseconds since an arbitrary epoch (boot on target)
pub type Millis = u64;

/// Spin cycle identifier
pub type CycleId = u32;

/// Most events one `advance` can produce: every reel stopping, the
/// aggregate stop and the reveal
pub const MAX_EVENTS: usize = MAX_SLOTS + 2;

/// Events produced by one `advance` call, in firing order
pub type Events = Vec<Event, MAX_EVENTS>;

/// Spin scheduler
///
/// Owns all reel state for the current cycle and the timers that drive it.
#[derive(Debug, Clone)]
pub struct SpinScheduler {
    /// Validated configuration
    config: SpinnerConfig,
    /// Reels, left to right
    slots: Vec<SlotState, MAX_SLOTS>,
    /// Indices of stopped reels, in stop order
    stopped: Vec<u8, MAX_SLOTS>,
    /// A cycle is in progress
    is_spinning: bool,
    /// Reveal has fired for the current cycle
    show_result: bool,
    /// Current cycle (0 before the first start)
    cycle: CycleId,
    /// Pending ticks and reveal
    timers: TimerQueue,
}

impl SpinScheduler {
    /// Create a scheduler with every reel idle on its seed digit
    pub fn new(config: SpinnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut slots = Vec::new();
        for (index, (&seed, &fin)) in config.seeds.iter().zip(config.finals.iter()).enumerate() {
            let total = config.timing.ticks_for_slot(index);
            slots
                .push(SlotState::new(seed, fin, total))
                .map_err(|_| ConfigError::TooManySlots)?;
        }

        Ok(Self {
            config,
            slots,
            stopped: Vec::new(),
            is_spinning: false,
            show_result: false,
            cycle: 0,
            timers: TimerQueue::new(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &SpinnerConfig {
        &self.config
    }

    /// Reels, left to right
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// Check if a cycle is in progress
    pub fn is_spinning(&self) -> bool {
        self.is_spinning
    }

    /// Check if the reveal has fired for the current cycle
    pub fn show_result(&self) -> bool {
        self.show_result
    }

    /// Number of reels stopped this cycle
    pub fn stopped_count(&self) -> usize {
        self.stopped.len()
    }

    /// Stopped reel indices, in stop order
    pub fn stopped_indices(&self) -> &[u8] {
        &self.stopped
    }

    /// Current cycle identifier
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending timer, if any
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Start a new cycle
    ///
    /// Ignored while a cycle is in progress. Otherwise every reel returns
    /// to its seed digit, work left over from the previous cycle is
    /// dropped, and each reel's first tick is scheduled at `now_ms`.
    pub fn start(&mut self, now_ms: Millis) -> Option<Event> {
        if self.is_spinning {
            return None;
        }

        self.cycle = self.cycle.wrapping_add(1);
        self.timers.clear();
        self.stopped.clear();

        let timing = self.config.timing;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.reset(timing.ticks_for_slot(index));
        }

        self.is_spinning = true;
        self.show_result = false;

        for index in 0..self.slots.len() {
            self.schedule(now_ms, TimerKind::SlotTick(index as u8));
        }

        Some(Event::SpinStarted { cycle: self.cycle })
    }

    /// Fire every timer due at `now_ms`
    ///
    /// Timers fire in due order, including ones scheduled by timers fired
    /// during this call. Timers tagged with an older cycle are dropped.
    pub fn advance<D: DigitSource>(&mut self, now_ms: Millis, digits: &mut D) -> Events {
        let mut events = Events::new();

        while let Some(timer) = self.timers.pop_due(now_ms) {
            if timer.cycle != self.cycle {
                continue;
            }

            match timer.kind {
                TimerKind::SlotTick(index) => {
                    self.tick_slot(index as usize, timer.due_ms, now_ms, digits, &mut events)
                }
                TimerKind::Reveal => self.reveal(&mut events),
            }
        }

        events
    }

    /// Apply one tick to a reel
    fn tick_slot<D: DigitSource>(
        &mut self,
        index: usize,
        due_ms: Millis,
        now_ms: Millis,
        digits: &mut D,
        events: &mut Events,
    ) {
        let timing = self.config.timing;
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.stopped {
            return;
        }

        if slot.apply_tick(digits.next_digit()) {
            slot.lock();
            let value = slot.current_value;
            self.finish_slot(index, value, now_ms, events);
        } else {
            let delay = tick_delay(&timing, slot.ticks_elapsed, slot.ticks_total);
            self.schedule(due_ms + delay, TimerKind::SlotTick(index as u8));
        }
    }

    /// Record a stopped reel and detect the end of the cycle
    fn finish_slot(&mut self, index: usize, value: u8, now_ms: Millis, events: &mut Events) {
        let index = index as u8;
        if self.stopped.contains(&index) {
            return;
        }

        let _ = self.stopped.push(index);
        let _ = events.push(Event::SlotStopped { slot: index, value });

        if self.stopped.len() == self.slots.len() {
            self.is_spinning = false;
            let _ = events.push(Event::AllStopped);

            let reveal_at = now_ms + self.config.timing.result_delay_ms as Millis;
            self.schedule(reveal_at, TimerKind::Reveal);
        }
    }

    /// Expose the prize label
    fn reveal(&mut self, events: &mut Events) {
        if self.is_spinning || self.show_result {
            return;
        }

        self.show_result = true;
        let _ = events.push(Event::Revealed);
    }

    /// Queue a timer for the current cycle
    fn schedule(&mut self, due_ms: Millis, kind: TimerKind) {
        // Capacity covers one tick per reel plus the reveal, and the queue
        // is cleared on every start.
        let _ = self.timers.schedule(due_ms, self.cycle, kind);
    }
}
