//! Deferred timer queue
//!
//! Every tick and the reveal are independent entries in a min-heap keyed on
//! due time. Entries carry the cycle that scheduled them so work from a
//! superseded cycle can be recognised and dropped.

use heapless::binary_heap::{BinaryHeap, Min};

use super::executor::{CycleId, Millis};
use crate::config::MAX_SLOTS;

/// Queue capacity: one pending tick per reel plus the reveal
pub const TIMER_CAPACITY: usize = MAX_SLOTS + 1;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    /// Next tick of the reel at this index
    SlotTick(u8),
    /// Reveal the prize label
    Reveal,
}

/// A scheduled unit of work
///
/// Ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    /// Fire time (ms)
    pub due_ms: Millis,
    /// Insertion sequence number
    seq: u32,
    /// Cycle that scheduled this timer
    pub cycle: CycleId,
    /// Action
    pub kind: TimerKind,
}

/// Min-heap of pending timers
#[derive(Debug, Clone)]
pub struct TimerQueue {
    heap: BinaryHeap<Timer, Min, TIMER_CAPACITY>,
    next_seq: u32,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule a timer
    ///
    /// Returns the timer back if the queue is full.
    pub fn schedule(
        &mut self,
        due_ms: Millis,
        cycle: CycleId,
        kind: TimerKind,
    ) -> Result<(), Timer> {
        let timer = Timer {
            due_ms,
            seq: self.next_seq,
            cycle,
            kind,
        };
        self.heap.push(timer)?;
        self.next_seq = self.next_seq.wrapping_add(1);
        Ok(())
    }

    /// Remove and return the earliest timer due at `now_ms`
    pub fn pop_due(&mut self, now_ms: Millis) -> Option<Timer> {
        match self.heap.peek() {
            Some(timer) if timer.due_ms <= now_ms => self.heap.pop(),
            _ => None,
        }
    }

    /// Earliest due time
    pub fn next_deadline(&self) -> Option<Millis> {
        self.heap.peek().map(|t| t.due_ms)
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(300, 1, TimerKind::SlotTick(0)).unwrap();
        queue.schedule(100, 1, TimerKind::SlotTick(1)).unwrap();
        queue.schedule(200, 1, TimerKind::Reveal).unwrap();

        assert_eq!(queue.next_deadline(), Some(100));
        assert_eq!(queue.pop_due(1_000).map(|t| t.kind), Some(TimerKind::SlotTick(1)));
        assert_eq!(queue.pop_due(1_000).map(|t| t.kind), Some(TimerKind::Reveal));
        assert_eq!(queue.pop_due(1_000).map(|t| t.kind), Some(TimerKind::SlotTick(0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_due_times_keep_schedule_order() {
        let mut queue = TimerQueue::new();
        for slot in [3u8, 0, 2, 1] {
            queue.schedule(50, 1, TimerKind::SlotTick(slot)).unwrap();
        }

        let order: heapless::Vec<TimerKind, 4> =
            core::iter::from_fn(|| queue.pop_due(50).map(|t| t.kind)).collect();
        assert_eq!(
            order.as_slice(),
            &[
                TimerKind::SlotTick(3),
                TimerKind::SlotTick(0),
                TimerKind::SlotTick(2),
                TimerKind::SlotTick(1),
            ]
        );
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        queue.schedule(500, 1, TimerKind::Reveal).unwrap();
        assert!(queue.pop_due(499).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(500).is_some());
    }

    #[test]
    fn test_full_queue_rejects() {
        let mut queue = TimerQueue::new();
        for i in 0..TIMER_CAPACITY {
            queue.schedule(i as Millis, 1, TimerKind::Reveal).unwrap();
        }
        let rejected = queue.schedule(0, 1, TimerKind::SlotTick(0));
        assert!(rejected.is_err());

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
