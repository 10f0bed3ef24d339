//! Spin scheduler
//!
//! Turns a spinner configuration into per-reel tick sequences and runs them
//! on an explicit timer queue.

pub mod easing;
pub mod executor;
pub mod slot;
pub mod timer;

pub use easing::tick_delay;
pub use executor::{CycleId, Events, Millis, SpinScheduler, MAX_EVENTS};
pub use slot::SlotState;
pub use timer::{Timer, TimerKind, TimerQueue, TIMER_CAPACITY};
