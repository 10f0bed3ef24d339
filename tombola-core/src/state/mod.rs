//! Spinner lifecycle state machine
//!
//! Mirrors the scheduler's flags as an explicit, finite, deterministic
//! phase so the presentation can switch on a single value.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
