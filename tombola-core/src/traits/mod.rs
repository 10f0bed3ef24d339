//! Abstraction traits
//!
//! These traits define the interface between the spinner logic and the
//! platform-specific sources it draws from.

pub mod digits;

pub use digits::{DigitSource, RngDigits, SPIN_DIGIT_MAX, SPIN_DIGIT_MIN};
