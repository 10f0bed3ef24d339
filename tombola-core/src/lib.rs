//! Board-agnostic core logic for the prize reveal firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Spin scheduler (per-reel tick timing and deceleration)
//! - Reveal blink timer
//! - Spinner facade combining both behind one lifecycle
//! - Lifecycle state machine
//! - Configuration type definitions and validation
//! - Randomness source trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod reveal;
pub mod scheduler;
pub mod spinner;
pub mod state;
pub mod traits;
