//! Display abstraction and reel rendering for Tombola
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display types (OLED, TFT, etc.)
//! - `Screen`, a character buffer with per-column highlighting
//! - `Renderer`, which lays out a spinner snapshot on a `Screen`
//!
//! # Architecture
//!
//! The controller builds a `SpinnerView` after every state change, the
//! renderer turns it into screen content, and the display task pushes the
//! screen to whatever backend the board has. Nothing here feeds back into
//! the spinner.

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use renderer::{Renderer, CONTROL_ROW, DIGIT_ROW, PRIZE_ROW, TITLE_ROW};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
