//! Configuration types
//!
//! Board-agnostic spinner configuration. The firmware fills these from its
//! TOML file; host tests build them directly.

pub mod types;

pub use types::*;
