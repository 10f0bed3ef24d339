//! Local OLED display
//!
//! The controller renders into the shared `Screen`; the display task pushes
//! it to an SH1106 OLED on I2C0.

mod font;
pub mod sh1106;

pub use sh1106::Sh1106;
