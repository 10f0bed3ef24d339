//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod controller;
pub mod display;
pub mod led;

pub use button::button_task;
pub use controller::controller_task;
pub use display::display_task;
pub use led::led_task;
