//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use tombola_core::reveal::BlinkPhase;
use tombola_display::Screen;

/// Channel capacity for start requests
const START_CHANNEL_SIZE: usize = 4;

/// Debounced start button presses
pub static START_CHANNEL: Channel<CriticalSectionRawMutex, (), START_CHANNEL_SIZE> =
    Channel::new();

/// Shared screen buffer, written by the controller, read by the display task
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Signal that a screen update is ready to be sent
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Prize blink phase for the indicator LED, `None` while nothing is revealed
pub static BLINK_STATE: Signal<CriticalSectionRawMutex, Option<BlinkPhase>> = Signal::new();

/// Signal that the display could not be brought up
pub static DISPLAY_LOST: Signal<CriticalSectionRawMutex, ()> = Signal::new();
