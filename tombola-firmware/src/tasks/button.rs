//! Start button task
//!
//! Debounces the active-low start button and forwards each press to the
//! controller.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::START_CHANNEL;

/// Debounce interval in milliseconds
pub const DEBOUNCE_MS: u64 = 20;

/// Button task - one start request per debounced press
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        // Bounce or glitch
        if button.is_high() {
            continue;
        }

        trace!("Start button pressed");
        if START_CHANNEL.try_send(()).is_err() {
            warn!("Start queue full, press dropped");
        }

        button.wait_for_high().await;
        Timer::after_millis(DEBOUNCE_MS).await;
    }
}
