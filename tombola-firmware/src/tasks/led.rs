//! Indicator LED task
//!
//! Mirrors the prize label blink: lit on the primary phase, dark on the
//! alternate phase and whenever nothing is revealed.

use defmt::*;
use embassy_rp::gpio::Output;

use tombola_core::reveal::BlinkPhase;

use crate::channels::BLINK_STATE;

/// LED task - follows blink state updates from the controller
#[embassy_executor::task]
pub async fn led_task(mut led: Output<'static>) {
    info!("LED task started");
    led.set_low();

    loop {
        match BLINK_STATE.wait().await {
            Some(BlinkPhase::Primary) => led.set_high(),
            Some(BlinkPhase::Alternate) | None => led.set_low(),
        }
    }
}
