//! Display task
//!
//! Pushes the shared screen buffer to the OLED whenever the controller
//! signals an update.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

use crate::channels::{DISPLAY_LOST, SCREEN_BUFFER, SCREEN_UPDATE};
use crate::display::Sh1106;

/// Display task - renders the screen buffer on every update signal
#[embassy_executor::task]
pub async fn display_task(i2c: I2c<'static, I2C0, Async>) {
    info!("Display task started");

    let mut display = Sh1106::new(i2c);
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {:?}", e);
        DISPLAY_LOST.signal(());
        return;
    }
    info!("OLED initialized");

    // Show whatever the controller rendered before the panel came up
    SCREEN_UPDATE.signal(());

    loop {
        SCREEN_UPDATE.wait().await;

        {
            let mut screen = SCREEN_BUFFER.lock().await;
            if let Err(e) = screen.render_to(display.frame_mut()) {
                warn!("Failed to render screen: {:?}", e);
                continue;
            }
        }

        if let Err(e) = display.flush().await {
            warn!("Failed to flush display: {:?}", e);
            // Retry on the next update even if nothing changes
            SCREEN_BUFFER.lock().await.mark_dirty();
        } else {
            trace!("Screen update sent");
        }
    }
}
