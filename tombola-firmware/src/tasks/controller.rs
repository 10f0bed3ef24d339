//! Main controller task
//!
//! Owns the spinner. Sleeps until the next reel tick, reveal or blink
//! toggle is due, or until the start button is pressed, then advances the
//! spinner and publishes the new screen and LED state.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::clocks::RoscRng;
use embassy_time::{Instant, Timer};

use tombola_core::config::SpinnerConfig;
use tombola_core::reveal::BlinkPhase;
use tombola_core::scheduler::Millis;
use tombola_core::spinner::Spinner;
use tombola_core::state::Event;
use tombola_core::traits::RngDigits;
use tombola_display::Renderer;

use crate::channels::{BLINK_STATE, DISPLAY_LOST, SCREEN_BUFFER, SCREEN_UPDATE, START_CHANNEL};

/// Milliseconds since boot
fn now_ms() -> Millis {
    Instant::now().as_millis()
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: SpinnerConfig) {
    info!("Controller task started");

    let renderer = Renderer::new(&config.prize_label);
    let mut spinner = match Spinner::new(config) {
        Ok(spinner) => spinner,
        Err(e) => {
            error!("Invalid spinner configuration: {:?}", e);
            return;
        }
    };
    let mut digits = RngDigits(RoscRng);

    publish(&renderer, &spinner).await;

    loop {
        let deadline = spinner
            .next_deadline()
            .map(Instant::from_millis)
            .unwrap_or(Instant::MAX);

        match select3(START_CHANNEL.receive(), Timer::at(deadline), DISPLAY_LOST.wait()).await {
            Either3::First(()) => {
                // The button stays live while reels spin; presses are dropped here
                if !spinner.phase().accepts_start() {
                    debug!("Start ignored, reels spinning");
                    continue;
                }

                if let Some(event) = spinner.start(now_ms()) {
                    info!("{:?}", event);
                    BLINK_STATE.signal(None);
                }
            }
            Either3::Second(()) => {}
            Either3::Third(()) => {
                warn!("Display lost, stopping reveal blink");
                spinner.shutdown();
                BLINK_STATE.signal(None);
            }
        }

        let events = spinner.advance(now_ms(), &mut digits);
        for event in events.iter() {
            handle_event(*event);
        }

        publish(&renderer, &spinner).await;
    }
}

/// Log an event and forward LED changes
fn handle_event(event: Event) {
    match event {
        Event::SlotStopped { slot, value } => {
            debug!("Reel {} stopped on {}", slot, value);
        }
        Event::AllStopped => info!("All reels stopped"),
        Event::Revealed => {
            info!("Prize revealed");
            BLINK_STATE.signal(Some(BlinkPhase::Primary));
        }
        Event::BlinkToggled(phase) => {
            trace!("Blink {:?}", phase);
            BLINK_STATE.signal(Some(phase));
        }
        Event::SpinStarted { .. } => {}
    }
}

/// Render the spinner into the shared screen and wake the display task
async fn publish(renderer: &Renderer, spinner: &Spinner) {
    let view = spinner.view();
    let mut screen = SCREEN_BUFFER.lock().await;
    renderer.render(&view, &mut screen);

    if screen.is_dirty() {
        SCREEN_UPDATE.signal(());
    }
}
