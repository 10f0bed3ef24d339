//! Tombola - Prize Reveal Firmware
//!
//! Main firmware binary for an RP2040 board with a 128x64 SH1106 OLED, a
//! start button and an indicator LED. Pressing the button spins a row of
//! digit reels that decelerate and lock onto the configured prize number,
//! after which the prize label is revealed and blinks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

/// Embedded configuration (compiled into firmware)
/// Edit tombola.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../tombola.toml");

/// OLED bus speed
const I2C_FREQUENCY: u32 = 400_000;

mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tombola firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);

    // OLED on I2C0 (SCL=GPIO5, SDA=GPIO4)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    info!("I2C initialized for display");

    // Start button to ground, indicator LED on the board
    let button = Input::new(p.PIN_15, Pull::Up);
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::display_task(i2c)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner.spawn(tasks::led_task(led)).unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
