//! Marquee - networked OLED message board
//!
//! Firmware for the Raspberry Pi Pico W with an SSD1306 panel on I2C0.
//! Text posted to `http://<board>/display` is shown on the panel and kept
//! in flash, so it comes back after a power cycle.
//!
//! Boot sequence:
//! 1. Restore the last message (or the configured default)
//! 2. "Connecting..." while joining Wi-Fi
//! 3. "IP:<address>" for a moment, then the message
//! 4. Serve HTTP until power off; "Wi-Fi Failed!" if the join never succeeds

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_time::{Duration, Timer};
use marquee_core::render;
use marquee_core::{MessageBoard, MessageStore};
use marquee_hal_rp2040::Rp2040FlashStorage;
use {defmt_rtt as _, panic_probe as _};

mod config;
mod display;
mod server;
mod wifi;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Marquee firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let panel = unwrap!(config::panel());
    let display = display::init(p.I2C0, p.PIN_4, p.PIN_5, panel);

    let store = MessageStore::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH1));
    let mut board = MessageBoard::restore(display, store, config::DEFAULT_TEXT).await;
    info!("Current message: {}", board.current());

    if let Err(e) = render::render_connecting(board.display_mut()) {
        warn!("Status screen failed: {:?}", e);
    }

    let mut network = wifi::start(
        spawner,
        wifi::RadioPins {
            pio: p.PIO0,
            dma: p.DMA_CH0,
            pwr: p.PIN_23,
            dio: p.PIN_24,
            cs: p.PIN_25,
            clk: p.PIN_29,
        },
    )
    .await;

    let Some(address) = wifi::connect(&mut network).await else {
        error!("Wi-Fi connection failed, idling");
        if let Err(e) = render::render_wifi_failed(board.display_mut()) {
            warn!("Status screen failed: {:?}", e);
        }
        loop {
            Timer::after_secs(60).await;
            trace!("Idle heartbeat");
        }
    };

    if let Err(e) = render::render_address(board.display_mut(), address) {
        warn!("Status screen failed: {:?}", e);
    }
    Timer::after(Duration::from_millis(config::IP_DISPLAY_MS)).await;

    if let Err(e) = board.show_current() {
        error!("Could not show message: {:?}", e);
    }

    server::serve(network.stack, &mut board).await
}
