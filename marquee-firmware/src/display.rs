//! OLED bring-up on I2C0
//!
//! Pin assignments are board-specific (GP4 SDA, GP5 SCL).

use defmt::*;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{I2C0, PIN_4, PIN_5};
use embassy_rp::Peri;
use marquee_display::{DisplayError, I2cTransport, Panel, Ssd1306};
use marquee_hal::i2c::I2cConfig;
use marquee_hal::EmbeddedHalBus;

/// The concrete panel driver on this board
pub type Display = Ssd1306<I2cTransport<EmbeddedHalBus<I2c<'static, I2C0, Blocking>>>>;

/// Create the driver and send the init sequence
///
/// An init failure is logged, not fatal: the first render retries it.
pub fn init(
    i2c0: Peri<'static, I2C0>,
    sda: Peri<'static, PIN_4>,
    scl: Peri<'static, PIN_5>,
    panel: Panel,
) -> Display {
    let mut config = i2c::Config::default();
    config.frequency = I2cConfig::FAST.frequency;

    let bus = EmbeddedHalBus::new(I2c::new_blocking(i2c0, scl, sda, config));
    let mut display = Ssd1306::new(I2cTransport::new(bus, panel.address()), panel);

    match display.init() {
        Ok(()) => info!(
            "OLED {}x{} ready at {=u8:#x}",
            panel.width(),
            panel.height(),
            panel.address()
        ),
        Err(DisplayError::Bus(e)) => warn!("OLED not responding: {:?}", e),
        Err(e) => error!("OLED init failed: {:?}", e),
    }

    display
}
