//! Text rendering onto the panel
//!
//! Messages are drawn one line per `\n`, left-aligned, from the top.
//! Lines that would start below the panel are dropped; long lines are
//! clipped at the right edge by the framebuffer.

use core::fmt::{Display, Write};

use heapless::String;
use marquee_display::{DisplayBackend, DisplayError};

/// Shown while joining the network
pub const CONNECTING_TEXT: &str = "Connecting...";

/// Shown when the network could not be joined
pub const WIFI_FAILED_TEXT: &str = "Wi-Fi Failed!";

/// Capacity of the status line buffer (`IP:` plus an address)
const STATUS_LEN: usize = 48;

/// Clear the panel, draw `text` and push it out
pub fn render_message<D>(display: &mut D, text: &str) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    display.clear();

    let (_, height) = display.pixel_dimensions();
    let step = display.line_height() as i32;
    let mut y = 0;
    for line in text.split('\n') {
        if y >= height as i32 {
            break;
        }
        display.draw_text(0, y, line);
        y += step;
    }

    display.flush()
}

/// [`render_message`], re-initializing the panel once after a bus failure
///
/// A panel that lost power or glitched the bus needs its init sequence
/// again before it accepts data. A panel whose init never went through
/// (not attached at boot) gets it before the first render.
pub fn render_with_recovery<D>(display: &mut D, text: &str) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    if !display.is_initialized() {
        display.reinitialize()?;
    }

    match render_message(display, text) {
        Err(e) if e.is_bus() => {
            display.reinitialize()?;
            render_message(display, text)
        }
        result => result,
    }
}

/// "Connecting..." screen
pub fn render_connecting<D>(display: &mut D) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    render_with_recovery(display, CONNECTING_TEXT)
}

/// "Wi-Fi Failed!" screen
pub fn render_wifi_failed<D>(display: &mut D) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    render_with_recovery(display, WIFI_FAILED_TEXT)
}

/// `IP:<address>` screen
pub fn render_address<D, A>(display: &mut D, address: A) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
    A: Display,
{
    let mut line: String<STATUS_LEN> = String::new();
    // addresses are far shorter than the buffer; overflow only truncates
    let _ = write!(line, "IP:{}", address);
    render_with_recovery(display, &line)
}
