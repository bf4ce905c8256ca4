//! SSD1306 display controller
//!
//! Owns the panel description and framebuffer and drives a [`Transport`].
//!
//! # Lifecycle
//!
//! ```text
//!  Uninitialized ──init()──▶ Ready ──power_off()──▶ Off
//!                              ▲                     │
//!                              └─────power_on()──────┘
//! ```
//!
//! A failed `init()` leaves the controller `Uninitialized` with the panel
//! in an unknown state; callers discard it or run `init()` again from the
//! start. Drawing is allowed in every state and never touches the bus.

use crate::backend::{DisplayBackend, DisplayError};
use crate::command::{self, Rotation};
use crate::framebuffer::{Color, Framebuffer};
use crate::panel::Panel;
use crate::transport::Transport;

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Initialization sequence not (successfully) sent
    Uninitialized,
    /// Initialized and powered
    Ready,
    /// Initialized, panel in sleep mode
    Off,
}

/// SSD1306 driver
pub struct Ssd1306<T> {
    transport: T,
    panel: Panel,
    framebuffer: Framebuffer,
    state: DisplayState,
    inverted: bool,
    rotation: Rotation,
    contrast: u8,
}

impl<T: Transport> Ssd1306<T> {
    /// Create a driver; no bus traffic until [`init`](Self::init)
    pub fn new(transport: T, panel: Panel) -> Self {
        Self {
            transport,
            framebuffer: Framebuffer::new(&panel),
            panel,
            state: DisplayState::Uninitialized,
            inverted: false,
            rotation: Rotation::Normal,
            contrast: 0xFF,
        }
    }

    /// Send the initialization sequence, then the current buffer
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.state = DisplayState::Uninitialized;

        for cmd in command::init_sequence(&self.panel) {
            self.transport.write_command(cmd)?;
        }
        self.inverted = false;
        self.rotation = Rotation::Normal;
        self.contrast = 0xFF;

        self.show()?;
        self.state = DisplayState::Ready;
        Ok(())
    }

    /// Push the whole framebuffer to the panel
    ///
    /// Always exactly two window commands and one data transfer.
    pub fn show(&mut self) -> Result<(), DisplayError> {
        let last_column = (self.panel.width() - 1) as u8;
        let last_page = (self.panel.pages() - 1) as u8;

        self.transport
            .write_command(command::column_window(0, last_column))?;
        self.transport
            .write_command(command::page_window(0, last_page))?;
        self.transport.write_data(self.framebuffer.as_bytes())
    }

    /// Wake the panel
    pub fn power_on(&mut self) -> Result<(), DisplayError> {
        self.transport.write_command(command::power(true))?;
        if self.state == DisplayState::Off {
            self.state = DisplayState::Ready;
        }
        Ok(())
    }

    /// Put the panel to sleep; RAM contents are kept
    pub fn power_off(&mut self) -> Result<(), DisplayError> {
        self.transport.write_command(command::power(false))?;
        if self.state == DisplayState::Ready {
            self.state = DisplayState::Off;
        }
        Ok(())
    }

    /// Set contrast, 0 to 255
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.transport.write_command(command::contrast(contrast))?;
        self.contrast = contrast;
        Ok(())
    }

    /// Invert pixel polarity on the panel (the buffer is unchanged)
    pub fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.transport.write_command(command::invert(inverted))?;
        self.inverted = inverted;
        Ok(())
    }

    /// Set orientation; sends COM direction and segment remap together
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        for cmd in command::rotate(rotation) {
            self.transport.write_command(cmd)?;
        }
        self.rotation = rotation;
        Ok(())
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        self.framebuffer.fill(color);
    }

    /// Set one pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        self.framebuffer.set_pixel(x, y, color)
    }

    /// Read one pixel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.framebuffer.pixel(x, y)
    }

    /// Draw text with the built-in 8x8 font
    pub fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.framebuffer.draw_text(text, x, y, color);
    }

    /// Copy a packed image into the buffer
    pub fn blit(
        &mut self,
        source: &[u8],
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.framebuffer.blit(source, x, y, width, height)
    }

    /// Shift the buffer contents
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.framebuffer.scroll(dx, dy);
    }
}

impl<T> Ssd1306<T> {
    /// Lifecycle state
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Whether the panel is on
    pub fn is_powered(&self) -> bool {
        self.state == DisplayState::Ready
    }

    /// Whether the panel shows inverted pixels
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Last contrast sent
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Panel description
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Framebuffer, for drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the driver and return the transport
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: Transport> DisplayBackend for Ssd1306<T> {
    fn clear(&mut self) {
        self.fill(Color::Off);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.text(text, x, y, Color::On);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.show()
    }

    fn reinitialize(&mut self) -> Result<(), DisplayError> {
        self.init()
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (self.panel.width(), self.panel.height())
    }

    fn is_initialized(&self) -> bool {
        self.state != DisplayState::Uninitialized
    }
}
