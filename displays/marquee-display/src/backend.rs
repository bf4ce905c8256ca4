//! Display backend trait
//!
//! The application renders text through this interface without knowing
//! which controller or bus sits behind it.

use marquee_hal::BusError;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus(BusError),
    /// Pixel coordinate outside the panel
    OutOfBounds,
    /// Width/height not supported by the controller
    InvalidGeometry,
    /// Bus address does not fit in 7 bits
    InvalidAddress,
    /// Blit source shorter than its declared size
    SourceTooSmall,
    /// Data larger than the transfer buffer
    BufferOverflow,
}

impl From<BusError> for DisplayError {
    fn from(e: BusError) -> Self {
        DisplayError::Bus(e)
    }
}

impl DisplayError {
    /// Check if the error came from the bus (the panel may need a re-init)
    pub fn is_bus(&self) -> bool {
        matches!(self, DisplayError::Bus(_))
    }
}

/// Display backend trait
///
/// Drawing calls only touch the in-memory buffer and are infallible
/// (clipped at the panel edges). `flush` pushes the buffer to the panel.
pub trait DisplayBackend {
    /// Clear the buffer to the background color
    fn clear(&mut self);

    /// Draw one line of text with its top-left corner at pixel (x, y)
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Send the buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Re-run the panel initialization sequence
    ///
    /// Used by callers to recover after a bus error. The buffer contents
    /// are kept and pushed again as part of the sequence.
    fn reinitialize(&mut self) -> Result<(), DisplayError>;

    /// Get pixel dimensions as (width, height)
    fn pixel_dimensions(&self) -> (u16, u16);

    /// Height of one text line in pixels
    fn line_height(&self) -> u16 {
        8
    }

    /// Check if the initialization sequence has gone through
    ///
    /// `false` until a [`reinitialize`](Self::reinitialize) succeeds; the
    /// panel ignores pushed data until then.
    fn is_initialized(&self) -> bool;
}
