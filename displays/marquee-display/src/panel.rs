//! Panel geometry and electrical configuration

use crate::backend::DisplayError;

/// Widest panel the SSD1306 column address range supports
pub const MAX_WIDTH: u16 = 128;

/// Tallest panel the SSD1306 multiplex ratio supports
pub const MAX_HEIGHT: u16 = 64;

/// Largest framebuffer in bytes (128 columns x 8 pages)
pub const MAX_BUFFER_LEN: usize = MAX_WIDTH as usize * (MAX_HEIGHT as usize / 8);

/// Usual I2C address of SSD1306 modules (0x3D with SA0 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Panel description, immutable after construction
///
/// Every constructor keeps `width <= MAX_WIDTH` and `height <= MAX_HEIGHT`,
/// so [`buffer_len`](Self::buffer_len) never exceeds [`MAX_BUFFER_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel {
    width: u16,
    height: u16,
    address: u8,
    external_vcc: bool,
}

impl Panel {
    /// Create a panel description
    ///
    /// `height` must be a multiple of 8 (one page) between 8 and 64,
    /// `width` between 1 and 128, and `address` a 7-bit I2C address.
    pub fn new(
        width: u16,
        height: u16,
        address: u8,
        external_vcc: bool,
    ) -> Result<Self, DisplayError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(DisplayError::InvalidGeometry);
        }
        if height == 0 || height > MAX_HEIGHT || height % 8 != 0 {
            return Err(DisplayError::InvalidGeometry);
        }
        if address > 0x7F {
            return Err(DisplayError::InvalidAddress);
        }

        Ok(Self {
            width,
            height,
            address,
            external_vcc,
        })
    }

    // The presets skip `new`; their geometry is within the limits above.

    /// 128x64 module at the default address with the internal charge pump
    pub const fn size_128x64() -> Self {
        Self {
            width: 128,
            height: 64,
            address: DEFAULT_ADDRESS,
            external_vcc: false,
        }
    }

    /// 128x32 module at the default address with the internal charge pump
    pub const fn size_128x32() -> Self {
        Self {
            width: 128,
            height: 32,
            address: DEFAULT_ADDRESS,
            external_vcc: false,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-row pages
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// 7-bit bus address
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Whether VCC is supplied externally (charge pump disabled)
    pub const fn external_vcc(&self) -> bool {
        self.external_vcc
    }

    /// Framebuffer length in bytes
    pub const fn buffer_len(&self) -> usize {
        self.pages() as usize * self.width as usize
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::size_128x64()
    }
}
