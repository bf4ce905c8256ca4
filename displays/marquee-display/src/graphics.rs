//! embedded-graphics integration
//!
//! Lets primitives, mono fonts and images from embedded-graphics render
//! into the framebuffer. Pixels outside the panel are dropped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::controller::Ssd1306;
use crate::framebuffer::{Color, Framebuffer};
use crate::transport::Transport;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        Color::from(color.is_on())
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        BinaryColor::from(color.is_on())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.plot(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

impl<T: Transport> OriginDimensions for Ssd1306<T> {
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}

impl<T: Transport> DrawTarget for Ssd1306<T> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DrawTarget::clear(self.framebuffer_mut(), color)
    }
}
