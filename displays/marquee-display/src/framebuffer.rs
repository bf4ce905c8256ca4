//! Page-packed monochrome framebuffer
//!
//! Pixel `(x, y)` lives in byte `(y / 8) * width + x`, bit `y % 8`.
//! All drawing happens in memory; nothing here touches the bus.
//!
//! Bounds policy: [`Framebuffer::set_pixel`] is the checked accessor and
//! returns [`DisplayError::OutOfBounds`] for coordinates outside the panel.
//! The composite operations (lines, rectangles, text, blit, scroll) clip
//! silently at the panel edges, so callers may draw partly off-screen.

use heapless::Vec;

use crate::backend::DisplayError;
use crate::font::{self, Font, Font8x8, GLYPH_SIZE};
use crate::panel::{Panel, MAX_BUFFER_LEN};

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel dark (bit clear)
    #[default]
    Off,
    /// Pixel lit (bit set)
    On,
}

impl Color {
    /// Check if the pixel is lit
    pub const fn is_on(self) -> bool {
        matches!(self, Color::On)
    }

    /// The opposite color
    pub const fn invert(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// Number of bytes a packed `width` x `height` image occupies
pub const fn packed_len(width: u16, height: u16) -> usize {
    width as usize * ((height as usize + 7) / 8)
}

/// In-memory pixel store for one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl Framebuffer {
    /// Create a cleared framebuffer sized for `panel`
    pub fn new(panel: &Panel) -> Self {
        let mut buffer = Vec::new();
        let resized = buffer.resize(panel.buffer_len(), 0);
        debug_assert!(resized.is_ok(), "panel larger than MAX_BUFFER_LEN");
        Self {
            width: panel.width(),
            height: panel.height(),
            buffer,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Raw packed bytes, in panel transfer order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte index and bit mask of a pixel, if it is on the panel
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * self.width as usize + x, 1 << (y % 8)))
    }

    fn write_bit(&mut self, index: usize, mask: u8, color: Color) {
        if color.is_on() {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Set one pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        let (index, mask) = self.locate(x, y).ok_or(DisplayError::OutOfBounds)?;
        self.write_bit(index, mask, color);
        Ok(())
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.locate(x, y)
            .map(|(index, mask)| Color::from(self.buffer[index] & mask != 0))
    }

    /// Set a pixel if it is on the panel, ignore it otherwise
    pub(crate) fn plot(&mut self, x: i32, y: i32, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.write_bit(index, mask, color);
        }
    }

    /// Horizontal line of `width` pixels starting at (x, y)
    pub fn hline(&mut self, x: i32, y: i32, width: u16, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let start = x.max(0);
        let end = x.saturating_add(width as i32).min(self.width as i32);
        for px in start..end {
            self.plot(px, y, color);
        }
    }

    /// Vertical line of `height` pixels starting at (x, y)
    pub fn vline(&mut self, x: i32, y: i32, height: u16, color: Color) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        let start = y.max(0);
        let end = y.saturating_add(height as i32).min(self.height as i32);
        for py in start..end {
            self.plot(x, py, color);
        }
    }

    /// Rectangle outline
    pub fn rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x.saturating_add(width as i32 - 1);
        let bottom = y.saturating_add(height as i32 - 1);
        self.hline(x, y, width, color);
        self.hline(x, bottom, width, color);
        self.vline(x, y, height, color);
        self.vline(right, y, height, color);
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Color) {
        let start = y.max(0);
        let end = y.saturating_add(height as i32).min(self.height as i32);
        for py in start..end {
            self.hline(x, py, width, color);
        }
    }

    /// Copy a packed (MONO_VLSB) image into the buffer at (x, y)
    ///
    /// `source` must hold at least `width * ceil(height / 8)` bytes.
    /// A full-panel image at the origin replaces the buffer wholesale;
    /// anything else is copied pixel by pixel, clipped to the panel.
    pub fn blit(
        &mut self,
        source: &[u8],
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.blit_inner(source, x, y, width, height, None)
    }

    /// Like [`blit`](Self::blit), but source pixels equal to `key` are
    /// treated as transparent and leave the buffer untouched
    pub fn blit_keyed(
        &mut self,
        source: &[u8],
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        key: Color,
    ) -> Result<(), DisplayError> {
        self.blit_inner(source, x, y, width, height, Some(key))
    }

    fn blit_inner(
        &mut self,
        source: &[u8],
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        key: Option<Color>,
    ) -> Result<(), DisplayError> {
        if source.len() < packed_len(width, height) {
            return Err(DisplayError::SourceTooSmall);
        }

        if key.is_none() && x == 0 && y == 0 && width == self.width && height == self.height {
            let len = self.buffer.len();
            self.buffer.copy_from_slice(&source[..len]);
            return Ok(());
        }

        // Only walk the part of the source that lands on the panel
        let sx_start = x.saturating_neg().max(0);
        let sx_end = (width as i32).min((self.width as i32).saturating_sub(x));
        let sy_start = y.saturating_neg().max(0);
        let sy_end = (height as i32).min((self.height as i32).saturating_sub(y));

        for sy in sy_start..sy_end {
            let row = (sy / 8) as usize * width as usize;
            let mask = 1u8 << (sy % 8);
            for sx in sx_start..sx_end {
                let color = Color::from(source[row + sx as usize] & mask != 0);
                if key == Some(color) {
                    continue;
                }
                self.plot(x + sx, y + sy, color);
            }
        }

        Ok(())
    }

    /// Draw text with the built-in 8x8 font
    ///
    /// Only glyph pixels are written; the background is left as is.
    /// Characters advance 8 px to the right with no wrapping.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.draw_text_with(&Font8x8, text, x, y, color);
    }

    /// Draw text with a caller-supplied font
    pub fn draw_text_with<F: Font + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) {
        if y >= self.height as i32 || y <= -GLYPH_SIZE {
            return;
        }

        let mut cx = x;
        for c in text.chars() {
            if cx >= self.width as i32 {
                break;
            }
            if cx > -GLYPH_SIZE {
                let glyph = font::glyph_or_replacement(font, c);
                self.draw_glyph(&glyph, cx, y, color);
            }
            cx = cx.saturating_add(GLYPH_SIZE);
        }
    }

    fn draw_glyph(&mut self, glyph: &[u8; 8], x: i32, y: i32, color: Color) {
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 != 0 {
                    self.plot(x + col, y + row as i32, color);
                }
            }
        }
    }

    /// Shift the contents by (dx, dy) pixels in place
    ///
    /// Pixels uncovered by the shift keep their previous value. Shifts of
    /// a full width or height or more leave the buffer unchanged.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let (width, height) = (self.width as i32, self.height as i32);
        if dx.unsigned_abs() >= width as u32 || dy.unsigned_abs() >= height as u32 {
            return;
        }

        // Walk against the shift so each source pixel is read before it is overwritten
        let (y_start, y_end, y_step) = walk(dy, height);
        let (x_start, x_end, x_step) = walk(dx, width);

        let mut y = y_start;
        while y != y_end {
            let mut x = x_start;
            while x != x_end {
                if let Some(color) = self.pixel(x - dx, y - dy) {
                    self.plot(x, y, color);
                }
                x += x_step;
            }
            y += y_step;
        }
    }
}

/// Start, exclusive end and step for walking one axis during a scroll
fn walk(shift: i32, len: i32) -> (i32, i32, i32) {
    if shift < 0 {
        (0, len + shift, 1)
    } else {
        (len - 1, shift - 1, -1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fb_128x64() -> Framebuffer {
        Framebuffer::new(&Panel::size_128x64())
    }

    fn lit_pixels(fb: &Framebuffer) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_new_buffer_is_cleared() {
        let fb = fb_128x64();
        assert_eq!(fb.as_bytes().len(), 1024);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pixel_bit_layout() {
        let mut fb = fb_128x64();
        fb.set_pixel(5, 0, Color::On).unwrap();
        fb.set_pixel(5, 7, Color::On).unwrap();
        fb.set_pixel(3, 9, Color::On).unwrap();

        assert_eq!(fb.as_bytes()[5], 0b1000_0001);
        // page 1, column 3, bit 1
        assert_eq!(fb.as_bytes()[128 + 3], 0b0000_0010);
    }

    #[test]
    fn test_set_pixel_off_clears_bit() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);
        fb.set_pixel(10, 10, Color::Off).unwrap();
        assert_eq!(fb.pixel(10, 10), Some(Color::Off));
        assert_eq!(fb.as_bytes()[128 + 10], 0b1111_1011);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut fb = fb_128x64();
        assert_eq!(fb.set_pixel(128, 0, Color::On), Err(DisplayError::OutOfBounds));
        assert_eq!(fb.set_pixel(0, 64, Color::On), Err(DisplayError::OutOfBounds));
        assert_eq!(fb.set_pixel(-1, 3, Color::On), Err(DisplayError::OutOfBounds));
        assert_eq!(fb.pixel(128, 0), None);
        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn test_fill_on_then_off() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        fb.fill(Color::Off);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_full_blit_replaces_buffer() {
        let mut fb = fb_128x64();
        let image: std::vec::Vec<u8> = (0..1024).map(|i| (i * 7 % 256) as u8).collect();

        fb.blit(&image, 0, 0, 128, 64).unwrap();
        assert_eq!(fb.as_bytes(), &image[..]);
    }

    #[test]
    fn test_blit_at_offset() {
        let mut fb = fb_128x64();
        // 2x8 image: left column has only its top pixel, right column fully lit
        let image = [0b0000_0001, 0b1111_1111];

        fb.blit(&image, 10, 4, 2, 8).unwrap();

        assert_eq!(fb.pixel(10, 4), Some(Color::On));
        assert_eq!(fb.pixel(10, 5), Some(Color::Off));
        for y in 4..12 {
            assert_eq!(fb.pixel(11, y), Some(Color::On));
        }
        assert_eq!(lit_pixels(&fb), 9);
    }

    #[test]
    fn test_blit_overwrites_with_dark_pixels() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);
        fb.blit(&[0x00], 0, 0, 1, 8).unwrap();
        for y in 0..8 {
            assert_eq!(fb.pixel(0, y), Some(Color::Off));
        }
        assert_eq!(fb.pixel(0, 8), Some(Color::On));
    }

    #[test]
    fn test_blit_clips_at_edges() {
        let mut fb = fb_128x64();
        let image = [0xFF; 4 * 1];

        fb.blit(&image, -2, -4, 4, 8).unwrap();
        fb.blit(&image, 126, 60, 4, 8).unwrap();

        // top-left: columns 0..2, rows 0..4 survive
        assert_eq!(fb.pixel(0, 0), Some(Color::On));
        assert_eq!(fb.pixel(1, 3), Some(Color::On));
        assert_eq!(fb.pixel(2, 0), Some(Color::Off));
        assert_eq!(fb.pixel(0, 4), Some(Color::Off));
        // bottom-right: columns 126..128, rows 60..64 survive
        assert_eq!(fb.pixel(127, 63), Some(Color::On));
        assert_eq!(lit_pixels(&fb), 16);
    }

    #[test]
    fn test_blit_fully_off_screen_is_noop() {
        let mut fb = fb_128x64();
        fb.blit(&[0xFF; 8], 200, 0, 8, 8).unwrap();
        fb.blit(&[0xFF; 8], -100, -100, 8, 8).unwrap();
        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn test_blit_source_too_small() {
        let mut fb = fb_128x64();
        assert_eq!(
            fb.blit(&[0u8; 1023], 0, 0, 128, 64),
            Err(DisplayError::SourceTooSmall)
        );
        // 3x9 needs two pages per column
        assert_eq!(fb.blit(&[0u8; 5], 0, 0, 3, 9), Err(DisplayError::SourceTooSmall));
    }

    #[test]
    fn test_blit_keyed_skips_transparent() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);
        // Off is transparent, so an all-dark image changes nothing
        fb.blit_keyed(&[0x00; 1024], 0, 0, 128, 64, Color::Off).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));

        fb.blit_keyed(&[0xFF], 0, 0, 1, 8, Color::On).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_buffer_sized_for_every_preset() {
        for panel in [Panel::size_128x64(), Panel::size_128x32()] {
            assert!(panel.buffer_len() <= MAX_BUFFER_LEN);
            assert_eq!(Framebuffer::new(&panel).as_bytes().len(), panel.buffer_len());
        }
        let smallest = Panel::new(1, 8, 0x3C, false).unwrap();
        assert_eq!(Framebuffer::new(&smallest).as_bytes().len(), 1);
    }

    fn lit_count(fb: &Framebuffer) -> u32 {
        fb.as_bytes().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_blit_keyed_mixed_column() {
        let mut fb = fb_128x64();
        fb.set_pixel(0, 5, Color::On).unwrap();

        // top half lit, bottom half keyed out
        fb.blit_keyed(&[0x0F], 0, 0, 1, 8, Color::Off).unwrap();

        for row in 0..4 {
            assert_eq!(fb.pixel(0, row), Some(Color::On), "row {row}");
        }
        assert_eq!(fb.pixel(0, 4), Some(Color::Off));
        assert_eq!(fb.pixel(0, 5), Some(Color::On));
        assert_eq!(fb.pixel(0, 6), Some(Color::Off));
        assert_eq!(fb.pixel(0, 7), Some(Color::Off));
        assert_eq!(lit_count(&fb), 5);
    }

    #[test]
    fn test_blit_keyed_on_key_draws_dark_pixels() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);

        fb.blit_keyed(&[0x0F], 3, 0, 1, 8, Color::On).unwrap();

        assert_eq!(fb.pixel(3, 0), Some(Color::On));
        assert_eq!(fb.pixel(3, 4), Some(Color::Off));
        assert_eq!(fb.pixel(3, 7), Some(Color::Off));
        assert_eq!(lit_count(&fb), 128 * 64 - 4);
    }

    #[test]
    fn test_blit_keyed_with_offsets_clips() {
        let mut fb = fb_128x64();

        // second source column has rows 4-7 lit; first column falls off the left
        fb.blit_keyed(&[0x0F, 0xF0], -1, 2, 2, 8, Color::Off).unwrap();
        for row in 6..10 {
            assert_eq!(fb.pixel(0, row), Some(Color::On), "row {row}");
        }
        assert_eq!(fb.pixel(0, 5), Some(Color::Off));
        assert_eq!(fb.pixel(0, 10), Some(Color::Off));
        assert_eq!(lit_count(&fb), 4);

        // right edge: the second source column is clipped
        fb.fill(Color::Off);
        fb.blit_keyed(&[0x0F, 0x0F], 127, 60, 2, 8, Color::Off).unwrap();
        for row in 60..64 {
            assert_eq!(fb.pixel(127, row), Some(Color::On), "row {row}");
        }
        assert_eq!(lit_count(&fb), 4);

        // bottom edge: rows 64 and up are clipped
        fb.fill(Color::Off);
        fb.blit_keyed(&[0xFF], 127, 62, 1, 8, Color::Off).unwrap();
        assert_eq!(fb.pixel(127, 62), Some(Color::On));
        assert_eq!(fb.pixel(127, 63), Some(Color::On));
        assert_eq!(lit_count(&fb), 2);
    }

    #[test]
    fn test_draw_text_matches_glyph() {
        let mut fb = fb_128x64();
        fb.draw_text("H", 0, 0, Color::On);

        let glyph = Font8x8.glyph('H').unwrap();
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                let expected = Color::from((bits >> col) & 1 != 0);
                assert_eq!(fb.pixel(col, row as i32), Some(expected));
            }
        }
    }

    #[test]
    fn test_draw_text_advances_eight_pixels() {
        let mut one = fb_128x64();
        one.draw_text("i", 8, 0, Color::On);

        let mut two = fb_128x64();
        two.draw_text(" i", 0, 0, Color::On);

        assert_eq!(one, two);
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut fb = fb_128x64();
        fb.fill(Color::On);
        fb.draw_text("  ", 0, 0, Color::Off);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_draw_text_clips_at_right_edge() {
        let mut fb = fb_128x64();
        // 20 characters at 8 px is wider than 128 px
        fb.draw_text("MMMMMMMMMMMMMMMMMMMM", 0, 60, Color::On);
        assert!(lit_pixels(&fb) > 0);
        fb.draw_text("M", 130, 0, Color::On);
        fb.draw_text("M", 0, -8, Color::On);
        fb.draw_text("M", 0, 64, Color::On);
    }

    #[test]
    fn test_unknown_char_draws_replacement() {
        let mut unknown = fb_128x64();
        unknown.draw_text("\u{00e9}", 0, 0, Color::On);

        let mut question = fb_128x64();
        question.draw_text("?", 0, 0, Color::On);

        assert_eq!(unknown, question);
    }

    #[test]
    fn test_lines_and_rects() {
        let mut fb = fb_128x64();
        fb.hline(-5, 0, 10, Color::On);
        assert_eq!(lit_pixels(&fb), 5);

        fb.fill(Color::Off);
        fb.vline(127, 60, 10, Color::On);
        assert_eq!(lit_pixels(&fb), 4);

        fb.fill(Color::Off);
        fb.rect(0, 0, 4, 3, Color::On);
        assert_eq!(lit_pixels(&fb), 10);
        assert_eq!(fb.pixel(1, 1), Some(Color::Off));

        fb.fill(Color::Off);
        fb.fill_rect(2, 2, 3, 3, Color::On);
        assert_eq!(lit_pixels(&fb), 9);
    }

    #[test]
    fn test_scroll_right_and_down() {
        let mut fb = fb_128x64();
        fb.set_pixel(0, 0, Color::On).unwrap();
        fb.scroll(3, 2);
        assert_eq!(fb.pixel(3, 2), Some(Color::On));
        // vacated region keeps its old contents
        assert_eq!(fb.pixel(0, 0), Some(Color::On));
        assert_eq!(fb.as_bytes().len(), 1024);
    }

    #[test]
    fn test_scroll_left_and_up() {
        let mut fb = fb_128x64();
        fb.set_pixel(100, 40, Color::On).unwrap();
        fb.scroll(-10, -8);
        assert_eq!(fb.pixel(90, 32), Some(Color::On));
    }

    #[test]
    fn test_scroll_out_of_range_is_noop() {
        let mut fb = fb_128x64();
        fb.set_pixel(1, 1, Color::On).unwrap();
        let before = fb.clone();
        fb.scroll(128, 0);
        fb.scroll(0, -64);
        fb.scroll(i32::MIN, i32::MAX);
        assert_eq!(fb, before);
    }

    proptest! {
        #[test]
        fn prop_fill_on_then_off_is_zero(width in 1u16..=128, pages in 1u16..=8) {
            let panel = Panel::new(width, pages * 8, 0x3C, false).unwrap();
            let mut fb = Framebuffer::new(&panel);
            fb.fill(Color::On);
            fb.fill(Color::Off);
            prop_assert_eq!(fb.as_bytes().len(), panel.buffer_len());
            prop_assert!(fb.as_bytes().iter().all(|&b| b == 0));
        }

        #[test]
        fn prop_set_pixel_touches_one_bit(x in 0i32..128, y in 0i32..64, base in any::<u8>()) {
            let mut fb = fb_128x64();
            let image = [base; 1024];
            fb.blit(&image, 0, 0, 128, 64).unwrap();
            let color = Color::from(base & (1 << (y % 8)) == 0);
            let before = fb.clone();

            fb.set_pixel(x, y, color).unwrap();

            prop_assert_eq!(fb.pixel(x, y), Some(color));
            let changed = fb
                .as_bytes()
                .iter()
                .zip(before.as_bytes())
                .filter(|(a, b)| a != b)
                .count();
            prop_assert_eq!(changed, 1);
        }

        #[test]
        fn prop_out_of_bounds_leaves_buffer(x in 128i32..1000, y in -1000i32..1000) {
            let mut fb = fb_128x64();
            prop_assert_eq!(fb.set_pixel(x, y, Color::On), Err(DisplayError::OutOfBounds));
            prop_assert_eq!(fb.set_pixel(y.min(-1), x, Color::On), Err(DisplayError::OutOfBounds));
            prop_assert_eq!(lit_pixels(&fb), 0);
        }

        #[test]
        fn prop_full_blit_roundtrip(image in proptest::collection::vec(any::<u8>(), 512)) {
            let mut fb = Framebuffer::new(&Panel::size_128x32());
            fb.blit(&image, 0, 0, 128, 32).unwrap();
            prop_assert_eq!(fb.as_bytes(), &image[..]);
        }

        #[test]
        fn prop_partial_blit_matches_source(
            x in -16i32..140,
            y in -16i32..72,
            image in proptest::collection::vec(any::<u8>(), 16 * 2),
        ) {
            let mut fb = fb_128x64();
            fb.blit(&image, x, y, 16, 16).unwrap();
            for sy in 0..16 {
                for sx in 0..16 {
                    let bit = image[(sy / 8) as usize * 16 + sx as usize] >> (sy % 8) & 1;
                    if let Some(color) = fb.pixel(x + sx, y + sy) {
                        prop_assert_eq!(color, Color::from(bit != 0));
                    }
                }
            }
        }
    }
}
