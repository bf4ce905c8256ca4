//! Glyph source for text rendering
//!
//! Glyphs are 8x8, one byte per row, bit 0 being the leftmost pixel.

use font8x8::UnicodeFonts;

/// Glyph width and height in pixels (also the line advance)
pub const GLYPH_SIZE: i32 = 8;

/// Character drawn when the font has no glyph for the requested one
pub const REPLACEMENT_CHAR: char = '?';

/// Fixed-width 8x8 bitmap font
pub trait Font {
    /// Get the glyph rows for a character
    fn glyph(&self, c: char) -> Option<[u8; 8]>;
}

/// Basic Latin glyphs from the `font8x8` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Font8x8;

impl Font for Font8x8 {
    fn glyph(&self, c: char) -> Option<[u8; 8]> {
        font8x8::BASIC_FONTS.get(c)
    }
}

/// Glyph for `c`, or the replacement glyph, or a blank cell
pub(crate) fn glyph_or_replacement<F: Font + ?Sized>(font: &F, c: char) -> [u8; 8] {
    font.glyph(c)
        .or_else(|| font.glyph(REPLACEMENT_CHAR))
        .unwrap_or([0; 8])
}
