//! SSD1306 command encoder
//!
//! Commands are an opcode with zero, one or two operand bytes. The
//! initialization order below is what the controller expects after reset;
//! reordering it leaves the panel blank or garbled.

use crate::panel::Panel;

/// SSD1306 opcodes
pub mod opcode {
    pub const SET_CONTRAST: u8 = 0x81;
    /// Low bit: 0 = output follows RAM, 1 = all pixels on
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    /// Low bit: 0 = normal, 1 = inverted
    pub const SET_NORM_INV: u8 = 0xA6;
    /// Low bit: 0 = display off (sleep), 1 = display on
    pub const SET_DISP: u8 = 0xAE;
    pub const SET_MEM_ADDR: u8 = 0x20;
    pub const SET_COL_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    /// Low 6 bits: start line
    pub const SET_DISP_START_LINE: u8 = 0x40;
    /// Low bit: 1 = column 127 mapped to SEG0
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    /// Bit 3: 1 = scan from COM[N-1] to COM0
    pub const SET_COM_OUT_DIR: u8 = 0xC0;
    pub const SET_COM_PIN_CFG: u8 = 0xDA;
    pub const SET_DISP_OFFSET: u8 = 0xD3;
    pub const SET_CLK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESEL: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Memory addressing mode operand: horizontal
pub const ADDRESSING_HORIZONTAL: u8 = 0x00;

/// Clock divide ratio / oscillator frequency after reset
pub const CLOCK_DIV_DEFAULT: u8 = 0x80;

/// VCOMH deselect level, about 0.77 x Vcc
pub const VCOM_DESELECT: u8 = 0x20;

/// Number of commands in [`init_sequence`]
pub const INIT_SEQUENCE_LEN: usize = 16;

/// One controller command
///
/// Each byte travels in its own control-prefixed transaction, so the
/// variant only fixes how many bytes follow the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Opcode alone
    Single(u8),
    /// Opcode and one operand
    Pair(u8, u8),
    /// Opcode and two operands
    Triple(u8, u8, u8),
}

impl Command {
    /// The opcode byte
    pub const fn opcode(&self) -> u8 {
        match *self {
            Command::Single(op) | Command::Pair(op, _) | Command::Triple(op, _, _) => op,
        }
    }

    /// Number of bytes on the wire, excluding control prefixes
    pub const fn len(&self) -> usize {
        match self {
            Command::Single(_) => 1,
            Command::Pair(_, _) => 2,
            Command::Triple(_, _, _) => 3,
        }
    }

    /// Opcode followed by operands, in transmission order
    pub fn bytes(&self) -> impl Iterator<Item = u8> {
        let (buf, len) = match *self {
            Command::Single(op) => ([op, 0, 0], 1),
            Command::Pair(op, a) => ([op, a, 0], 2),
            Command::Triple(op, a, b) => ([op, a, b], 3),
        };
        buf.into_iter().take(len)
    }
}

/// Panel orientation
///
/// `Normal` is the orientation set by [`init_sequence`] (segment remap
/// and COM scan both reversed, rotation bit 1); `Flipped` turns the image
/// by 180 degrees (rotation bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Rotation bit 0
    Flipped,
    /// Rotation bit 1, the power-up orientation
    #[default]
    Normal,
}

impl Rotation {
    /// Rotation from its bit value; only bit 0 is significant
    pub const fn from_bit(value: u8) -> Self {
        if value & 1 == 1 {
            Rotation::Normal
        } else {
            Rotation::Flipped
        }
    }

    /// The rotation bit
    pub const fn bit(self) -> u8 {
        match self {
            Rotation::Flipped => 0,
            Rotation::Normal => 1,
        }
    }
}

/// Full initialization sequence for `panel`
///
/// Only `height` (multiplex ratio), `width > height` (COM pins) and
/// `external_vcc` (precharge, charge pump) influence the operands.
pub fn init_sequence(panel: &Panel) -> [Command; INIT_SEQUENCE_LEN] {
    use opcode::*;

    let com_pins = if panel.width() > panel.height() { 0x02 } else { 0x12 };
    let (precharge, charge_pump) = if panel.external_vcc() {
        (0x22, 0x10)
    } else {
        (0xF1, 0x14)
    };

    [
        power(false),
        // address setting
        Command::Pair(SET_MEM_ADDR, ADDRESSING_HORIZONTAL),
        // resolution and layout
        Command::Single(SET_DISP_START_LINE),
        Command::Single(SET_SEG_REMAP | 0x01),
        Command::Pair(SET_MUX_RATIO, (panel.height() - 1) as u8),
        Command::Single(SET_COM_OUT_DIR | 0x08),
        Command::Pair(SET_COM_PIN_CFG, com_pins),
        Command::Pair(SET_DISP_OFFSET, 0x00),
        // timing and driving scheme
        Command::Pair(SET_CLK_DIV, CLOCK_DIV_DEFAULT),
        Command::Pair(SET_PRECHARGE, precharge),
        Command::Pair(SET_VCOM_DESEL, VCOM_DESELECT),
        Command::Pair(SET_CHARGE_PUMP, charge_pump),
        // display
        contrast(0xFF),
        Command::Single(SET_ENTIRE_ON),
        invert(false),
        power(true),
    ]
}

/// Display on (wake) or off (sleep)
pub const fn power(on: bool) -> Command {
    Command::Single(opcode::SET_DISP | on as u8)
}

/// Contrast, 0 to 255
pub const fn contrast(value: u8) -> Command {
    Command::Pair(opcode::SET_CONTRAST, value)
}

/// Inverted or normal pixel polarity
pub const fn invert(inverted: bool) -> Command {
    Command::Single(opcode::SET_NORM_INV | inverted as u8)
}

/// COM scan direction and segment remap; always sent together
pub const fn rotate(rotation: Rotation) -> [Command; 2] {
    let bit = rotation.bit();
    [
        Command::Single(opcode::SET_COM_OUT_DIR | (bit << 3)),
        Command::Single(opcode::SET_SEG_REMAP | bit),
    ]
}

/// Column address window, inclusive
pub const fn column_window(start: u8, end: u8) -> Command {
    Command::Triple(opcode::SET_COL_ADDR, start, end)
}

/// Page address window, inclusive
pub const fn page_window(start: u8, end: u8) -> Command {
    Command::Triple(opcode::SET_PAGE_ADDR, start, end)
}
