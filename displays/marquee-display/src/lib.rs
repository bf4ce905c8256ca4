//! SSD1306 OLED driver and framebuffer for Marquee
//!
//! This crate provides:
//! - [`Panel`] geometry and electrical configuration
//! - [`Framebuffer`], a page-major, vertically packed 1bpp pixel store
//! - [`command`], the controller command set and initialization sequence
//! - [`Transport`] and [`I2cTransport`], command/data framing over a bus
//! - [`Ssd1306`], the controller that ties them together
//! - [`DisplayBackend`], the text-oriented seam used by the application
//!
//! # Data flow
//!
//! ```text
//!   draw_text / set_pixel / blit          show()
//!              │                            │
//!              ▼                            ▼
//!      ┌──────────────┐   snapshot   ┌─────────────┐   [0x80, op]...
//!      │ Framebuffer  │ ───────────▶ │  Transport  │ ─────────────────▶ bus
//!      └──────────────┘              └─────────────┘   [0x40, buffer]
//! ```
//!
//! Drawing never touches the bus. Only `init`, `show` and the power,
//! contrast, invert and rotation setters produce bus traffic.
//!
//! # Buffer layout
//!
//! Byte `page * width + x` holds column `x`, rows `page * 8 ..= page * 8 + 7`,
//! bit 0 being the topmost row of the page (MONO_VLSB).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod command;
pub mod controller;
pub mod font;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod panel;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use command::{Command, Rotation};
pub use controller::{DisplayState, Ssd1306};
pub use font::{Font, Font8x8};
pub use framebuffer::{Color, Framebuffer};
pub use panel::Panel;
pub use transport::{I2cTransport, Transport};
