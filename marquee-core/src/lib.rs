//! Board-agnostic application logic for the Marquee message board
//!
//! This crate contains everything between the socket and the panel that
//! does not depend on a specific chip:
//!
//! - Device configuration types and validation
//! - Last-message persistence on top of a flash key-value store
//! - Text layout and status screens
//! - The message board service that handles `POST /display`
//!
//! # Request flow
//!
//! ```text
//!  socket ─▶ RequestReader ─▶ MessageBoard::handle ─▶ render ─▶ DisplayBackend
//!                                     │
//!                                     └──────────────▶ MessageStore ─▶ FlashStorage
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod config;
pub mod message;
pub mod render;

#[cfg(test)]
mod testing;

pub use board::{MessageBoard, Outcome};
pub use config::{ConfigError, DeviceConfig};
pub use message::{MessageStore, StoreError};
