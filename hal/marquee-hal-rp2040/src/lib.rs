//! RP2040-specific HAL for the message board firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `marquee-hal` traits:
//!
//! - Flash storage driver (implements `marquee_hal::FlashStorage`)
//!
//! The OLED bus needs no chip-specific code: embassy-rp's blocking I2C
//! implements embedded-hal 1.0 and is wrapped in `marquee_hal::EmbeddedHalBus`.

#![no_std]

pub mod flash;

pub use flash::Rp2040FlashStorage;

// Re-export shared traits from marquee-hal for convenience
pub use marquee_hal::{FlashStorage as FlashStorageTrait, StorageKey};
