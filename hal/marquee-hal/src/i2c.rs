//! I2C bus abstractions
//!
//! The OLED protocol is write-only, so the bus seam is a single atomic
//! write to a 7-bit address. Any embedded-hal 1.0 blocking bus can be
//! plugged in through [`EmbeddedHalBus`].

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Target did not acknowledge its address or a data byte
    Nack,
    /// Arbitration lost to another master
    ArbitrationLoss,
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Receiver could not keep up
    Overrun,
    /// Transaction timed out in hardware
    Timeout,
    /// Other error
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

/// I2C bus master
///
/// Implementations block until the transaction completes or fails and
/// report failures without retrying.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as one transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        (**self).write(address, data)
    }
}

/// Adapter from an embedded-hal 1.0 blocking I2C master
pub struct EmbeddedHalBus<T> {
    i2c: T,
}

impl<T: I2c> EmbeddedHalBus<T> {
    /// Wrap an embedded-hal bus
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Consume the adapter and return the wrapped bus
    pub fn into_inner(self) -> T {
        self.i2c
    }
}

impl<T: I2c> I2cBus for EmbeddedHalBus<T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.i2c
            .write(address, data)
            .map_err(|e| BusError::from(e.kind()))
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what SSD1306 modules are rated for
    pub const FAST: Self = Self { frequency: 400_000 };
}
