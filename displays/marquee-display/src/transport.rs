//! Command/data framing over the panel bus
//!
//! Wire format on I2C:
//! - command byte: `[0x80, byte]`, one transaction per byte (Co=1, D/C#=0)
//! - pixel data:   `[0x40, data...]`, one transaction (Co=0, D/C#=1)

use marquee_hal::I2cBus;

use crate::backend::DisplayError;
use crate::command::Command;
use crate::panel::MAX_BUFFER_LEN;

/// Control byte announcing a single command byte
pub const COMMAND_PREFIX: u8 = 0x80;

/// Control byte announcing a run of display data
pub const DATA_PREFIX: u8 = 0x40;

/// Transport between the controller and the panel
///
/// Failures are returned as-is; retry policy belongs to the caller.
pub trait Transport {
    /// Send one command, opcode and operands
    fn write_command(&mut self, command: Command) -> Result<(), DisplayError>;

    /// Send display data as one transfer
    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_command(&mut self, command: Command) -> Result<(), DisplayError> {
        (**self).write_command(command)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        (**self).write_data(data)
    }
}

/// I2C transport for SSD1306 modules
pub struct I2cTransport<B> {
    bus: B,
    address: u8,
    /// Prefix byte plus a full framebuffer, so data goes out in one write
    scratch: [u8; MAX_BUFFER_LEN + 1],
}

impl<B: I2cBus> I2cTransport<B> {
    /// Create a transport for the panel at `address` (7-bit)
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            scratch: [0; MAX_BUFFER_LEN + 1],
        }
    }

    /// Target address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Borrow the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Consume the transport and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> Transport for I2cTransport<B> {
    fn write_command(&mut self, command: Command) -> Result<(), DisplayError> {
        for byte in command.bytes() {
            self.bus.write(self.address, &[COMMAND_PREFIX, byte])?;
        }
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.len() > MAX_BUFFER_LEN {
            return Err(DisplayError::BufferOverflow);
        }

        self.scratch[0] = DATA_PREFIX;
        self.scratch[1..=data.len()].copy_from_slice(data);
        self.bus.write(self.address, &self.scratch[..=data.len()])?;
        Ok(())
    }
}
