//! Test doubles for the bus and transport

use marquee_hal::{BusError, I2cBus};

use crate::backend::DisplayError;
use crate::command::Command;
use crate::transport::Transport;

/// Bus that records every write, optionally failing
pub struct RecordingBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub attempts: usize,
    /// Error returned once `succeed_for` writes have gone through
    fail: Option<BusError>,
    succeed_for: usize,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            attempts: 0,
            fail: None,
            succeed_for: 0,
        }
    }

    /// Every write fails
    pub fn failing(error: BusError) -> Self {
        Self::failing_after(0, error)
    }

    /// The first `count` writes succeed, the rest fail
    pub fn failing_after(count: usize, error: BusError) -> Self {
        Self {
            fail: Some(error),
            succeed_for: count,
            ..Self::new()
        }
    }
}

impl I2cBus for RecordingBus {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.attempts += 1;
        if let Some(error) = self.fail {
            if self.writes.len() >= self.succeed_for {
                return Err(error);
            }
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }
}

/// Transport that records commands and data transfers
#[derive(Default)]
pub struct RecordingTransport {
    pub commands: Vec<Command>,
    pub data: Vec<Vec<u8>>,
    pub fail: Option<BusError>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: BusError) -> Self {
        Self {
            fail: Some(error),
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.data.clear();
    }
}

impl Transport for RecordingTransport {
    fn write_command(&mut self, command: Command) -> Result<(), DisplayError> {
        if let Some(error) = self.fail {
            return Err(DisplayError::Bus(error));
        }
        self.commands.push(command);
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if let Some(error) = self.fail {
            return Err(DisplayError::Bus(error));
        }
        self.data.push(data.to_vec());
        Ok(())
    }
}
