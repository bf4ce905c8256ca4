//! In-memory doubles for flash and display

use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use marquee_display::{DisplayBackend, DisplayError};
use marquee_hal::{BusError, FlashError, FlashStorage, I2cBus, StorageKey};

/// Flash backed by a map
#[derive(Default)]
pub struct MemoryFlash {
    entries: HashMap<u8, Vec<u8>>,
    fail: Option<FlashError>,
    pub writes: usize,
}

impl MemoryFlash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with `error`
    pub fn failing(error: FlashError) -> Self {
        Self {
            fail: Some(error),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, key: StorageKey, data: &[u8]) {
        self.entries.insert(key.as_u8(), data.to_vec());
    }

    pub fn get(&self, key: StorageKey) -> Option<&[u8]> {
        self.entries.get(&key.as_u8()).map(Vec::as_slice)
    }
}

impl FlashStorage for MemoryFlash {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        if let Some(error) = self.fail {
            return Err(error);
        }
        let data = self.entries.get(&key.as_u8()).ok_or(FlashError::NotFound)?;
        if data.len() > buffer.len() {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if let Some(error) = self.fail {
            return Err(error);
        }
        self.writes += 1;
        self.entries.insert(key.as_u8(), data.to_vec());
        Ok(())
    }
}

/// Display that keeps text lines instead of pixels
pub struct MockDisplay {
    pub width: u16,
    pub height: u16,
    /// `(x, y, text)` drawn since the last clear
    pub lines: Vec<(i32, i32, String)>,
    /// Lines visible after the last successful flush
    pub shown: Vec<(i32, i32, String)>,
    pub flushes: usize,
    pub reinits: usize,
    /// Number of upcoming flushes that fail
    pub failing_flushes: usize,
    pub reinit_fails: bool,
    /// Cleared to model a panel whose boot init failed
    pub initialized: bool,
}

impl MockDisplay {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
            shown: Vec::new(),
            flushes: 0,
            reinits: 0,
            failing_flushes: 0,
            reinit_fails: false,
            initialized: true,
        }
    }

    /// Text of the lines on screen, top to bottom
    pub fn shown_text(&self) -> Vec<&str> {
        self.shown.iter().map(|(_, _, text)| text.as_str()).collect()
    }
}

impl DisplayBackend for MockDisplay {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.lines.push((x, y, text.into()));
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        if self.failing_flushes > 0 {
            self.failing_flushes -= 1;
            return Err(DisplayError::Bus(BusError::Nack));
        }
        self.shown = self.lines.clone();
        Ok(())
    }

    fn reinitialize(&mut self) -> Result<(), DisplayError> {
        self.reinits += 1;
        if self.reinit_fails {
            return Err(DisplayError::Bus(BusError::Nack));
        }
        self.initialized = true;
        Ok(())
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Bus that rejects its first `failures` writes, then records the rest
pub struct FlakyBus {
    failures: usize,
    pub writes: Vec<Vec<u8>>,
}

impl FlakyBus {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            writes: Vec::new(),
        }
    }

    /// Check if a single-byte command went over the wire
    pub fn saw_command(&self, opcode: u8) -> bool {
        self.writes.iter().any(|w| w.as_slice() == [0x80, opcode])
    }
}

impl I2cBus for FlakyBus {
    fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), BusError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(BusError::Nack);
        }
        self.writes.push(data.to_vec());
        Ok(())
    }
}
