//! Last-message persistence
//!
//! The message is stored as raw UTF-8 under [`StorageKey::LastMessage`].
//! Nothing else is kept, so a reboot restores exactly the last text that
//! was shown.

use marquee_hal::{FlashError, FlashStorage, StorageKey};
use marquee_protocol::{Message, MAX_MESSAGE_LEN};

/// Errors from the message store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash read or write failed
    Flash(FlashError),
    /// Message longer than [`MAX_MESSAGE_LEN`] bytes
    TooLong,
    /// Stored bytes are not UTF-8
    InvalidUtf8,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Reads and writes the last message
pub struct MessageStore<S> {
    storage: S,
}

impl<S: FlashStorage> MessageStore<S> {
    /// Wrap a flash store
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the saved message
    ///
    /// `Ok(None)` when nothing has been saved yet.
    pub async fn load(&mut self) -> Result<Option<Message>, StoreError> {
        let mut buffer = [0u8; MAX_MESSAGE_LEN];
        let len = match self.storage.read(StorageKey::LastMessage, &mut buffer).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if len == 0 {
            return Ok(None);
        }

        let text = core::str::from_utf8(&buffer[..len]).map_err(|_| StoreError::InvalidUtf8)?;
        let mut message = Message::new();
        message.push_str(text).map_err(|_| StoreError::TooLong)?;
        Ok(Some(message))
    }

    /// Replace the saved message
    pub async fn save(&mut self, text: &str) -> Result<(), StoreError> {
        if text.len() > MAX_MESSAGE_LEN {
            return Err(StoreError::TooLong);
        }
        self.storage
            .write(StorageKey::LastMessage, text.as_bytes())
            .await?;
        Ok(())
    }

    /// Load the saved message, or `fallback` if there is none or it is unreadable
    pub async fn load_or(&mut self, fallback: &str) -> Message {
        match self.load().await {
            Ok(Some(message)) => message,
            _ => {
                let mut message = Message::new();
                let _ = message.push_str(fallback);
                message
            }
        }
    }

    /// Consume the store and return the flash
    pub fn into_inner(self) -> S {
        self.storage
    }
}
