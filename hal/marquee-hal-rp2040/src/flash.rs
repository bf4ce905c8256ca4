//! Message partition on the Pico W's QSPI flash
//!
//! The last 64 KB of the 2 MB flash hold a sequential-storage map with a
//! single live key, the last displayed message. `memory.x` keeps the
//! program out of this range.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use marquee_hal::flash::{FlashError, StorageKey};

/// Total flash on the Pico W
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Size of the message partition, a whole number of erase sectors
pub const PARTITION_SIZE: usize = 64 * 1024;

/// Byte range of the message partition
pub const PARTITION: core::ops::Range<u32> =
    ((FLASH_SIZE - PARTITION_SIZE) as u32)..(FLASH_SIZE as u32);

/// Largest value stored under one key (a full message)
pub const MAX_VALUE_SIZE: usize = 1024;

/// Key byte and value, with headroom for sequential-storage item framing
const ITEM_BUFFER_SIZE: usize = MAX_VALUE_SIZE + 32;

const _: () = assert!(PARTITION_SIZE % ERASE_SIZE == 0);

/// Message store on the RP2040's program flash
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    // scratch for item (de)serialization
    item: [u8; ITEM_BUFFER_SIZE],
}

impl<'d> Rp2040FlashStorage<'d> {
    /// Take the flash peripheral, using `dma` for reads
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            item: [0; ITEM_BUFFER_SIZE],
        }
    }
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::Storage { .. } => FlashError::Flash,
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        _ => FlashError::Storage,
    }
}

impl<'d> marquee_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let stored = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            PARTITION,
            &mut NoCache::new(),
            &mut self.item,
            &key,
        )
        .await
        .map_err(storage_error)?
        .ok_or(FlashError::NotFound)?;

        let target = buffer
            .get_mut(..stored.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(stored);
        Ok(stored.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > MAX_VALUE_SIZE {
            return Err(FlashError::BufferTooSmall);
        }

        map::store_item(
            &mut self.flash,
            PARTITION,
            &mut NoCache::new(),
            &mut self.item,
            &key,
            &data,
        )
        .await
        .map_err(storage_error)
    }
}
