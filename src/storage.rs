//! Persistent highscore storage.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage`
//! crate to keep the best hit count across power cycles.  A single
//! `u32` lives under one map key; the reserved flash pages handle wear
//! levelling and GC.
//!
//! Persistence is best effort throughout: a missing or unreadable
//! record loads as 0, and save failures are reported but never stop
//! the game - the in-memory highscore stays authoritative for the
//! session.

use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_nrf::nvmc::Nvmc;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

use crate::error::Error;
use pong52::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Map key for the highscore value.
const KEY_HIGHSCORE: u8 = 0x01;

/// Scratch buffer size for map operations.
const BUF_SIZE: usize = 16;

/// Flash-backed highscore store.
pub struct HighscoreStore {
    flash: BlockingAsync<Nvmc<'static>>,
}

impl HighscoreStore {
    pub fn new(nvmc: Nvmc<'static>) -> Self {
        Self {
            flash: BlockingAsync::new(nvmc),
        }
    }

    /// Load the stored highscore.  Returns 0 when nothing is stored or
    /// the flash is unreadable.
    pub async fn load(&mut self) -> u32 {
        let mut buf = [0u8; BUF_SIZE];

        match fetch_item::<u8, u32, _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_HIGHSCORE,
        )
        .await
        {
            Ok(Some(value)) => {
                info!("Loaded highscore {} from flash", value);
                value
            }
            Ok(None) => {
                info!("No highscore in flash");
                0
            }
            Err(e) => {
                warn!("Flash read error: {:?}", defmt::Debug2Format(&e));
                0
            }
        }
    }

    /// Persist a new highscore.
    pub async fn save(&mut self, highscore: u32) -> Result<(), Error> {
        let mut buf = [0u8; BUF_SIZE];

        store_item(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_HIGHSCORE,
            &highscore,
        )
        .await
        .map_err(|e| {
            warn!("Flash write error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })
    }
}
