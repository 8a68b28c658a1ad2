//! Unified error type for pong52's hardware boundary.
//!
//! Gameplay conditions (wall bounce, miss, fail limit) are state
//! transitions, never errors.  Only collaborator failures surface here.
//! We avoid `alloc` - all variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;

/// Top-level error type used across the hardware modules.
#[derive(Debug, Format)]
pub enum Error {
    // Display
    /// Panel bring-up (reset/init sequence) failed.
    DisplayInit,

    /// Blitting the framebuffer to the panel failed.  Fatal at the
    /// boundary: the loop does not retry.
    DisplayFlush,

    // Storage
    /// Flash read/write/erase failed.  Best effort for saves; the
    /// in-memory highscore stays authoritative.
    Storage,
}
