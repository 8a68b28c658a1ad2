//! Application-wide constants and compile-time configuration.
//!
//! All screen geometry, gameplay tuning, timing parameters and pin
//! assignments live here so they can be tuned in one place.

// Screen

/// Panel width in pixels (ST7789 240x240).
pub const SCREEN_W: i32 = 240;

/// Panel height in pixels.
pub const SCREEN_H: i32 = 240;

/// Pixels in one full frame.
pub const FRAME_PIXELS: usize = (SCREEN_W * SCREEN_H) as usize;

/// Background color (RGB565).
pub const COLOR_BLACK: u16 = 0x0000;

/// Foreground color for entities and text (RGB565).
pub const COLOR_WHITE: u16 = 0xFFFF;

// Gameplay

/// Paddle height in pixels.
pub const PADDLE_H: i32 = 4;

/// Paddle width in pixels.
pub const PADDLE_W: i32 = SCREEN_W / 5;

/// Gap between the paddle and the bottom screen edge.
pub const PADDLE_BOTTOM_GAP: i32 = 2;

/// Top edge of the paddle / miss band.
pub const PADDLE_Y: i32 = SCREEN_H - PADDLE_H - PADDLE_BOTTOM_GAP;

/// Ball edge length in pixels (the ball is a filled square).
pub const BALL_SIZE: i32 = 6;

/// Pixels the paddle moves per tick while a movement button is held.
pub const PADDLE_SPEED: i32 = 3;

/// Ball speed at zero hits (pixels per tick on each axis).
pub const BALL_BASE_SPEED: i32 = 1;

/// Number of paddle hits per speed increment.
pub const BALL_SPEED_STEP_HITS: u32 = 5;

/// Speed ramp ceiling (pixels per tick on each axis).
pub const BALL_MAX_SPEED: i32 = 6;

/// Misses allowed in one round before the game returns to the start screen.
pub const FAIL_LIMIT: u32 = 10;

// Timing
//
// All input timing is expressed in ticks of the frame loop, so the core
// never needs a wall clock.

/// Frame interval (ms). ~60 Hz.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Consecutive identical samples required before a level change is
/// accepted as stable.
pub const DEBOUNCE_TICKS: u16 = 3;

/// Held duration (in ticks) after which a movement button counts as a
/// long press and switches the HUD to the wide highscore variant.
/// 50 ticks x 16 ms = 800 ms.
pub const LONG_PRESS_TICKS: u64 = 50;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button LEFT    → P0.11
//   Button RIGHT   → P0.12
//   Button PAUSE   → P0.24
//   LCD SCK        → P0.03
//   LCD MOSI       → P0.04
//   LCD CS         → P0.28
//   LCD DC         → P0.29
//   LCD RST        → P0.30
//   LCD Backlight  → P0.31

// Highscore storage

/// Flash page index where highscore storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for highscore storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
