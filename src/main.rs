//! pong52 - embedded entry point.
//!
//! Wires the nRF52840's GPIO, the ST7789 panel and internal flash to
//! the hardware-free game core, then drives one `Game::step` per frame
//! interval.  Everything stateful lives in the core; this file is thin
//! bring-up plus the fixed-cadence loop.

#![no_std]
#![no_main]

mod display;
mod error;
mod storage;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level as PinLevel, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::{bind_interrupts, peripherals, spim};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pong52::config::{COLOR_BLACK, FRAME_INTERVAL_MS, FRAME_PIXELS, SCREEN_H, SCREEN_W};
use pong52::game::Game;
use pong52::input::{InputSource, Level, Line};
use pong52::render::Frame;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

static FRAMEBUFFER: StaticCell<[u16; FRAME_PIXELS]> = StaticCell::new();

/// GPIO-backed input source.  All three buttons are active-low with
/// the internal pull-up enabled.
struct Buttons {
    left: Input<'static>,
    right: Input<'static>,
    pause: Input<'static>,
}

impl InputSource for Buttons {
    fn read(&mut self, line: Line) -> Level {
        let pin = match line {
            Line::Left => &self.left,
            Line::Right => &self.right,
            Line::Pause => &self.pause,
        };
        if pin.is_low() {
            Level::Low
        } else {
            Level::High
        }
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("pong52 start");

    let mut buttons = Buttons {
        left: Input::new(p.P0_11, Pull::Up),
        right: Input::new(p.P0_12, Pull::Up),
        pause: Input::new(p.P0_24, Pull::Up),
    };

    // Backlight full on.
    let _backlight = Output::new(p.P0_31, PinLevel::High, OutputDrive::Standard);

    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M32;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_03, p.P0_04, spi_config);
    let cs = Output::new(p.P0_28, PinLevel::High, OutputDrive::Standard);
    let dc = Output::new(p.P0_29, PinLevel::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_30, PinLevel::Low, OutputDrive::Standard);

    let mut panel = match display::init(spi, cs, dc, rst) {
        Ok(panel) => panel,
        Err(e) => {
            error!("Display bring-up failed: {:?}", e);
            defmt::panic!("display unavailable");
        }
    };

    let mut store = storage::HighscoreStore::new(Nvmc::new(p.NVMC));
    let highscore = store.load().await;

    let frame = Frame::new(
        SCREEN_W,
        SCREEN_H,
        FRAMEBUFFER.init([COLOR_BLACK; FRAME_PIXELS]),
    );
    let mut game = Game::new(frame, highscore);

    info!("PAUSE on P0.24; hold LEFT or RIGHT for the highscore HUD");

    let mut now: u64 = 0;
    loop {
        let outcome = game.step(now, &mut buttons);

        if let Err(e) = display::flush(&mut panel, game.frame()) {
            error!("Display flush failed: {:?}", e);
            defmt::panic!("display flush failed");
        }

        if let Some(hs) = outcome.save_highscore {
            if let Err(e) = store.save(hs).await {
                warn!("Highscore save failed, keeping in-memory value: {:?}", e);
            }
        }

        now += 1;
        Timer::after(Duration::from_millis(FRAME_INTERVAL_MS)).await;
    }
}
