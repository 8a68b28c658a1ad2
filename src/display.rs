//! ST7789 SPI LCD bring-up and full-frame blit.
//!
//! The game core composes raw RGB565 pixels; this module owns the panel
//! handle and pushes the finished buffer in one `set_pixels` window per
//! tick.  Flush failure is fatal at this boundary - the loop does not
//! retry.

use display_interface_spi::SPIInterface;
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::Delay;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::models::ST7789;
use mipidsi::options::ColorInversion;
use mipidsi::Builder;

use crate::error::Error;
use pong52::render::Frame;

type PanelSpi = ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, Delay>;

/// Concrete panel driver type.
pub type Panel = mipidsi::Display<SPIInterface<PanelSpi, Output<'static>>, ST7789, Output<'static>>;

/// Reset and initialise the panel.
pub fn init(
    spim: Spim<'static, SPI3>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Result<Panel, Error> {
    let spi = ExclusiveDevice::new(spim, cs, Delay).map_err(|_| Error::DisplayInit)?;
    let di = SPIInterface::new(spi, dc);

    Builder::new(ST7789, di)
        .reset_pin(rst)
        .display_size(
            pong52::config::SCREEN_W as u16,
            pong52::config::SCREEN_H as u16,
        )
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Delay)
        .map_err(|_| Error::DisplayInit)
}

/// Blit the whole frame to the panel.
///
/// An unbacked frame (degraded mode) is silently skipped; the loop
/// keeps running without visible output.
pub fn flush(panel: &mut Panel, frame: &Frame) -> Result<(), Error> {
    let Some(pixels) = frame.pixels() else {
        return Ok(());
    };

    let colors = pixels.iter().map(|&px| Rgb565::from(RawU16::new(px)));
    panel
        .set_pixels(
            0,
            0,
            (frame.width() - 1) as u16,
            (frame.height() - 1) as u16,
            colors,
        )
        .map_err(|_| Error::DisplayFlush)
}
