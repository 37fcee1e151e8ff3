//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{prelude::DrawTarget, pixelcolor::RgbColor, Drawable};
use mipidsi::{models::ST7789, Builder, Orientation};

use crate::ui::{ColorMode, SCREEN_SIZE};

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    /// Display instance
    lcd: Lcd<'static, SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(SCREEN_SIZE as u16, SCREEN_SIZE as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd };
        display.clear()?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), Error> {
        self.lcd.clear(ColorMode::BLACK).map_err(|_| Error::Draw)
    }

    /// Draw a full frame
    pub fn render<D>(&mut self, frame: &D) -> Result<(), Error>
    where
        D: Drawable<Color = ColorMode>,
    {
        frame.draw(&mut self.lcd).map_err(|_| Error::Draw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Display controller did not initialize
    Init,
    /// Writing to the display failed
    Draw,
}
