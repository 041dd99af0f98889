//! The departure sign: panel driver, bus and landscape canvas in one place
//!
//! ```ignore
//! let mut sign = DepartureSign::new(spi, busy, dc, rst, delay, Config::default())?;
//! sign.write_lines(&FONT_10X20, 0, &["SL DEPARTURES", &departures]);
//! sign.show()?;
//! ```
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use log::debug;

use crate::color::Color;
use crate::config::Config;
use crate::epd3in7::{Canvas, Epd3in7, PanelState};
use crate::error::ErrorKind;
use crate::text::{CenterWriter, Font};

/// ms waited after the first clear
pub const STARTUP_SETTLE_MS: u32 = 500;

/// Owns the bus, the driver and the canvas the application draws on
pub struct DepartureSign<SPI, BUSY, DC, RST, DELAY> {
    spi: SPI,
    epd: Epd3in7<SPI, BUSY, DC, RST, DELAY>,
    canvas: Canvas,
}

impl<SPI, BUSY, DC, RST, DELAY> DepartureSign<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Initialises the panel and clears it to white
    ///
    /// The canvas starts out black, draw on it before the first [show](DepartureSign::show).
    pub fn new(
        mut spi: SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, ErrorKind<SPI, BUSY, DC, RST>> {
        let mut epd = Epd3in7::new(&mut spi, busy, dc, rst, delay, config)?;
        epd.clear(&mut spi)?;
        epd.delay_ms(STARTUP_SETTLE_MS);
        debug!("departure sign ready");

        Ok(DepartureSign {
            spi,
            epd,
            canvas: Canvas::default(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn epd(&self) -> &Epd3in7<SPI, BUSY, DC, RST, DELAY> {
        &self.epd
    }

    pub fn state(&self) -> PanelState {
        self.epd.state()
    }

    /// Replaces the canvas content with `lines` centered on white
    ///
    /// Entries may hold several lines separated by `'\n'`. Returns how many lines
    /// made it onto the canvas. Nothing is sent to the panel before [show](DepartureSign::show).
    pub fn write_lines<F: Font + ?Sized>(&mut self, font: &F, spacing: u32, lines: &[&str]) -> usize {
        self.canvas.clear(Color::White);
        let mut writer = CenterWriter::new(font);
        writer.set_vertical_spacing(spacing);
        writer.write_split_lines(&mut self.canvas, lines)
    }

    /// Sends the canvas to the panel and waits for the refresh
    pub fn show(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.epd.render(&mut self.spi, &self.canvas)
    }

    /// Turns the panel white, the canvas is left as it is
    pub fn clear(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.epd.clear(&mut self.spi)
    }

    /// Runs the whole panel init again, e.g. after a timeout left it half configured
    pub fn initialize(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.epd.initialize(&mut self.spi)
    }

    pub fn wake_up(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.epd.wake_up(&mut self.spi)
    }

    pub fn power_down(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.epd.power_down(&mut self.spi)
    }

    /// Gives back the bus, the pins and the delay
    pub fn release(self) -> (SPI, BUSY, DC, RST, DELAY) {
        let (busy, dc, rst, delay) = self.epd.release();
        (self.spi, busy, dc, rst, delay)
    }
}
