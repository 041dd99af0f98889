use crate::{config::Config, error::ErrorKind, traits::Command};
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use log::{trace, warn};

/// The Connection Interface of the 3.7" panel
///
/// Every byte goes out as its own spi transaction, so the `SpiDevice` toggles
/// chip select around each byte the way the controller expects it.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST, DELAY> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// High for busy, Wait until display is ready!
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// Used for the fixed settle delays and as clock of the busy poll
    delay: DELAY,
    config: Config,
}

impl<SPI, BUSY, DC, RST, DELAY> DisplayInterface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(busy: BUSY, dc: DC, rst: RST, delay: DELAY, config: Config) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            busy,
            dc,
            rst,
            delay,
            config,
        }
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;

        // Transfer the command over spi
        self.write(spi, command.address())
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(
        &mut self,
        spi: &mut SPI,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;

        for val in data.iter().copied() {
            self.write(spi, val)?;
        }
        Ok(())
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: u32,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;
        for _ in 0..repetitions {
            self.write(spi, val)?;
        }
        Ok(())
    }

    /// Sends every byte of an iterator as data, used to stream a frame without copying it
    pub(crate) fn data_iter<I>(
        &mut self,
        spi: &mut SPI,
        data: I,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>>
    where
        I: IntoIterator<Item = u8>,
    {
        self.dc.set_high().map_err(ErrorKind::DcError)?;
        for val in data {
            self.write(spi, val)?;
        }
        Ok(())
    }

    // one byte per transaction, cs is released in between
    fn write(&mut self, spi: &mut SPI, byte: u8) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        spi.write(&[byte]).map_err(ErrorKind::SpiError)
    }

    /// Waits until device isn't busy anymore (busy == LOW)
    ///
    /// Polls the busy line every `busy_poll` ms. Gives up with
    /// [`ErrorKind::HardwareTimeout`] once `busy_timeout` ms have been spent polling.
    /// After the line deasserted a fixed settle delay is served, busy drops a bit
    /// before the controller accepts the next command.
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let poll_ms = self.config.busy_poll();
        let mut waited_ms: u32 = 0;
        while self.is_busy()? {
            if waited_ms >= self.config.busy_timeout() {
                warn!("busy line still high after {}ms", waited_ms);
                return Err(ErrorKind::HardwareTimeout { waited_ms });
            }
            self.delay.delay_ms(poll_ms);
            waited_ms = waited_ms.saturating_add(poll_ms);
        }
        trace!("busy released after {}ms", waited_ms);
        self.delay.delay_ms(self.config.busy_settle());
        Ok(())
    }

    /// Checks if device is still busy
    pub(crate) fn is_busy(&mut self) -> Result<bool, ErrorKind<SPI, BUSY, DC, RST>> {
        self.busy.is_high().map_err(ErrorKind::BusyError)
    }

    /// Fixed protocol delay, never bounded by the busy timeout
    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Resets the device.
    ///
    /// Drives RST high, low and high again, waiting `duration_ms` after every edge.
    pub(crate) fn reset(&mut self, duration_ms: u32) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(duration_ms);

        self.rst.set_low().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(duration_ms);

        self.rst.set_high().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(duration_ms);
        Ok(())
    }

    /// Gives back the owned pins and delay
    pub(crate) fn release(self) -> (BUSY, DC, RST, DELAY) {
        (self.busy, self.dc, self.rst, self.delay)
    }
}
