use core::fmt::{Debug, Display, Formatter};

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::buffer::Packing;
use crate::epd3in7::PanelState;

/// Epd error type
pub enum ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Encountered an SPI error
    SpiError(SPI::Error),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY::Error),

    /// Encountered an error on DC GPIO
    DcError(DC::Error),

    /// Encountered an error on RST GPIO
    RstError(RST::Error),

    /// The busy line was still asserted after polling for `waited_ms`
    HardwareTimeout {
        /// Time spent polling, settle delays excluded
        waited_ms: u32,
    },

    /// A command was requested in a state that can't accept it,
    /// e.g. after [power_down](crate::epd3in7::Epd3in7::power_down) without a new init
    InvalidState(PanelState),

    /// A frame didn't have the length of a full native frame
    BufferSize {
        /// Bytes of a full frame
        expected: usize,
        /// Bytes handed in
        actual: usize,
    },

    /// The canvas isn't packed the way the remap expects
    UnsupportedPacking(Packing),
}

impl<SPI, BUSY, DC, RST> ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Errors coming from the bus or the gpio lines
    pub fn is_hal_error(&self) -> bool {
        matches!(
            self,
            Self::SpiError(_) | Self::BusyError(_) | Self::DcError(_) | Self::RstError(_)
        )
    }
}

impl<SPI, BUSY, DC, RST> Display for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "spi error: {err:?}"),
            Self::BusyError(err) => write!(f, "busy pin error: {err:?}"),
            Self::DcError(err) => write!(f, "dc pin error: {err:?}"),
            Self::RstError(err) => write!(f, "rst pin error: {err:?}"),
            Self::HardwareTimeout { waited_ms } => {
                write!(f, "display still busy after {waited_ms}ms")
            }
            Self::InvalidState(state) => write!(f, "command not allowed in state {state:?}"),
            Self::BufferSize { expected, actual } => {
                write!(f, "frame has {actual} bytes, expected {expected}")
            }
            Self::UnsupportedPacking(packing) => {
                write!(f, "canvas packing {packing:?} can't be remapped")
            }
        }
    }
}

impl<SPI, BUSY, DC, RST> Debug for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => f.debug_tuple("SpiError").field(err).finish(),
            Self::BusyError(err) => f.debug_tuple("BusyError").field(err).finish(),
            Self::DcError(err) => f.debug_tuple("DcError").field(err).finish(),
            Self::RstError(err) => f.debug_tuple("RstError").field(err).finish(),
            Self::HardwareTimeout { waited_ms } => f
                .debug_struct("HardwareTimeout")
                .field("waited_ms", waited_ms)
                .finish(),
            Self::InvalidState(state) => f.debug_tuple("InvalidState").field(state).finish(),
            Self::BufferSize { expected, actual } => f
                .debug_struct("BufferSize")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
            Self::UnsupportedPacking(packing) => {
                f.debug_tuple("UnsupportedPacking").field(packing).finish()
            }
        }
    }
}
