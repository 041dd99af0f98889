//! A Driver for the Waveshare 3.7" E-Ink Display via SPI, used as a landscape departure sign
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - Clocked at [`SPI_FREQUENCY_HZ`] (4Mhz)
//! - Chip select is handled by the [`SpiDevice`](embedded_hal::spi::SpiDevice), every byte is
//!   sent in its own transaction so CS is released between bytes
//!
//! ### Other....
//!
//! - The panel is natively 280x480 (portrait). The application draws into a rotated
//!   480x280 [`Canvas`](epd3in7::Canvas) which is remapped to the native memory layout
//!   on every [`render`](epd3in7::Epd3in7::render).
//! - A bit set in any buffer means a white pixel on the panel.
//!
//! # Examples
//!
//! ```ignore
//! use embedded_graphics::mono_font::ascii::FONT_10X20;
//! use epd3in7_sign::prelude::*;
//!
//! let mut sign = DepartureSign::new(spi, busy, dc, rst, delay, Config::default())?;
//!
//! // white canvas, every line centered
//! sign.write_lines(&FONT_10X20, 0, &["SL DEPARTURES", "43 Balsta -> 3 min"]);
//! sign.show()?;
//! sign.power_down()?;
//! ```
#![no_std]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod color;
pub mod config;
pub mod epd3in7;
pub mod error;
pub mod sign;
pub mod text;

/// Interface for the physical connection between display and the controlling device
mod interface;

mod traits;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::buffer::{Packing, PixelBuffer};
    pub use crate::color::Color;
    pub use crate::config::Config;
    pub use crate::epd3in7::{Canvas, Epd3in7, PanelState};
    pub use crate::error::ErrorKind;
    pub use crate::sign::DepartureSign;
    pub use crate::text::{CenterWriter, Font, GlyphMetrics};
    pub use crate::{SPI_FREQUENCY_HZ, SPI_MODE};
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// Bus clock the panel controller is driven with
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Number of bytes needed to hold one row (or one 8 pixel page) of `width` pixels
pub const fn line_bytes(width: u32) -> usize {
    (width as usize + 7) / 8
}
