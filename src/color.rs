//! B/W Color for the 3.7" panel

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{BinaryColor, PixelColor};

/// Only black and white are supported, the panel is driven with the single gray LUT
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Cleared bit
    Black,
    /// Set bit, the color the panel is cleared to
    #[default]
    White,
}

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(&self) -> u8 {
        match self {
            Color::White => 1u8,
            Color::Black => 0u8,
        }
    }

    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(&self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }

    /// Whether this color sets the pixel bit in a buffer
    pub fn is_set(&self) -> bool {
        matches!(self, Color::White)
    }

    /// Returns the inverse of the given color.
    ///
    /// Black returns White and White returns Black
    pub fn inverse(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<bool> for Color {
    fn from(set: bool) -> Self {
        if set {
            Color::White
        } else {
            Color::Black
        }
    }
}

#[cfg(feature = "graphics")]
impl PixelColor for Color {
    type Raw = ();
}

/// `BinaryColor::On` is ink, so it maps to black
#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}
