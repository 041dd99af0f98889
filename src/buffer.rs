//! Packed 1 bit per pixel buffers
//!
//! A set bit is a white pixel on the panel. See [`Packing`] for the two memory
//! layouts a [`PixelBuffer`] can use.

use bit_field::BitField;

use crate::color::Color;
use crate::line_bytes;

/// How pixels are packed into the bytes of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packing {
    /// Every byte holds 8 vertically stacked pixels of one column, the least
    /// significant bit being the topmost pixel. Bytes of one 8 pixel high page
    /// follow each other from left to right.
    ///
    /// This is the layout of the landscape canvas.
    #[default]
    VerticalLsb,
    /// Every byte holds 8 horizontally adjacent pixels of one row, the most
    /// significant bit being the leftmost pixel. Rows follow each other.
    ///
    /// This is the layout the panel's RAM is written in.
    HorizontalMsb,
}

impl Packing {
    /// Bytes needed for a `width` x `height` buffer in this packing
    pub const fn buffer_len(self, width: u32, height: u32) -> usize {
        match self {
            Packing::VerticalLsb => line_bytes(height) * width as usize,
            Packing::HorizontalMsb => line_bytes(width) * height as usize,
        }
    }

    /// Bytes per row for [`Packing::HorizontalMsb`], bytes per page for [`Packing::VerticalLsb`]
    pub const fn stride_bytes(self, width: u32) -> usize {
        match self {
            Packing::VerticalLsb => width as usize,
            Packing::HorizontalMsb => line_bytes(width),
        }
    }

    // (byte index, bit index) of an in-range pixel
    fn locate(self, width: u32, x: u32, y: u32) -> (usize, usize) {
        match self {
            Packing::VerticalLsb => {
                let index = (y / 8) as usize * width as usize + x as usize;
                (index, (y % 8) as usize)
            }
            Packing::HorizontalMsb => {
                let index = y as usize * line_bytes(width) + (x / 8) as usize;
                (index, 7 - (x % 8) as usize)
            }
        }
    }
}

/// Monochrome framebuffer owning its storage
///
/// - WIDTH: width in pixel
/// - HEIGHT: height in pixel
/// - BYTECOUNT: storage size, must match [`Packing::buffer_len`] for the chosen packing.
///   This is redundant and should go away once const generic expressions are stabilized
///
/// Drawing outside of the buffer is silently clipped.
pub struct PixelBuffer<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> {
    buffer: [u8; BYTECOUNT],
    packing: Packing,
}

impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> Default
    for PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>
{
    /// A black buffer with [`Packing::VerticalLsb`]
    // inline is necessary here to allow heap allocation via Box on stack limited programs
    #[inline(always)]
    fn default() -> Self {
        Self::new(Packing::default())
    }
}

impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>
    PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>
{
    /// Creates an all black (all bits cleared) buffer
    ///
    /// Panics if `BYTECOUNT` doesn't fit `packing`.
    #[inline(always)]
    pub fn new(packing: Packing) -> Self {
        assert_eq!(
            packing.buffer_len(WIDTH, HEIGHT),
            BYTECOUNT,
            "BYTECOUNT doesn't match the packing"
        );
        Self {
            buffer: [0u8; BYTECOUNT],
            packing,
        }
    }

    pub fn width(&self) -> u32 {
        WIDTH
    }

    pub fn height(&self) -> u32 {
        HEIGHT
    }

    pub fn packing(&self) -> Packing {
        self.packing
    }

    pub fn stride_bytes(&self) -> usize {
        self.packing.stride_bytes(WIDTH)
    }

    /// get internal buffer to use it (to draw in epd)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Same as [`PixelBuffer::buffer`]
    pub fn get_raw(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable access to the packed bytes
    pub fn get_mut_buffer(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    fn in_bounds(x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    /// Sets or clears one pixel, out of range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((x, y)) = Self::in_bounds(x, y) {
            let (index, bit) = self.packing.locate(WIDTH, x, y);
            self.buffer[index].set_bit(bit, on);
        }
    }

    /// `None` outside of the buffer
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (x, y) = Self::in_bounds(x, y)?;
        let (index, bit) = self.packing.locate(WIDTH, x, y);
        Some(self.buffer[index].get_bit(bit))
    }

    /// Sets every pixel to `on`
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xff } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Fills the whole buffer with a color
    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.get_byte_value());
    }

    /// Fills a rectangle, the part outside of the buffer is clipped
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = x.saturating_add(width.min(i32::MAX as u32) as i32).min(WIDTH as i32);
        let y_end = y.saturating_add(height.min(i32::MAX as u32) as i32).min(HEIGHT as i32);
        for py in y_start..y_end {
            for px in x_start..x_end {
                self.set_pixel(px, py, on);
            }
        }
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use super::PixelBuffer;
    use crate::color::Color;
    use embedded_graphics_core::prelude::*;

    /// For use with embedded_grahics
    impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> DrawTarget
        for PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>
    {
        type Color = Color;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                self.set_pixel(point.x, point.y, color.is_set());
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            PixelBuffer::clear(self, color);
            Ok(())
        }
    }

    /// For use with embedded_grahics
    impl<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize> OriginDimensions
        for PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>
    {
        fn size(&self) -> Size {
            Size::new(WIDTH, HEIGHT)
        }
    }
}
