//! Text rendering on a [`PixelBuffer`](crate::buffer::PixelBuffer)
//!
//! Glyph data isn't part of this crate. A font is anything implementing [`Font`];
//! with the `graphics` feature every embedded-graphics `MonoFont` is one.

mod center;
#[cfg(feature = "graphics")]
mod mono_font;

pub use self::center::{CenterWriter, Layout, LayoutLine};

/// Sizes of the glyphs of a font, in pixels
///
/// Implementations must be deterministic and free of side effects.
pub trait GlyphMetrics {
    /// Height of every glyph cell
    fn line_height(&self) -> u32;

    /// Horizontal advance of `c`
    fn advance_width(&self, c: char) -> u32;

    /// Width of `text` drawn on one line
    fn string_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| self.advance_width(c))
            .fold(0, u32::saturating_add)
    }
}

/// A font that can be painted
pub trait Font: GlyphMetrics {
    /// Whether the glyph of `c` has a stroke at `(x, y)`, relative to the top left
    /// corner of its cell. Positions outside the cell have no stroke.
    fn stroke(&self, c: char, x: u32, y: u32) -> bool;
}

impl<F: GlyphMetrics + ?Sized> GlyphMetrics for &F {
    fn line_height(&self) -> u32 {
        (**self).line_height()
    }

    fn advance_width(&self, c: char) -> u32 {
        (**self).advance_width(c)
    }

    fn string_width(&self, text: &str) -> u32 {
        (**self).string_width(text)
    }
}

impl<F: Font + ?Sized> Font for &F {
    fn stroke(&self, c: char, x: u32, y: u32) -> bool {
        (**self).stroke(c, x, y)
    }
}
