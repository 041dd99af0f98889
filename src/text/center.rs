use log::debug;

use super::Font;
use crate::buffer::PixelBuffer;

/// Centers a block of text lines on a buffer
///
/// Every line is centered on its own, the block as a whole is centered vertically.
/// Lines are painted inverted by default: the glyph cells are set and the strokes are
/// cleared, which is dark text on a white bar on the panel. Nothing wraps, what doesn't
/// fit is clipped.
pub struct CenterWriter<'a, F: ?Sized> {
    font: &'a F,
    spacing: u32,
    inverted: bool,
}

/// Placement of one line, see [`CenterWriter::layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutLine<'l> {
    /// Position of the line in the block
    pub index: usize,
    pub text: &'l str,
    /// Top edge
    pub row: u32,
    /// Left edge
    pub col: u32,
    /// Width of the text in pixels
    pub width: u32,
}

/// Iterator over the lines of a block that get drawn
pub struct Layout<'a, 'l, F: ?Sized, I> {
    font: &'a F,
    lines: I,
    width: u32,
    height: u32,
    step: u32,
    row: u32,
    index: usize,
    done: bool,
    _text: core::marker::PhantomData<&'l str>,
}

impl<'a, 'l, F, I> Iterator for Layout<'a, 'l, F, I>
where
    F: Font + ?Sized,
    I: Iterator<Item = &'l str>,
{
    type Item = LayoutLine<'l>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let text = self.lines.next()?;
        let width = self.font.string_width(text);
        // equal width is left aligned
        let col = if width < self.width {
            (self.width - width) / 2
        } else {
            0
        };
        let line = LayoutLine {
            index: self.index,
            text,
            row: self.row,
            col,
            width,
        };

        self.index += 1;
        self.row = self.row.saturating_add(self.step);
        if self.row >= self.height {
            self.done = true;
        }
        Some(line)
    }
}

impl<'a, F: Font + ?Sized> CenterWriter<'a, F> {
    /// Inverted writer without vertical spacing
    pub fn new(font: &'a F) -> Self {
        CenterWriter {
            font,
            spacing: 0,
            inverted: true,
        }
    }

    /// Pixels inserted between two lines
    pub fn set_vertical_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub fn vertical_spacing(&self) -> u32 {
        self.spacing
    }

    /// With `false` strokes are set and the rest of the cell is cleared
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    pub fn font(&self) -> &'a F {
        self.font
    }

    /// Height of a block of `count` lines
    pub fn block_height(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.line_step()
            .saturating_mul(count)
            .saturating_sub(self.spacing)
    }

    fn line_step(&self) -> u32 {
        self.font.line_height().saturating_add(self.spacing)
    }

    /// Where the lines of a block go on a `width` x `height` area
    ///
    /// A block higher than the area starts at the top. Once a line would start at or
    /// below the bottom edge the remaining lines are dropped.
    pub fn layout<'l>(
        &self,
        width: u32,
        height: u32,
        lines: &'l [&'l str],
    ) -> Layout<'a, 'l, F, impl Iterator<Item = &'l str>> {
        self.layout_iter(width, height, lines.len(), lines.iter().copied())
    }

    fn layout_iter<'l, I>(
        &self,
        width: u32,
        height: u32,
        count: usize,
        lines: I,
    ) -> Layout<'a, 'l, F, I>
    where
        I: Iterator<Item = &'l str>,
    {
        let total_height = self.block_height(count);
        let row = if total_height < height {
            (height - total_height) / 2
        } else {
            0
        };
        Layout {
            font: self.font,
            lines,
            width,
            height,
            step: self.line_step(),
            row,
            index: 0,
            done: count == 0,
            _text: core::marker::PhantomData,
        }
    }

    /// Paints `lines` centered on `buffer`, returns how many lines were drawn
    pub fn write_lines<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>(
        &self,
        buffer: &mut PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>,
        lines: &[&str],
    ) -> usize {
        let layout = self.layout_iter(WIDTH, HEIGHT, lines.len(), lines.iter().copied());
        self.paint(buffer, layout)
    }

    /// Same as [`write_lines`](CenterWriter::write_lines) with `text` split at `'\n'`
    pub fn write_text<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>(
        &self,
        buffer: &mut PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>,
        text: &str,
    ) -> usize {
        self.write_split_lines(buffer, &[text])
    }

    /// Like [`write_lines`](CenterWriter::write_lines), but entries holding `'\n'`
    /// are broken up into several lines first
    pub fn write_split_lines<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>(
        &self,
        buffer: &mut PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>,
        lines: &[&str],
    ) -> usize {
        let split = || lines.iter().copied().flat_map(|entry| entry.split('\n'));
        let layout = self.layout_iter(WIDTH, HEIGHT, split().count(), split());
        self.paint(buffer, layout)
    }

    fn paint<'l, I, const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>(
        &self,
        buffer: &mut PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>,
        layout: Layout<'a, 'l, F, I>,
    ) -> usize
    where
        I: Iterator<Item = &'l str>,
    {
        let mut drawn = 0;
        for line in layout {
            self.paint_line(buffer, &line);
            drawn += 1;
        }
        debug!("painted {} centered lines", drawn);
        drawn
    }

    fn paint_line<const WIDTH: u32, const HEIGHT: u32, const BYTECOUNT: usize>(
        &self,
        buffer: &mut PixelBuffer<WIDTH, HEIGHT, BYTECOUNT>,
        line: &LayoutLine<'_>,
    ) {
        let line_height = self.font.line_height();
        let mut x = line.col;
        for c in line.text.chars() {
            // no wrapping
            if x >= WIDTH {
                break;
            }
            let advance = self.font.advance_width(c);
            for gy in 0..line_height {
                let py = line.row.saturating_add(gy);
                if py >= HEIGHT {
                    break;
                }
                for gx in 0..advance {
                    let px = x.saturating_add(gx);
                    if px >= WIDTH {
                        break;
                    }
                    let stroke = self.font.stroke(c, gx, gy);
                    buffer.set_pixel(px as i32, py as i32, stroke != self.inverted);
                }
            }
            x = x.saturating_add(advance);
        }
    }
}
