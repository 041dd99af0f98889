use embedded_graphics::{
    geometry::{OriginDimensions, Point},
    image::GetPixel,
    mono_font::MonoFont,
    pixelcolor::BinaryColor,
};

use super::{Font, GlyphMetrics};

impl GlyphMetrics for MonoFont<'_> {
    fn line_height(&self) -> u32 {
        self.character_size.height
    }

    fn advance_width(&self, _c: char) -> u32 {
        self.character_size.width + self.character_spacing
    }
}

impl Font for MonoFont<'_> {
    fn stroke(&self, c: char, x: u32, y: u32) -> bool {
        let cell = self.character_size;
        // the spacing column is empty
        if x >= cell.width || y >= cell.height || cell.width == 0 {
            return false;
        }
        let glyphs_per_row = self.image.size().width / cell.width;
        if glyphs_per_row == 0 {
            return false;
        }
        let index = self.glyph_mapping.index(c) as u32;
        let origin_x = (index % glyphs_per_row) * cell.width;
        let origin_y = (index / glyphs_per_row) * cell.height;
        let at = Point::new((origin_x + x) as i32, (origin_y + y) as i32);
        self.image.pixel(at) == Some(BinaryColor::On)
    }
}
