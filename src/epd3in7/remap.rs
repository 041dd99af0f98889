//! Canvas to panel memory remap
//!
//! The canvas is the panel turned by 90°: 480x280 pixels packed
//! [vertically](crate::buffer::Packing::VerticalLsb), i.e. 35 pages of 480 column bytes.
//! The panel RAM takes 480 rows of 35 [horizontally](crate::buffer::Packing::HorizontalMsb)
//! packed bytes. Both grids hold the same bytes, only transposed:
//!
//! canvas byte `(page, column)` is native byte `(row = column, byte = 34 - page)`.
//!
//! Bit order doesn't need to change. Bit `b` of page `p` is canvas row `8p + b`; in the
//! native byte it lands `7 - b` pixels from the left edge of byte `34 - p`, which is native
//! x `279 - (8p + b)`. So canvas pixel `(cx, cy)` ends up at native `(279 - cy, cx)`.
//!
//! Only derived for the 280x480 panel; a different geometry needs this re-checked.

use super::{HEIGHT, WIDTH_BYTES};

/// Native bytes of one frame
pub const FRAME_LEN: usize = WIDTH_BYTES * HEIGHT as usize;

/// Canvas byte index feeding native byte `native_index`
#[inline]
pub fn canvas_index(native_index: usize) -> usize {
    let row = native_index / WIDTH_BYTES;
    let byte = native_index % WIDTH_BYTES;
    let page = WIDTH_BYTES - 1 - byte;
    page * HEIGHT as usize + row
}

/// Native byte index a canvas byte is moved to
#[inline]
pub fn native_index(canvas_index: usize) -> usize {
    let page = canvas_index / HEIGHT as usize;
    let column = canvas_index % HEIGHT as usize;
    column * WIDTH_BYTES + (WIDTH_BYTES - 1 - page)
}

/// Iterates the canvas bytes in the order the panel expects them
///
/// Lets a frame be streamed without a second 16800 byte buffer.
pub fn native_bytes(canvas: &[u8]) -> impl Iterator<Item = u8> + '_ {
    assert_eq!(canvas.len(), FRAME_LEN);
    (0..FRAME_LEN).map(move |index| canvas[canvas_index(index)])
}

/// Writes the remapped canvas into `native`
pub fn remap_into(canvas: &[u8], native: &mut [u8]) {
    assert_eq!(canvas.len(), FRAME_LEN);
    assert_eq!(native.len(), FRAME_LEN);
    for (index, byte) in canvas.iter().enumerate() {
        native[native_index(index)] = *byte;
    }
}
