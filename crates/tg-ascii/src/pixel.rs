use tg_core::frame::{AsciiCell, AsciiGrid, PixelBuffer};

use crate::filters::mosaic;

/// Taille de bloc du mode mosaïque.
pub const MOSAIC_BLOCK: u32 = 2;

/// Process frame in pixel mode: one cell per pixel, background color, space glyph.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::pixel::process_pixel_raw;
///
/// let grid = process_pixel_raw(&PixelBuffer::filled(2, 2, (255, 0, 0)));
/// assert_eq!((grid.width, grid.height), (2, 2));
/// assert_eq!(grid.get(1, 1).bg, Some((255, 0, 0)));
/// assert_eq!(grid.get(1, 1).ch, ' ');
/// ```
#[must_use]
pub fn process_pixel_raw(frame: &PixelBuffer) -> AsciiGrid {
    let mut grid = AsciiGrid::new(frame.width(), frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            grid.set(
                x,
                y,
                AsciiCell {
                    ch: ' ',
                    fg: None,
                    bg: Some(frame.pixel(x, y)),
                },
            );
        }
    }
    grid
}

/// Pixel mode on a 2×2 block-averaged copy of the frame.
#[must_use]
pub fn process_pixel_mosaic(frame: &PixelBuffer) -> AsciiGrid {
    process_pixel_raw(&mosaic(frame, MOSAIC_BLOCK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mosaic_on_uniform_image_matches_raw() {
        let px = PixelBuffer::filled(5, 3, (40, 80, 120));
        assert_eq!(process_pixel_mosaic(&px), process_pixel_raw(&px));
    }

    #[test]
    fn raw_keeps_geometry_one_to_one() {
        let px = PixelBuffer::from_fn(3, 2, |x, y| (x as u8, y as u8, 0));
        let grid = process_pixel_raw(&px);
        assert_eq!((grid.width, grid.height), (3, 2));
        assert_eq!(grid.get(2, 1).bg, Some((2, 1, 0)));
        assert!(grid.cells.iter().all(|c| c.fg.is_none()));
    }
}
