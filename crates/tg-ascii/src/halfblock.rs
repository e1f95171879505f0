use tg_core::frame::{AsciiCell, AsciiGrid, PixelBuffer};

/// Demi-bloc supérieur.
pub const UPPER_HALF: char = '▀';
/// Demi-bloc inférieur.
pub const LOWER_HALF: char = '▄';

/// Process frame in half-block mode.
///
/// Each output row covers source rows `2y` and `2y + 1` (the second index
/// clamped to the last row), so the grid has `floor(h / 2)` rows. With `▀`
/// the top pixel is the foreground and the bottom one the background; with
/// `▄` the roles swap. Any other glyph selects `▀`.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::halfblock::process_half_hd;
///
/// let px = PixelBuffer::from_fn(1, 2, |_, y| if y == 0 { (255, 0, 0) } else { (0, 0, 255) });
/// let grid = process_half_hd(&px, '▀');
/// let cell = grid.get(0, 0);
/// assert_eq!(cell.ch, '▀');
/// assert_eq!(cell.fg, Some((255, 0, 0)));
/// assert_eq!(cell.bg, Some((0, 0, 255)));
/// ```
#[must_use]
pub fn process_half_hd(frame: &PixelBuffer, glyph: char) -> AsciiGrid {
    let glyph = if glyph == LOWER_HALF { LOWER_HALF } else { UPPER_HALF };
    let last_row = frame.height().saturating_sub(1);
    let mut grid = AsciiGrid::new(frame.width(), frame.height() / 2);

    for cy in 0..grid.height {
        let py_top = cy * 2;
        let py_bot = (py_top + 1).min(last_row);
        for cx in 0..grid.width {
            let top = frame.pixel(cx, py_top);
            let bottom = frame.pixel(cx, py_bot);
            let (fg, bg) = if glyph == UPPER_HALF {
                (top, bottom)
            } else {
                (bottom, top)
            };
            grid.set(
                cx,
                cy,
                AsciiCell {
                    ch: glyph,
                    fg: Some(fg),
                    bg: Some(bg),
                },
            );
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripes(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |_, y| (y as u8 * 10, 0, 0))
    }

    #[test]
    fn odd_height_halves_rows_without_overflow() {
        for h in [1u32, 3, 5, 7] {
            let grid = process_half_hd(&stripes(2, h), UPPER_HALF);
            assert_eq!(grid.height, h / 2);
            assert_eq!(grid.width, 2);
        }
        let grid = process_half_hd(&stripes(1, 5), UPPER_HALF);
        // Rangée 1 : lignes source 2 et 3.
        assert_eq!(grid.get(0, 1).fg, Some((20, 0, 0)));
        assert_eq!(grid.get(0, 1).bg, Some((30, 0, 0)));
    }

    #[test]
    fn lower_half_swaps_roles() {
        let grid = process_half_hd(&stripes(1, 2), LOWER_HALF);
        let cell = grid.get(0, 0);
        assert_eq!(cell.ch, LOWER_HALF);
        assert_eq!(cell.fg, Some((10, 0, 0)));
        assert_eq!(cell.bg, Some((0, 0, 0)));
    }

    #[test]
    fn unknown_glyph_falls_back_to_upper_half() {
        let grid = process_half_hd(&stripes(1, 2), '█');
        assert_eq!(grid.get(0, 0).ch, UPPER_HALF);
    }
}
