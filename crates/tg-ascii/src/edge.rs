use tg_core::charset::Ramp;
use tg_core::color::{brightness, luma_601};
use tg_core::frame::{AsciiCell, AsciiGrid, PixelBuffer};

/// Seuil de luminance sous lequel un contour est supprimé.
pub const EDGE_THRESHOLD: f32 = 0.1;

/// Find-edges filter on the desaturated frame.
///
/// 3×3 kernel with -1 around and 8 at the center, clamped to [0, 255] and
/// replicated to RGB. Border pixels keep their unfiltered luma.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::edge::find_edges;
///
/// let flat = find_edges(&PixelBuffer::filled(5, 5, (90, 90, 90)));
/// assert_eq!(flat.pixel(2, 2), (0, 0, 0));
/// assert_eq!(flat.pixel(0, 0), (90, 90, 90));
/// ```
#[must_use]
pub fn find_edges(frame: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (frame.width(), frame.height());
    let luma = |x: u32, y: u32| {
        let (r, g, b) = frame.pixel(x, y);
        i32::from(luma_601(r, g, b))
    };

    PixelBuffer::from_fn(w, h, |x, y| {
        let v = if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            luma(x, y)
        } else {
            let mut acc = 8 * luma(x, y);
            for (dx, dy) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
                acc -= luma(x + dx - 1, y + dy - 1);
            }
            acc.clamp(0, 255)
        };
        let v = v as u8;
        (v, v, v)
    })
}

/// Edge mode: filter, then glyph by coarse bucket, dark pixels suppressed.
///
/// A pixel whose brightness (after optional invert) is `<= 0.1` becomes an
/// uncolored space; otherwise the glyph is `charset[min(floor(b · n), n - 1)]`.
/// No color is carried.
///
/// # Example
/// ```
/// use tg_core::charset::Ramp;
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::edge::process_edge_structure;
///
/// let ramp = Ramp::new("/\\|_-", "edge_structure").unwrap();
/// let grid = process_edge_structure(&PixelBuffer::filled(3, 3, (0, 0, 0)), &ramp, false);
/// assert!(grid.cells.iter().all(|c| c.ch == ' ' && c.fg.is_none()));
/// ```
#[must_use]
pub fn process_edge_structure(frame: &PixelBuffer, ramp: &Ramp, invert: bool) -> AsciiGrid {
    let edges = find_edges(frame);
    let mut grid = AsciiGrid::new(edges.width(), edges.height());
    for y in 0..edges.height() {
        for x in 0..edges.width() {
            let (r, g, b) = edges.pixel(x, y);
            let mut br = brightness(r, g, b);
            if invert {
                br = 1.0 - br;
            }
            let ch = if br > EDGE_THRESHOLD { ramp.bucket(br) } else { ' ' };
            grid.set(
                x,
                y,
                AsciiCell {
                    ch,
                    fg: None,
                    bg: None,
                },
            );
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Ramp {
        Ramp::new("/\\|_-", "edge_structure").unwrap()
    }

    #[test]
    fn isolated_bright_pixel_is_an_edge() {
        let px = PixelBuffer::from_fn(5, 5, |x, y| {
            if (x, y) == (2, 2) { (255, 255, 255) } else { (0, 0, 0) }
        });
        let edges = find_edges(&px);
        assert_eq!(edges.pixel(2, 2), (255, 255, 255));
        // Voisins : -255 clampé à 0.
        assert_eq!(edges.pixel(1, 2), (0, 0, 0));

        let grid = process_edge_structure(&px, &lines(), false);
        assert_eq!(grid.get(2, 2).ch, '-');
        assert_eq!(grid.get(1, 1).ch, ' ');
    }

    #[test]
    fn invert_lights_up_flat_regions() {
        let px = PixelBuffer::filled(4, 4, (0, 0, 0));
        let grid = process_edge_structure(&px, &lines(), true);
        // b inversé = 1.0 → dernier caractère.
        assert!(grid.cells.iter().all(|c| c.ch == '-'));
        assert!(grid.cells.iter().all(|c| c.fg.is_none() && c.bg.is_none()));
    }

    #[test]
    fn threshold_is_inclusive() {
        // luma 25 → b ≈ 0.098 ≤ 0.1 : supprimé ; luma 26 → b ≈ 0.102 : conservé.
        let dim = process_edge_structure(&PixelBuffer::filled(1, 1, (25, 25, 25)), &lines(), false);
        assert_eq!(dim.get(0, 0).ch, ' ');
        let lit = process_edge_structure(&PixelBuffer::filled(1, 1, (26, 26, 26)), &lines(), false);
        assert_eq!(lit.get(0, 0).ch, '/');
    }
}
