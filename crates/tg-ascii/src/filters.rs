//! Filtres pixel purs appliqués avant certains modes.

use tg_core::color::luma_601;
use tg_core::frame::PixelBuffer;

/// Désature le buffer : luma ITU-R 601-2 répliquée sur R, G et B.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::filters::desaturate;
/// let gray = desaturate(&PixelBuffer::filled(2, 2, (255, 0, 0)));
/// assert_eq!(gray.pixel(1, 1), (76, 76, 76));
/// ```
#[must_use]
pub fn desaturate(frame: &PixelBuffer) -> PixelBuffer {
    PixelBuffer::from_fn(frame.width(), frame.height(), |x, y| {
        let (r, g, b) = frame.pixel(x, y);
        let l = luma_601(r, g, b);
        (l, l, l)
    })
}

/// Mosaïque : moyenne par blocs `block × block` puis agrandissement au plus proche.
///
/// The reduced image is `max(1, w / block) × max(1, h / block)`; each reduced
/// pixel averages (with rounding) the source region it covers, and the
/// output samples it back at the original size, nearest to each pixel
/// center. A uniform or empty image is returned unchanged.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::filters::mosaic;
/// let px = PixelBuffer::from_fn(2, 2, |x, y| if x == y { (200, 0, 0) } else { (0, 0, 0) });
/// let m = mosaic(&px, 2);
/// assert_eq!(m.pixel(0, 0), (100, 0, 0));
/// assert_eq!(m.pixel(1, 0), (100, 0, 0));
/// ```
#[must_use]
pub fn mosaic(frame: &PixelBuffer, block: u32) -> PixelBuffer {
    let block = block.max(1);
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return frame.clone();
    }
    let sw = (w / block).max(1);
    let sh = (h / block).max(1);

    let mut small = Vec::with_capacity(sw as usize * sh as usize);
    for sy in 0..sh {
        let y0 = sy * h / sh;
        let y1 = ((sy + 1) * h / sh).max(y0 + 1);
        for sx in 0..sw {
            let x0 = sx * w / sw;
            let x1 = ((sx + 1) * w / sw).max(x0 + 1);
            let mut sum = [0u32; 3];
            for y in y0..y1 {
                for x in x0..x1 {
                    let (r, g, b) = frame.pixel(x, y);
                    sum[0] += u32::from(r);
                    sum[1] += u32::from(g);
                    sum[2] += u32::from(b);
                }
            }
            let count = (y1 - y0) * (x1 - x0);
            let avg = |s: u32| ((s + count / 2) / count) as u8;
            small.push((avg(sum[0]), avg(sum[1]), avg(sum[2])));
        }
    }

    PixelBuffer::from_fn(w, h, |x, y| {
        // Centre du pixel : floor((x + 0.5) · sw / w).
        let sx = ((2 * x + 1) * sw / (2 * w)).min(sw - 1);
        let sy = ((2 * y + 1) * sh / (2 * h)).min(sh - 1);
        small[(sy * sw + sx) as usize]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mosaic_of_uniform_image_is_identity() {
        for (w, h) in [(1, 1), (3, 5), (4, 4), (7, 2)] {
            let px = PixelBuffer::filled(w, h, (12, 200, 99));
            assert_eq!(mosaic(&px, 2), px);
        }
    }

    #[test]
    fn mosaic_averages_each_block() {
        let px = PixelBuffer::from_fn(4, 2, |x, _| if x < 2 { (10, 20, 30) } else { (30, 40, 51) });
        let m = mosaic(&px, 2);
        assert_eq!(m.pixel(0, 1), (10, 20, 30));
        assert_eq!(m.pixel(3, 0), (30, 40, 51));

        let checker = PixelBuffer::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 { (255, 255, 255) } else { (0, 0, 0) }
        });
        // (510 + 2) / 4 = 128
        assert_eq!(mosaic(&checker, 2).pixel(1, 1), (128, 128, 128));
    }

    #[test]
    fn upsample_picks_the_block_under_the_pixel_center() {
        let px = PixelBuffer::from_fn(5, 1, |x, _| if x < 2 { (10, 10, 10) } else { (90, 90, 90) });
        let m = mosaic(&px, 2);
        // Colonne 2 : centre à 2.5 · 2/5 = 1.0 → second bloc.
        assert_eq!(m.pixel(1, 0), (10, 10, 10));
        assert_eq!(m.pixel(2, 0), (90, 90, 90));
        assert_eq!(m.pixel(4, 0), (90, 90, 90));
    }

    #[test]
    fn mosaic_of_empty_buffer_is_empty() {
        for (w, h) in [(0, 0), (0, 3), (4, 0)] {
            let px = PixelBuffer::filled(w, h, (1, 2, 3));
            let m = mosaic(&px, 2);
            assert_eq!((m.width(), m.height()), (w, h));
            assert!(m.data().is_empty());
        }
    }

    #[test]
    fn desaturate_keeps_grays() {
        let px = PixelBuffer::from_fn(3, 1, |x, _| {
            let v = (x * 100) as u8;
            (v, v, v)
        });
        assert_eq!(desaturate(&px), px);
    }
}
