use tg_core::charset::Ramp;
use tg_core::color::{brightness, gray_level};
use tg_core::config::ColorStrategy;
use tg_core::frame::{AsciiCell, AsciiGrid, PixelBuffer};

use crate::color_map;
use crate::filters::desaturate;

/// Process a frame into a grid using luminance mapping.
///
/// For each pixel, computes its BT.709 brightness, maps it to a character
/// of the ramp, and colors the foreground per `strategy`.
///
/// # Example
/// ```
/// use tg_core::charset::Ramp;
/// use tg_core::config::ColorStrategy;
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::luminance::process_char_luminance;
///
/// let ramp = Ramp::new(" .:#@", "char_luminance").unwrap();
/// let grid = process_char_luminance(&PixelBuffer::filled(2, 1, (255, 255, 255)), &ramp, false, ColorStrategy::Truecolor);
/// assert_eq!(grid.get(0, 0).ch, '@');
/// assert_eq!(grid.get(0, 0).fg, Some((255, 255, 255)));
/// ```
#[must_use]
pub fn process_char_luminance(
    frame: &PixelBuffer,
    ramp: &Ramp,
    invert: bool,
    strategy: ColorStrategy,
) -> AsciiGrid {
    let mut grid = AsciiGrid::new(frame.width(), frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let rgb = frame.pixel(x, y);
            let b = brightness(rgb.0, rgb.1, rgb.2);
            grid.set(
                x,
                y,
                AsciiCell {
                    ch: ramp.map(b, invert),
                    fg: color_map::map_color(rgb, strategy),
                    bg: None,
                },
            );
        }
    }
    grid
}

/// Gray-level mode: desaturate, then ramp glyph with a gray foreground.
///
/// # Example
/// ```
/// use tg_core::charset::Ramp;
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::luminance::process_gray_level;
///
/// let ramp = Ramp::new("░▒▓█", "gray_level").unwrap();
/// let grid = process_gray_level(&PixelBuffer::filled(1, 1, (0, 0, 0)), &ramp, false);
/// assert_eq!(grid.get(0, 0).ch, '░');
/// assert_eq!(grid.get(0, 0).fg, Some((0, 0, 0)));
/// ```
#[must_use]
pub fn process_gray_level(frame: &PixelBuffer, ramp: &Ramp, invert: bool) -> AsciiGrid {
    let gray = desaturate(frame);
    let mut grid = AsciiGrid::new(gray.width(), gray.height());
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            let (r, g, b) = gray.pixel(x, y);
            let br = brightness(r, g, b);
            let level = gray_level(r, g, b);
            grid.set(
                x,
                y,
                AsciiCell {
                    ch: ramp.map(br, invert),
                    fg: Some((level, level, level)),
                    bg: None,
                },
            );
        }
    }
    grid
}
