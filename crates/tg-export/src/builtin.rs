//! Peintre de glyphes intégré, sans police.
//!
//! Block elements (U+2580–U+259F) are drawn exactly; shades are ordered
//! stipples; common ramp characters use 5×5 bitmaps scaled into the cell;
//! anything else becomes a centered box whose area follows the character's
//! visual weight.

/// 5×5 bitmaps, one byte per row, bit 4 = leftmost column.
fn bitmap(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        '.' => [0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        ',' => [0b00000, 0b00000, 0b00000, 0b00100, 0b01000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00100, 0b00000],
        ';' => [0b00000, 0b00100, 0b00000, 0b00100, 0b01000],
        '\'' | '`' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000],
        '^' => [0b00100, 0b01010, 0b00000, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b11111, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '~' => [0b00000, 0b01000, 0b10101, 0b00010, 0b00000],
        '=' => [0b00000, 0b11111, 0b00000, 0b11111, 0b00000],
        '+' => [0b00100, 0b00100, 0b11111, 0b00100, 0b00100],
        '*' => [0b10101, 0b01110, 0b11111, 0b01110, 0b10101],
        '|' | '!' | 'l' | 'I' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '/' => [0b00001, 0b00010, 0b00100, 0b01000, 0b10000],
        '\\' => [0b10000, 0b01000, 0b00100, 0b00010, 0b00001],
        'o' | 'O' | '0' => [0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'x' | 'X' => [0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        '#' => [0b01010, 0b11111, 0b01010, 0b11111, 0b01010],
        '%' => [0b11001, 0b11010, 0b00100, 0b01011, 0b10011],
        '&' => [0b01100, 0b10010, 0b01101, 0b10010, 0b01101],
        '$' => [0b01111, 0b10100, 0b01110, 0b00101, 0b11110],
        '@' => [0b01110, 0b10001, 0b10111, 0b10000, 0b01110],
        'A' => [0b01110, 0b10001, 0b11111, 0b10001, 0b10001],
        'M' => [0b10001, 0b11011, 0b10101, 0b10001, 0b10001],
        'W' => [0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'B' | '8' => [0b11110, 0b10001, 0b11110, 0b10001, 0b11110],
        _ => return None,
    };
    Some(rows)
}

/// Visual weight in `[0, 1]` for characters without a bitmap.
fn weight(ch: char) -> f32 {
    match ch {
        'a'..='z' => 0.45,
        'A'..='Z' | '0'..='9' => 0.55,
        c if c.is_whitespace() => 0.0,
        _ => 0.35,
    }
}

/// Paint `ch` into a `width × height` alpha mask (0 or 255 per pixel).
///
/// # Example
/// ```
/// use tg_export::builtin::paint;
/// let mask = paint('▀', 8, 14);
/// assert!(mask[..8 * 7].iter().all(|&a| a == 255));
/// assert!(mask[8 * 7..].iter().all(|&a| a == 0));
/// ```
#[must_use]
pub fn paint(ch: char, width: u32, height: u32) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let mut mask = vec![0u8; w * h];
    if w == 0 || h == 0 || ch.is_whitespace() {
        return mask;
    }

    if let Some(cover) = block_cover(ch) {
        for y in 0..h {
            for x in 0..w {
                if cover(x, y, w, h) {
                    mask[y * w + x] = 255;
                }
            }
        }
        return mask;
    }

    if let Some(rows) = bitmap(ch) {
        // Marge d'un pixel horizontalement, deux verticalement.
        let (mx, my) = (1.min(w / 4), 2.min(h / 4));
        let (iw, ih) = (w - 2 * mx, h - 2 * my);
        for y in 0..ih {
            let row = rows[y * 5 / ih];
            for x in 0..iw {
                if row & (0b10000 >> (x * 5 / iw)) != 0 {
                    mask[(y + my) * w + x + mx] = 255;
                }
            }
        }
        return mask;
    }

    let side = weight(ch).sqrt();
    let bw = ((w as f32 * side).round() as usize).clamp(1, w);
    let bh = ((h as f32 * side).round() as usize).clamp(1, h);
    let (x0, y0) = ((w - bw) / 2, (h - bh) / 2);
    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            mask[y * w + x] = 255;
        }
    }
    mask
}

type Cover = fn(usize, usize, usize, usize) -> bool;

/// Coverage predicate `(x, y, w, h)` for block elements and shades.
fn block_cover(ch: char) -> Option<Cover> {
    let cover: Cover = match ch {
        '█' => |_, _, _, _| true,
        '▀' => |_, y, _, h| y < h / 2,
        '▄' => |_, y, _, h| y >= h / 2,
        '▌' => |x, _, w, _| x < w / 2,
        '▐' => |x, _, w, _| x >= w / 2,
        '▔' => |_, y, _, h| y < h.div_ceil(8),
        '▕' => |x, _, w, _| x >= w - w.div_ceil(8),
        '▁' => |_, y, _, h| y >= h - h / 8,
        '▂' => |_, y, _, h| y >= h - h * 2 / 8,
        '▃' => |_, y, _, h| y >= h - h * 3 / 8,
        '▅' => |_, y, _, h| y >= h - h * 5 / 8,
        '▆' => |_, y, _, h| y >= h - h * 6 / 8,
        '▇' => |_, y, _, h| y >= h - h * 7 / 8,
        '▉' => |x, _, w, _| x < w * 7 / 8,
        '▊' => |x, _, w, _| x < w * 6 / 8,
        '▋' => |x, _, w, _| x < w * 5 / 8,
        '▍' => |x, _, w, _| x < w * 3 / 8,
        '▎' => |x, _, w, _| x < w * 2 / 8,
        '▏' => |x, _, w, _| x < w / 8,
        '░' => |x, y, _, _| x % 2 == 0 && y % 2 == 0,
        '▒' => |x, y, _, _| (x + y) % 2 == 0,
        '▓' => |x, y, _, _| x % 2 == 0 || y % 2 == 0,
        '▖' | '▗' | '▘' | '▙' | '▚' | '▛' | '▜' | '▝' | '▞' | '▟' => return quadrant_cover(ch),
        _ => return None,
    };
    Some(cover)
}

/// Quadrants U+2596–U+259F.
fn quadrant_cover(ch: char) -> Option<Cover> {
    // Bits : 1 = haut-gauche, 2 = haut-droite, 4 = bas-gauche, 8 = bas-droite.
    let cover: Cover = match ch {
        '▖' => |x, y, w, h| quad(4, x, y, w, h),
        '▗' => |x, y, w, h| quad(8, x, y, w, h),
        '▘' => |x, y, w, h| quad(1, x, y, w, h),
        '▙' => |x, y, w, h| quad(1 | 4 | 8, x, y, w, h),
        '▚' => |x, y, w, h| quad(1 | 8, x, y, w, h),
        '▛' => |x, y, w, h| quad(1 | 2 | 4, x, y, w, h),
        '▜' => |x, y, w, h| quad(1 | 2 | 8, x, y, w, h),
        '▝' => |x, y, w, h| quad(2, x, y, w, h),
        '▞' => |x, y, w, h| quad(2 | 4, x, y, w, h),
        '▟' => |x, y, w, h| quad(2 | 4 | 8, x, y, w, h),
        _ => return None,
    };
    Some(cover)
}

fn quad(mask: u8, x: usize, y: usize, w: usize, h: usize) -> bool {
    let bit = match (x >= w / 2, y >= h / 2) {
        (false, false) => 1,
        (true, false) => 2,
        (false, true) => 4,
        (true, true) => 8,
    };
    mask & bit != 0
}

/// True for characters the painter draws exactly.
#[must_use]
pub fn is_block_element(ch: char) -> bool {
    block_cover(ch).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(ch: char) -> f32 {
        let mask = paint(ch, 8, 14);
        mask.iter().filter(|&&a| a == 255).count() as f32 / mask.len() as f32
    }

    #[test]
    fn full_and_empty() {
        assert!((coverage('█') - 1.0).abs() < f32::EPSILON);
        assert!(coverage(' ').abs() < f32::EPSILON);
    }

    #[test]
    fn lower_half_is_the_complement_of_upper_half() {
        let top = paint('▀', 8, 14);
        let bottom = paint('▄', 8, 14);
        assert!(top.iter().zip(&bottom).all(|(a, b)| a ^ b == 255));
    }

    #[test]
    fn shades_get_darker() {
        let (light, medium, dark) = (coverage('░'), coverage('▒'), coverage('▓'));
        assert!(light < medium && medium < dark && dark < 1.0);
        assert!((medium - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn quadrants_cover_a_quarter_each() {
        assert!((coverage('▘') - 0.25).abs() < f32::EPSILON);
        assert!((coverage('▚') - 0.5).abs() < f32::EPSILON);
        assert!((coverage('▙') - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn ramp_characters_grow_with_density() {
        assert!(coverage('.') < coverage(':'));
        assert!(coverage(':') < coverage('#'));
    }

    #[test]
    fn unknown_characters_get_a_centered_box() {
        let mask = paint('漢', 8, 14);
        assert!(mask.iter().any(|&a| a == 255));
        // Coins vides.
        assert_eq!(mask[0], 0);
        assert_eq!(mask[8 * 14 - 1], 0);
    }

    #[test]
    fn block_elements_are_recognised() {
        assert!(is_block_element('▀'));
        assert!(is_block_element('▓'));
        assert!(!is_block_element('#'));
    }
}
