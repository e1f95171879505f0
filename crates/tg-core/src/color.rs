/// Couleur RGB 24 bits.
pub type Rgb = (u8, u8, u8);

/// Luminance perceptuelle BT.709 normalisée dans [0.0, 1.0].
///
/// Calculée en entier puis divisée une seule fois, ce qui garantit
/// exactement 0.0 pour le noir et 1.0 pour le blanc.
///
/// # Example
/// ```
/// use tg_core::color::brightness;
/// assert_eq!(brightness(0, 0, 0), 0.0);
/// assert_eq!(brightness(255, 255, 255), 1.0);
/// assert!(brightness(0, 255, 0) > brightness(255, 0, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn brightness(r: u8, g: u8, b: u8) -> f32 {
    weighted_709(r, g, b) as f32 / 2_550_000.0
}

/// Somme pondérée BT.709 entière, `brightness · 2 550 000`.
#[inline(always)]
fn weighted_709(r: u8, g: u8, b: u8) -> u32 {
    u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722
}

/// Luma ITU-R 601-2, the weighting used for desaturation (`L` conversion).
///
/// # Example
/// ```
/// use tg_core::color::luma_601;
/// assert_eq!(luma_601(255, 255, 255), 255);
/// assert_eq!(luma_601(0, 0, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let acc = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (acc >> 16) as u8
}

/// Niveau de gris `floor(brightness · 255)` d'un pixel.
///
/// Division entière de la somme pondérée : aucun arrondi flottant.
///
/// # Example
/// ```
/// use tg_core::color::gray_level;
/// assert_eq!(gray_level(255, 255, 255), 255);
/// assert_eq!(gray_level(76, 76, 76), 76);
/// assert_eq!(gray_level(0, 7, 83), 10);
/// ```
#[inline(always)]
#[must_use]
pub fn gray_level(r: u8, g: u8, b: u8) -> u8 {
    (weighted_709(r, g, b) / 10_000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_is_bounded_and_monotonic_per_channel() {
        for base in (0..=255).step_by(15) {
            let base = base as u8;
            let mut prev = (-1.0f32, -1.0f32, -1.0f32);
            for v in 0..=255u8 {
                let r = brightness(v, base, base);
                let g = brightness(base, v, base);
                let b = brightness(base, base, v);
                for x in [r, g, b] {
                    assert!((0.0..=1.0).contains(&x), "hors bornes : {x}");
                }
                assert!(r >= prev.0 && g >= prev.1 && b >= prev.2);
                prev = (r, g, b);
            }
        }
    }

    #[test]
    fn brightness_extremes_are_exact() {
        assert!(brightness(0, 0, 0).abs() < f32::EPSILON);
        assert!((brightness(255, 255, 255) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn gray_level_recovers_gray_pixels() {
        for v in 0..=255u8 {
            assert_eq!(gray_level(v, v, v), v);
        }
    }

    #[test]
    fn gray_level_floors_just_below_an_integer() {
        // 0·2126 + 7·7152 + 83·722 = 109 990 → b·255 = 10.999
        assert_eq!(gray_level(0, 7, 83), 10);
        assert_eq!(gray_level(255, 0, 0), 54);
    }

    #[test]
    fn luma_601_of_gray_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(luma_601(v, v, v), v);
        }
    }
}
