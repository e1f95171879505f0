use tg_core::color::{Rgb, gray_level};
use tg_core::config::ColorStrategy;

/// Map a pixel color according to the selected color strategy.
///
/// # Example
/// ```
/// use tg_ascii::color_map::map_color;
/// use tg_core::config::ColorStrategy;
/// assert_eq!(map_color((200, 50, 50), ColorStrategy::Truecolor), Some((200, 50, 50)));
/// assert_eq!(map_color((200, 50, 50), ColorStrategy::Grayscale), Some((81, 81, 81)));
/// assert_eq!(map_color((200, 50, 50), ColorStrategy::Mono), None);
/// ```
#[inline(always)]
#[must_use]
pub fn map_color(rgb: Rgb, strategy: ColorStrategy) -> Option<Rgb> {
    match strategy {
        ColorStrategy::Truecolor => Some(rgb),
        ColorStrategy::Grayscale => {
            let gray = gray_level(rgb.0, rgb.1, rgb.2);
            Some((gray, gray, gray))
        }
        ColorStrategy::Mono => None,
    }
}
