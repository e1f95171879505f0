use std::path::Path;

use anyhow::{Context, Result};
use tg_core::frame::PixelBuffer;

use crate::resize::Resizer;

/// Côté maximal par défaut avant réduction.
pub const MAX_IMAGE_SIZE: u32 = 6000;

/// Load an image from disk as RGB.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use tg_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::info!("Image chargée : {} ({width}x{height})", path.display());
    PixelBuffer::from_raw(width, height, rgb.into_raw())
        .with_context(|| format!("Image vide : {}", path.display()))
}

/// Downscale so that the longer side does not exceed `max_size`.
///
/// Aspect ratio is kept; images already within bounds are returned as is.
///
/// # Errors
/// Returns an error if the resize fails.
///
/// # Example
/// ```
/// use tg_source::image::limit_image_size;
/// use tg_core::frame::PixelBuffer;
/// let big = PixelBuffer::filled(300, 150, (0, 0, 0));
/// let out = limit_image_size(big, 100).unwrap();
/// assert_eq!((out.width(), out.height()), (100, 50));
/// ```
pub fn limit_image_size(frame: PixelBuffer, max_size: u32) -> Result<PixelBuffer> {
    let (w, h) = (frame.width(), frame.height());
    let longest = w.max(h);
    if max_size == 0 || longest <= max_size {
        return Ok(frame);
    }
    let scale = |side: u32| (u64::from(side) * u64::from(max_size) / u64::from(longest)).max(1) as u32;
    let (new_w, new_h) = (scale(w), scale(h));
    log::warn!("Image {w}x{h} trop grande, réduite à {new_w}x{new_h}");
    Resizer::new().resize_to(&frame, new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let img = image::RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 50, y as u8 * 100, 7, 128]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (3, 2));
        // L'alpha est ignoré.
        assert_eq!(frame.pixel(2, 1), (100, 100, 7));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_image(Path::new("/nonexistent/nope.png")).unwrap_err();
        assert!(format!("{err}").contains("nope.png"));
    }

    #[test]
    fn small_images_are_untouched() {
        let frame = PixelBuffer::filled(10, 20, (1, 2, 3));
        let out = limit_image_size(frame.clone(), MAX_IMAGE_SIZE).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn portrait_is_limited_on_height() {
        let frame = PixelBuffer::filled(40, 200, (1, 2, 3));
        let out = limit_image_size(frame, 50).unwrap();
        assert_eq!((out.width(), out.height()), (10, 50));
    }
}
