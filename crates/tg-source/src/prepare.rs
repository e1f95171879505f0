//! Préparation des images selon le mode du template.

use anyhow::Result;
use tg_core::config::ModeKind;
use tg_core::frame::PixelBuffer;

use crate::resize::{center_crop, resize};

/// Resize for rendering at `width` columns.
///
/// `half_hd` packs two pixel rows into one cell, so its aspect is doubled.
///
/// # Errors
/// Returns an error if `width` is zero or the resize fails.
///
/// # Example
/// ```
/// use tg_core::config::ModeKind;
/// use tg_core::frame::PixelBuffer;
/// use tg_source::prepare::prepare_image;
///
/// let src = PixelBuffer::filled(100, 100, (0, 0, 0));
/// assert_eq!(prepare_image(&src, 20, 0.5, ModeKind::CharLuminance).unwrap().height(), 10);
/// assert_eq!(prepare_image(&src, 20, 0.5, ModeKind::HalfHd).unwrap().height(), 20);
/// ```
pub fn prepare_image(
    src: &PixelBuffer,
    width: u32,
    aspect: f32,
    mode: ModeKind,
) -> Result<PixelBuffer> {
    let aspect = if mode == ModeKind::HalfHd { aspect * 2.0 } else { aspect };
    resize(src, width, aspect)
}

/// Center-crop to the preview box, then resize to `preview_w` columns.
///
/// Aspect is fixed: 1.0 for `half_hd`, 0.5 otherwise.
///
/// # Errors
/// Returns an error if `preview_w` is zero or the resize fails.
///
/// # Example
/// ```
/// use tg_core::config::ModeKind;
/// use tg_core::frame::PixelBuffer;
/// use tg_source::prepare::prepare_preview;
///
/// let src = PixelBuffer::filled(1920, 1080, (0, 0, 0));
/// let out = prepare_preview(&src, 40, 12, ModeKind::PixelRaw).unwrap();
/// assert_eq!((out.width(), out.height()), (40, 6));
/// ```
pub fn prepare_preview(
    src: &PixelBuffer,
    preview_w: u32,
    preview_h: u32,
    mode: ModeKind,
) -> Result<PixelBuffer> {
    let cropped = center_crop(src, preview_w, preview_h);
    let aspect = if mode == ModeKind::HalfHd { 1.0 } else { 0.5 };
    resize(&cropped, preview_w, aspect)
}
