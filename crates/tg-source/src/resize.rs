use anyhow::{Context, Result, bail};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use tg_core::frame::PixelBuffer;

/// Resizer réutilisable wrappant fast_image_resize (Lanczos3, RGB).
///
/// # Example
/// ```
/// use tg_source::resize::Resizer;
/// use tg_core::frame::PixelBuffer;
/// let mut r = Resizer::new();
/// let out = r.resize_to(&PixelBuffer::filled(100, 100, (9, 9, 9)), 50, 25).unwrap();
/// assert_eq!((out.width(), out.height()), (50, 25));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Copie de la source : l'API exige un `&mut` sur l'image source.
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` to exactly `width × height`.
    ///
    /// # Errors
    /// Returns an error if a target dimension is zero or the resize fails.
    pub fn resize_to(&mut self, src: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            bail!("Dimensions cibles invalides : {width}×{height}");
        }
        if src.width() == width && src.height() == height {
            return Ok(src.clone());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(src.data());
        let src_image =
            Image::from_slice_u8(src.width(), src.height(), &mut self.src_buf, PixelType::U8x3)
                .context("Dimensions source invalides")?;

        let mut dst_buf = vec![0u8; width as usize * height as usize * 3];
        let mut dst_image = Image::from_slice_u8(width, height, &mut dst_buf, PixelType::U8x3)
            .context("Dimensions destination invalides")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Redimensionnement échoué")?;

        Ok(PixelBuffer::from_raw(width, height, dst_buf)?)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Output height for a target width: `max(1, floor(width · h / w · aspect))`.
///
/// `aspect` compensates for terminal cells being taller than wide.
///
/// # Example
/// ```
/// use tg_source::resize::target_height;
/// assert_eq!(target_height(400, 300, 80, 0.5), 30);
/// assert_eq!(target_height(1000, 1, 10, 0.5), 1);
/// ```
#[must_use]
pub fn target_height(src_w: u32, src_h: u32, width: u32, aspect: f32) -> u32 {
    let h = (f64::from(width) * f64::from(src_h) / f64::from(src_w.max(1)) * f64::from(aspect)).floor();
    if h.is_finite() && h >= 1.0 {
        h.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

/// Resize to `width` columns, height from [`target_height`].
///
/// # Errors
/// Returns an error if `width` is zero or the resize fails.
pub fn resize(src: &PixelBuffer, width: u32, aspect: f32) -> Result<PixelBuffer> {
    let height = target_height(src.width(), src.height(), width, aspect);
    log::debug!(
        "resize {}x{} → {}x{} (aspect {aspect})",
        src.width(),
        src.height(),
        width,
        height
    );
    Resizer::new().resize_to(src, width, height)
}

/// Centered crop to the `target_w : target_h` ratio.
///
/// Wider sources lose columns on both sides, taller sources lose rows top
/// and bottom. The result is never smaller than one pixel per side; a zero
/// target leaves the source untouched.
///
/// # Example
/// ```
/// use tg_source::resize::center_crop;
/// use tg_core::frame::PixelBuffer;
/// let src = PixelBuffer::from_fn(100, 10, |x, _| (x as u8, 0, 0));
/// let out = center_crop(&src, 4, 1);
/// assert_eq!((out.width(), out.height()), (40, 10));
/// assert_eq!(out.pixel(0, 0), (30, 0, 0));
/// ```
#[must_use]
pub fn center_crop(src: &PixelBuffer, target_w: u32, target_h: u32) -> PixelBuffer {
    if target_w == 0 || target_h == 0 {
        return src.clone();
    }
    let (w, h) = (src.width(), src.height());
    let (tw, th) = (u64::from(target_w), u64::from(target_h));

    // w / h > tw / th, en entiers pour éviter les arrondis flottants.
    let (left, top, new_w, new_h) = if u64::from(w) * th > u64::from(h) * tw {
        let new_w = (u64::from(h) * tw / th).clamp(1, u64::from(w)) as u32;
        ((w - new_w) / 2, 0, new_w, h)
    } else {
        let new_h = (u64::from(w) * th / tw).clamp(1, u64::from(h.max(1))) as u32;
        (0, h.saturating_sub(new_h) / 2, w, new_h)
    };

    PixelBuffer::from_fn(new_w, new_h, |x, y| src.pixel(left + x, top + y))
}
