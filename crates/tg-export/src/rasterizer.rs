use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{ImageFormat, RgbImage};
use rayon::prelude::*;
use tg_core::color::Rgb;
use tg_core::frame::{AsciiGrid, PixelBuffer};

use crate::builtin;
use crate::error::ExportError;
use crate::font;

/// Largeur d'une cellule en pixels.
pub const CELL_WIDTH: u32 = 8;
/// Hauteur d'une cellule en pixels.
pub const CELL_HEIGHT: u32 = 14;
/// Taille de police en pixels.
pub const FONT_SIZE: f32 = 12.0;
/// Fond des cellules sans arrière-plan.
pub const DEFAULT_BG: Rgb = (30, 30, 30);
/// Encre des cellules sans premier plan.
pub const DEFAULT_FG: Rgb = (204, 204, 204);

/// Convertit une AsciiGrid en image RGB, une boîte 8×14 par cellule.
///
/// Glyphs come from the font when it has them; block elements, shades and
/// glyphs the font lacks go through the built-in painter, so a non-empty
/// grid always rasterizes.
///
/// # Example
/// ```
/// use tg_core::frame::{AsciiCell, AsciiGrid};
/// use tg_export::rasterizer::Rasterizer;
///
/// let mut grid = AsciiGrid::new(2, 1);
/// grid.set(0, 0, AsciiCell { ch: '█', fg: Some((255, 0, 0)), bg: None });
/// let img = Rasterizer::builtin().render(&grid).unwrap();
/// assert_eq!(img.dimensions(), (16, 14));
/// assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0]);
/// assert_eq!(img.get_pixel(12, 3).0, [30, 30, 30]);
/// ```
pub struct Rasterizer {
    font: Option<FontVec>,
    scale: PxScale,
}

impl Rasterizer {
    /// Rasterizer over an already loaded font, or the built-in painter with `None`.
    #[must_use]
    pub fn new(font: Option<FontVec>) -> Self {
        Self {
            font,
            scale: PxScale::from(FONT_SIZE),
        }
    }

    /// Rasterizer over the first system monospace font found.
    #[must_use]
    pub fn with_system_font() -> Self {
        Self::new(font::load_system_font())
    }

    /// Rasterizer that only uses the built-in painter.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(None)
    }

    /// True when glyphs come from a font file.
    #[must_use]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Alpha mask of `ch`, `CELL_WIDTH × CELL_HEIGHT`, from the font.
    ///
    /// `None` when there is no font or it has no glyph for `ch`.
    fn font_mask(&self, ch: char) -> Option<Vec<u8>> {
        let font = self.font.as_ref()?;
        let gid = font.glyph_id(ch);
        if gid.0 == 0 {
            return None;
        }

        let (w, h) = (CELL_WIDTH as i32, CELL_HEIGHT as i32);
        let mut mask = vec![0u8; (CELL_WIDTH * CELL_HEIGHT) as usize];
        let ascent = font.as_scaled(self.scale).ascent();
        let glyph = gid.with_scale_and_position(self.scale, point(0.0, ascent));

        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if (0..w).contains(&px) && (0..h).contains(&py) {
                    let idx = (py * w + px) as usize;
                    mask[idx] = mask[idx].max((v * 255.0).round() as u8);
                }
            });
        }
        Some(mask)
    }

    fn glyph_mask(&self, ch: char) -> Vec<u8> {
        if builtin::is_block_element(ch) {
            return builtin::paint(ch, CELL_WIDTH, CELL_HEIGHT);
        }
        self.font_mask(ch).unwrap_or_else(|| {
            if self.font.is_some() {
                log::debug!("Glyph absent de la police : {ch:?}");
            }
            builtin::paint(ch, CELL_WIDTH, CELL_HEIGHT)
        })
    }

    /// Rasterize the grid into a `(cols · 8) × (rows · 14)` RGB image.
    ///
    /// Row bands are filled in parallel.
    ///
    /// # Errors
    /// [`ExportError::EmptyGrid`] if the grid has no cells.
    pub fn render(&self, grid: &AsciiGrid) -> Result<RgbImage, ExportError> {
        if grid.is_empty() {
            return Err(ExportError::EmptyGrid);
        }

        let mut masks: HashMap<char, Vec<u8>> = HashMap::new();
        for cell in &grid.cells {
            masks.entry(cell.ch).or_insert_with(|| self.glyph_mask(cell.ch));
        }

        let (img_w, img_h) = target_dimensions(grid);
        let mut img = RgbImage::new(img_w, img_h);
        let cw = CELL_WIDTH as usize;
        let ch_h = CELL_HEIGHT as usize;
        let stride = img_w as usize * 3;
        let band_size = stride * ch_h;

        let buf: &mut [u8] = &mut img;
        buf.par_chunks_exact_mut(band_size)
            .zip(grid.rows().collect::<Vec<_>>())
            .for_each(|(band, row)| {
                for (gx, cell) in row.iter().enumerate() {
                    let Some(alpha) = masks.get(&cell.ch) else {
                        continue;
                    };
                    let fg = cell.fg.unwrap_or(DEFAULT_FG);
                    let bg = cell.bg.unwrap_or(DEFAULT_BG);
                    let x0 = gx * cw;

                    for cy in 0..ch_h {
                        for cx in 0..cw {
                            let a = alpha[cy * cw + cx];
                            let idx = cy * stride + (x0 + cx) * 3;
                            band[idx] = blend(fg.0, bg.0, a);
                            band[idx + 1] = blend(fg.1, bg.1, a);
                            band[idx + 2] = blend(fg.2, bg.2, a);
                        }
                    }
                }
            });

        log::debug!(
            "Rasterisé {}x{} cellules → {img_w}x{img_h} px",
            grid.width,
            grid.height
        );
        Ok(img)
    }
}

/// Image size for a grid: `(cols · 8, rows · 14)`.
#[must_use]
pub fn target_dimensions(grid: &AsciiGrid) -> (u32, u32) {
    (grid.width * CELL_WIDTH, grid.height * CELL_HEIGHT)
}

/// `fg · a + bg · (1 − a)`, `a` in 0–255.
#[inline]
fn blend(fg: u8, bg: u8, a: u8) -> u8 {
    let a = u32::from(a);
    ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
}

/// Rasterize `grid` with the system font and save it as PNG.
///
/// # Errors
/// [`ExportError::EmptyGrid`], or `Io`/`Encode` when writing fails.
pub fn export_png(grid: &AsciiGrid, path: &Path) -> Result<(), ExportError> {
    export_png_with(&Rasterizer::with_system_font(), grid, path)
}

/// Same as [`export_png`] with a caller-provided rasterizer.
///
/// # Errors
/// See [`export_png`].
pub fn export_png_with(
    rasterizer: &Rasterizer,
    grid: &AsciiGrid,
    path: &Path,
) -> Result<(), ExportError> {
    let img = rasterizer.render(grid)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| ExportError::from_image(path.to_path_buf(), e))?;
    log::info!("PNG exporté : {}", path.display());
    Ok(())
}

/// Save the prepared pixel buffer itself as PNG.
///
/// # Errors
/// [`ExportError::EmptyGrid`] for a zero-sized buffer, or `Io`/`Encode`
/// when writing fails.
pub fn export_source_png(frame: &PixelBuffer, path: &Path) -> Result<(), ExportError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(ExportError::EmptyGrid);
    }
    let Some(img) = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec()) else {
        return Err(ExportError::EmptyGrid);
    };
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| ExportError::from_image(path.to_path_buf(), e))?;
    log::info!("Image source exportée : {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::frame::AsciiCell;

    fn checker(w: u32, h: u32) -> AsciiGrid {
        let mut grid = AsciiGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let on = (x + y) % 2 == 0;
                grid.set(
                    x,
                    y,
                    AsciiCell {
                        ch: if on { '▀' } else { ' ' },
                        fg: Some((x as u8 * 10, y as u8 * 10, 200)),
                        bg: if on { Some((0, 0, 0)) } else { None },
                    },
                );
            }
        }
        grid
    }

    #[test]
    fn red_square_fills_every_pixel_with_background() {
        let mut grid = AsciiGrid::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                grid.set(
                    x,
                    y,
                    AsciiCell {
                        ch: ' ',
                        fg: None,
                        bg: Some((255, 0, 0)),
                    },
                );
            }
        }
        let img = Rasterizer::builtin().render(&grid).unwrap();
        assert_eq!(img.dimensions(), (16, 28));
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0]));
    }

    #[test]
    fn half_block_splits_the_cell() {
        let mut grid = AsciiGrid::new(1, 1);
        grid.set(
            0,
            0,
            AsciiCell {
                ch: '▀',
                fg: Some((255, 0, 0)),
                bg: Some((0, 0, 255)),
            },
        );
        let img = Rasterizer::builtin().render(&grid).unwrap();
        assert_eq!(img.get_pixel(4, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(4, 6).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(4, 7).0, [0, 0, 255]);
        assert_eq!(img.get_pixel(4, 13).0, [0, 0, 255]);
    }

    #[test]
    fn unset_colors_use_defaults() {
        let mut grid = AsciiGrid::new(1, 1);
        grid.set(
            0,
            0,
            AsciiCell {
                ch: '█',
                fg: None,
                bg: None,
            },
        );
        let img = Rasterizer::builtin().render(&grid).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [204, 204, 204]);
    }

    #[test]
    fn parallel_bands_match_cell_by_cell_layout() {
        let grid = checker(5, 4);
        let img = Rasterizer::builtin().render(&grid).unwrap();
        for gy in 0..4 {
            for gx in 0..5 {
                let cell = grid.get(gx, gy);
                let top = img.get_pixel(gx * CELL_WIDTH, gy * CELL_HEIGHT).0;
                let bottom = img.get_pixel(gx * CELL_WIDTH, gy * CELL_HEIGHT + 13).0;
                if cell.ch == '▀' {
                    let fg = cell.fg.unwrap();
                    assert_eq!(top, [fg.0, fg.1, fg.2]);
                    assert_eq!(bottom, [0, 0, 0]);
                } else {
                    assert_eq!(top, [30, 30, 30]);
                }
            }
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        let err = Rasterizer::builtin().render(&AsciiGrid::new(0, 0)).unwrap_err();
        assert!(matches!(err, ExportError::EmptyGrid));
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.png");
        export_png_with(&Rasterizer::builtin(), &checker(3, 2), &path).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (24, 28));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/dir/art.png");
        let err = export_png_with(&Rasterizer::builtin(), &checker(1, 1), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn source_png_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        let frame = PixelBuffer::from_fn(3, 2, |x, y| (x as u8 * 40, y as u8 * 90, 5));
        export_source_png(&frame, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.get_pixel(2, 1).0, [80, 90, 5]);
    }

    #[test]
    fn blend_extremes_are_exact() {
        assert_eq!(blend(200, 10, 255), 200);
        assert_eq!(blend(200, 10, 0), 10);
    }
}
