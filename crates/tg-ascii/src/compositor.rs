use tg_core::charset::{GlyphSpec, Ramp};
use tg_core::config::{ColorStrategy, ModeKind, Template};
use tg_core::error::CoreError;
use tg_core::frame::{AsciiGrid, PixelBuffer};

use crate::{edge, halfblock, luminance, pixel};

/// Options communes à tous les modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Inverse la rampe (et le seuil du mode contours).
    pub invert: bool,
    /// Coloration des modes caractères.
    pub color_strategy: ColorStrategy,
}

impl RenderOptions {
    /// Options taken from a template: its strategy and default invert flag.
    #[must_use]
    pub fn from_template(template: &Template) -> Self {
        Self {
            invert: template.defaults.invert,
            color_strategy: template.color_strategy,
        }
    }
}

/// Render a prepared pixel buffer with the given mode.
///
/// Each cell is computed once; the text form comes from
/// [`AsciiGrid::to_ansi_lines`].
///
/// # Errors
/// [`CoreError::EmptyCharset`] when a charset-driven mode receives an
/// empty charset.
///
/// # Example
/// ```
/// use tg_core::charset::GlyphSpec;
/// use tg_core::config::ModeKind;
/// use tg_core::frame::PixelBuffer;
/// use tg_ascii::compositor::{render, RenderOptions};
///
/// let px = PixelBuffer::filled(2, 2, (255, 0, 0));
/// let grid = render(ModeKind::PixelRaw, &px, &GlyphSpec::default(), &RenderOptions::default()).unwrap();
/// assert_eq!(grid.to_ansi_lines()[0], "\x1b[48;2;255;0;0m \x1b[48;2;255;0;0m \x1b[0m");
/// ```
pub fn render(
    mode: ModeKind,
    frame: &PixelBuffer,
    glyph: &GlyphSpec,
    options: &RenderOptions,
) -> Result<AsciiGrid, CoreError> {
    log::debug!(
        "render {} : {}x{} px, invert={}, couleur={:?}",
        mode,
        frame.width(),
        frame.height(),
        options.invert,
        options.color_strategy
    );

    let grid = match mode {
        ModeKind::PixelRaw => pixel::process_pixel_raw(frame),
        ModeKind::PixelMosaic => pixel::process_pixel_mosaic(frame),
        ModeKind::HalfHd => halfblock::process_half_hd(frame, glyph.glyph),
        ModeKind::CharLuminance => {
            let ramp = Ramp::new(&glyph.charset, mode.as_str())?;
            luminance::process_char_luminance(frame, &ramp, options.invert, options.color_strategy)
        }
        ModeKind::GrayLevel => {
            let ramp = Ramp::new(&glyph.charset, mode.as_str())?;
            luminance::process_gray_level(frame, &ramp, options.invert)
        }
        ModeKind::EdgeStructure => {
            let ramp = Ramp::new(&glyph.charset, mode.as_str())?;
            edge::process_edge_structure(frame, &ramp, options.invert)
        }
    };
    Ok(grid)
}

/// Same as [`render`] with the mode given by name.
///
/// # Errors
/// [`CoreError::UnknownMode`] when `mode` names no known mode, plus the
/// errors of [`render`].
pub fn render_named(
    mode: &str,
    frame: &PixelBuffer,
    glyph: &GlyphSpec,
    options: &RenderOptions,
) -> Result<AsciiGrid, CoreError> {
    render(mode.parse()?, frame, glyph, options)
}

/// Render with a template's mode and options.
///
/// # Errors
/// See [`render_named`].
pub fn render_template(
    template: &Template,
    frame: &PixelBuffer,
    glyph: &GlyphSpec,
) -> Result<AsciiGrid, CoreError> {
    render(template.mode_kind()?, frame, glyph, &RenderOptions::from_template(template))
}
