use crate::ansi;
use crate::color::Rgb;
use crate::error::CoreError;

/// Buffer de pixels immuable, RGB row-major, 3 bytes par pixel.
///
/// Owned by the caller for the duration of a render call; the engine only
/// borrows it.
///
/// # Example
/// ```
/// use tg_core::frame::PixelBuffer;
/// let px = PixelBuffer::filled(4, 2, (255, 0, 0));
/// assert_eq!(px.pixel(3, 1), (255, 0, 0));
/// assert_eq!(px.data().len(), 4 * 2 * 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap raw RGB bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or the
    /// byte count does not match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 3 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer uniforme d'une seule couleur.
    #[must_use]
    pub fn filled(width: u32, height: u32, (r, g, b): Rgb) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&[r, g, b]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    ///
    /// # Example
    /// ```
    /// use tg_core::frame::PixelBuffer;
    /// let px = PixelBuffer::from_fn(3, 1, |x, _| (x as u8, 0, 0));
    /// assert_eq!(px.pixel(2, 0), (2, 0, 0));
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = f(x, y);
                data.extend_from_slice(&[r, g, b]);
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Octets RGB bruts.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consomme le buffer et rend les octets.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Accès au pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        match self.data.get(idx..idx + 3) {
            Some(&[r, g, b]) => (r, g, b),
            _ => (0, 0, 0),
        }
    }
}

/// Single cell of a rendered grid.
///
/// `fg`/`bg` are `None` when the mode carries no color for that channel.
///
/// # Example
/// ```
/// use tg_core::frame::AsciiCell;
/// let cell = AsciiCell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.fg.is_none() && cell.bg.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB).
    pub fg: Option<Rgb>,
    /// Couleur background (RGB).
    pub bg: Option<Rgb>,
}

impl Default for AsciiCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

impl AsciiCell {
    /// Append this cell's text form: fg sequence, bg sequence, then glyph.
    pub fn encode_into(&self, out: &mut String) {
        if let Some(fg) = self.fg {
            ansi::push_fg(out, fg);
        }
        if let Some(bg) = self.bg {
            ansi::push_bg(out, bg);
        }
        out.push(self.ch);
    }
}

/// Grille de sortie. Cellules row-major.
///
/// # Example
/// ```
/// use tg_core::frame::{AsciiGrid, AsciiCell};
/// let mut grid = AsciiGrid::new(3, 2);
/// grid.set(0, 0, AsciiCell { ch: '@', fg: Some((255, 0, 0)), bg: None });
/// assert_eq!(grid.get(0, 0).ch, '@');
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<AsciiCell>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Crée une grille de cellules vides.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![AsciiCell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, cell: AsciiCell) {
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &AsciiCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// True when the grid holds no cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[AsciiCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Encode one row: per-cell sequences and glyph, then one reset.
    #[must_use]
    pub fn encode_row(row: &[AsciiCell]) -> String {
        // ~40 octets par cellule colorée sur deux canaux.
        let mut line = String::with_capacity(row.len() * 40 + 4);
        for cell in row {
            cell.encode_into(&mut line);
        }
        line.push_str(ansi::reset());
        line
    }

    /// Derive the color-control text rows from the cells.
    ///
    /// # Example
    /// ```
    /// use tg_core::frame::{AsciiGrid, AsciiCell};
    /// let mut grid = AsciiGrid::new(1, 1);
    /// grid.set(0, 0, AsciiCell { ch: ' ', fg: None, bg: Some((255, 0, 0)) });
    /// assert_eq!(grid.to_ansi_lines(), vec!["\x1b[48;2;255;0;0m \x1b[0m".to_string()]);
    /// ```
    #[must_use]
    pub fn to_ansi_lines(&self) -> Vec<String> {
        self.rows().map(Self::encode_row).collect()
    }

    /// Texte brut sans couleurs, une ligne par rangée.
    #[must_use]
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::ansi_to_runs;

    #[test]
    fn from_raw_rejects_mismatched_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 11]).is_err());
        assert!(PixelBuffer::from_raw(0, 2, Vec::new()).is_err());
        let px = PixelBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(px.pixel(1, 0), (4, 5, 6));
    }

    #[test]
    fn encoded_rows_decode_back_to_cells() {
        let mut grid = AsciiGrid::new(2, 1);
        grid.set(
            0,
            0,
            AsciiCell {
                ch: '▀',
                fg: Some((1, 2, 3)),
                bg: Some((4, 5, 6)),
            },
        );
        grid.set(
            1,
            0,
            AsciiCell {
                ch: '#',
                fg: Some((7, 8, 9)),
                bg: None,
            },
        );
        let lines = grid.to_ansi_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("\x1b[0m"));

        let runs = ansi_to_runs(&lines[0]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "▀");
        assert_eq!((runs[0].fg, runs[0].bg), (Some((1, 2, 3)), Some((4, 5, 6))));
        // Le bg du premier glyph reste actif : pas de reset entre cellules.
        assert_eq!((runs[1].fg, runs[1].bg), (Some((7, 8, 9)), Some((4, 5, 6))));
    }

    #[test]
    fn uncolored_cells_encode_as_glyph_only() {
        let grid = AsciiGrid::new(3, 1);
        assert_eq!(grid.to_ansi_lines(), vec!["   \x1b[0m".to_string()]);
        assert_eq!(grid.to_plain_lines(), vec!["   ".to_string()]);
    }
}
