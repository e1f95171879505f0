use crate::config::GlyphVariant;
use crate::error::CoreError;

/// Glyph de repli pour les modes bloc.
pub const DEFAULT_GLYPH: char = '█';

/// 10 caractères — rampe de repli, compact, bon contraste.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// Rampe de densité visuelle (Paul Bourke, 70 caractères), du plus clair au plus dense.
pub const CHARSET_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Index `floor(b · (n-1))` clamped to `[0, n-1]`, with `b` replaced by
/// `1 - b` when `invert` is set.
///
/// # Example
/// ```
/// use tg_core::charset::charset_index;
/// assert_eq!(charset_index(0.0, 10, false), 0);
/// assert_eq!(charset_index(1.0, 10, false), 9);
/// assert_eq!(charset_index(1.0, 10, true), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn charset_index(b: f32, len: usize, invert: bool) -> usize {
    let last = len.saturating_sub(1);
    let b = if invert { 1.0 - b } else { b };
    let idx = (b * last as f32).floor();
    if idx <= 0.0 { 0 } else { (idx as usize).min(last) }
}

/// Rampe de luminance : séquence ordonnée de caractères, jamais vide.
///
/// # Example
/// ```
/// use tg_core::charset::Ramp;
/// let ramp = Ramp::new(" .:#@", "char_luminance").unwrap();
/// assert_eq!(ramp.map(0.0, false), ' ');
/// assert_eq!(ramp.map(1.0, false), '@');
/// ```
#[derive(Clone, Debug)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Ramp {
    /// Build a ramp from a charset ordered darkest → lightest visual weight.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if `charset` has no characters.
    pub fn new(charset: &str, mode: &'static str) -> Result<Self, CoreError> {
        let chars: Vec<char> = charset.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::EmptyCharset { mode });
        }
        Ok(Self { chars })
    }

    /// Nombre de caractères.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Map a brightness in [0, 1] to a character through [`charset_index`].
    #[inline(always)]
    #[must_use]
    pub fn map(&self, b: f32, invert: bool) -> char {
        self.chars[charset_index(b, self.chars.len(), invert)]
    }

    /// Coarse bucketing used by edge rendering: `min(floor(b · n), n-1)`.
    ///
    /// Unlike [`Ramp::map`] the scale is `n`, not `n - 1`.
    ///
    /// # Example
    /// ```
    /// use tg_core::charset::Ramp;
    /// let ramp = Ramp::new("/\\|_-", "edge_structure").unwrap();
    /// assert_eq!(ramp.bucket(0.2), '\\');
    /// assert_eq!(ramp.bucket(1.0), '-');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn bucket(&self, b: f32) -> char {
        let len = self.chars.len();
        let idx = (b.max(0.0) * len as f32).floor() as usize;
        self.chars[idx.min(len - 1)]
    }
}

/// Glyph et charset résolus pour un rendu.
///
/// Built from a [`GlyphVariant`]; fields the variant leaves unset fall back
/// to [`DEFAULT_GLYPH`] and [`CHARSET_COMPACT`]. An explicitly empty charset
/// is kept as is and rejected by the charset-driven modes.
///
/// # Example
/// ```
/// use tg_core::charset::GlyphSpec;
/// use tg_core::config::GlyphVariant;
/// let spec = GlyphSpec::from_variant(&GlyphVariant::default());
/// assert_eq!(spec.glyph, '█');
/// assert_eq!(spec.charset, " .:-=+*#%@");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSpec {
    /// Glyph des modes bloc.
    pub glyph: char,
    /// Rampe des modes luminance.
    pub charset: String,
}

impl GlyphSpec {
    /// Resolve a variant against the hardcoded defaults.
    #[must_use]
    pub fn from_variant(variant: &GlyphVariant) -> Self {
        Self {
            glyph: variant.glyph.unwrap_or(DEFAULT_GLYPH),
            charset: variant
                .charset
                .clone()
                .unwrap_or_else(|| CHARSET_COMPACT.to_string()),
        }
    }
}

impl Default for GlyphSpec {
    fn default() -> Self {
        Self {
            glyph: DEFAULT_GLYPH,
            charset: CHARSET_COMPACT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_maps_extremes() {
        for n in 1..=20 {
            assert_eq!(charset_index(0.0, n, false), 0);
            assert_eq!(charset_index(1.0, n, false), n - 1);
        }
    }

    #[test]
    fn index_monotonic_and_bounded() {
        for n in [1usize, 2, 5, 10, 70] {
            let mut prev = 0usize;
            for step in 0..=1000 {
                let b = step as f32 / 1000.0;
                let idx = charset_index(b, n, false);
                assert!(idx < n);
                assert!(idx >= prev, "index non monotone à b={b}");
                prev = idx;
            }
        }
    }

    #[test]
    fn compact_ramp_at_095_selects_percent() {
        let ramp = Ramp::new(CHARSET_COMPACT, "char_luminance").unwrap();
        assert_eq!(ramp.map(0.95, false), '%');
    }

    #[test]
    fn single_char_ramp_always_index_zero() {
        let ramp = Ramp::new("#", "gray_level").unwrap();
        assert_eq!(ramp.map(0.0, false), '#');
        assert_eq!(ramp.map(1.0, true), '#');
        assert_eq!(ramp.bucket(1.0), '#');
    }

    #[test]
    fn empty_charset_is_rejected() {
        let err = Ramp::new("", "edge_structure").unwrap_err();
        assert!(matches!(err, CoreError::EmptyCharset { mode: "edge_structure" }));
    }

    #[test]
    fn explicit_empty_charset_survives_resolution() {
        let variant = GlyphVariant {
            charset: Some(String::new()),
            ..GlyphVariant::default()
        };
        assert!(GlyphSpec::from_variant(&variant).charset.is_empty());
    }
}
