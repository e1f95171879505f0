//! Catalogue de templates et de glyphs.
//!
//! Lookup policy:
//!
//! | lookup                    | missing →                               |
//! |---------------------------|-----------------------------------------|
//! | template                  | [`CoreError::UnknownTemplate`]          |
//! | legacy mode token         | [`CoreError::UnknownLegacyToken`]       |
//! | template mode string      | [`CoreError::UnknownMode`] (at render)  |
//! | glyph family              | `None`                                  |
//! | glyph variant             | neutral variant (hardcoded glyph/charset through [`crate::charset::GlyphSpec`]) |

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The six pixel → cell algorithms.
///
/// # Example
/// ```
/// use tg_core::config::ModeKind;
/// let mode: ModeKind = "half_hd".parse().unwrap();
/// assert_eq!(mode, ModeKind::HalfHd);
/// assert_eq!(mode.as_str(), "half_hd");
/// assert!("braille".parse::<ModeKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Background color per pixel, space glyph.
    PixelRaw,
    /// `PixelRaw` on a 2×2 block-averaged buffer.
    PixelMosaic,
    /// Two source rows per cell with `▀`/`▄`.
    HalfHd,
    /// Charset ramp by brightness, colored per strategy.
    CharLuminance,
    /// Charset ramp on the desaturated buffer, gray foreground.
    GrayLevel,
    /// Charset on the edge-filtered buffer, dark pixels suppressed.
    EdgeStructure,
}

impl ModeKind {
    /// Tous les modes, dans l'ordre du catalogue.
    pub const ALL: [ModeKind; 6] = [
        ModeKind::PixelRaw,
        ModeKind::PixelMosaic,
        ModeKind::HalfHd,
        ModeKind::CharLuminance,
        ModeKind::GrayLevel,
        ModeKind::EdgeStructure,
    ];

    /// Identifiant texte du mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModeKind::PixelRaw => "pixel_raw",
            ModeKind::PixelMosaic => "pixel_mosaic",
            ModeKind::HalfHd => "half_hd",
            ModeKind::CharLuminance => "char_luminance",
            ModeKind::GrayLevel => "gray_level",
            ModeKind::EdgeStructure => "edge_structure",
        }
    }

    /// True for modes driven by a charset ramp.
    #[must_use]
    pub fn uses_charset(self) -> bool {
        matches!(
            self,
            ModeKind::CharLuminance | ModeKind::GrayLevel | ModeKind::EdgeStructure
        )
    }
}

impl FromStr for ModeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeKind::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color mapping of the luminance modes.
///
/// # Example
/// ```
/// use tg_core::config::ColorStrategy;
/// assert!(matches!(ColorStrategy::default(), ColorStrategy::Truecolor));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStrategy {
    /// RGB direct du pixel en premier plan.
    #[default]
    #[serde(alias = "truecolor_fg")]
    Truecolor,
    /// Gris `floor(b · 255)` en premier plan.
    Grayscale,
    /// Pas de couleur.
    Mono,
}

/// Paramètres par défaut d'un template.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateDefaults {
    /// Largeur de sortie en colonnes.
    pub width: u32,
    /// Correction d'aspect (hauteur de caractère terminal).
    pub aspect: f32,
    /// Délai par ligne en millisecondes, 0 = aucun.
    pub delay: u64,
    /// Inverser la luminance.
    pub invert: bool,
    /// Effacer l'écran avant le rendu.
    pub clear: bool,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            width: 150,
            aspect: 0.5,
            delay: 0,
            invert: false,
            clear: false,
        }
    }
}

impl TemplateDefaults {
    /// Clamp numeric fields to their valid ranges.
    /// Called after deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, 4096);
        self.aspect = if self.aspect.is_finite() {
            self.aspect.clamp(0.05, 10.0)
        } else {
            0.5
        };
        self.delay = self.delay.min(10_000);
    }
}

/// Template : mode + famille de glyphs + stratégie couleur + défauts.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Template {
    /// Identifiant unique (`PIXEL_RAW`, `HALF_HD`, ...).
    pub id: String,
    /// Nom affiché.
    pub name: String,
    /// Description courte.
    #[serde(default, alias = "description")]
    pub desc: String,
    /// Mode string; checked by [`Template::mode_kind`] at render time.
    pub mode: String,
    /// Glyph family id.
    #[serde(default)]
    pub glyph_family: String,
    /// Color strategy for the luminance modes.
    #[serde(default)]
    pub color_strategy: ColorStrategy,
    /// Default parameters.
    #[serde(default)]
    pub defaults: TemplateDefaults,
}

impl Template {
    /// Resolve the mode string.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownMode`] if the mode is not one of the six kinds.
    pub fn mode_kind(&self) -> Result<ModeKind, CoreError> {
        self.mode.parse()
    }
}

/// A glyph or charset option within a family.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlyphVariant {
    /// Identifiant dans la famille (`v1`, `v2`, ...).
    #[serde(default)]
    pub id: String,
    /// Nom affiché.
    #[serde(default)]
    pub name: String,
    /// Description courte.
    #[serde(default, alias = "description")]
    pub desc: String,
    /// Glyph des modes bloc.
    #[serde(default)]
    pub glyph: Option<char>,
    /// Rampe des modes luminance.
    #[serde(default)]
    pub charset: Option<String>,
}

/// Named group of variants.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlyphFamily {
    /// Default variant id.
    #[serde(default = "default_variant_id")]
    pub default: String,
    /// Variantes, dans l'ordre d'affichage.
    #[serde(default)]
    pub variants: Vec<GlyphVariant>,
}

fn default_variant_id() -> String {
    "v1".to_string()
}

/// Paramètres globaux du catalogue.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogDefaults {
    /// Largeur de l'aperçu.
    pub preview_width: u32,
    /// Hauteur de l'aperçu.
    pub preview_height: u32,
    /// Largeur maximale acceptée par le front-end.
    pub max_width: u32,
    /// Plus grand côté accepté pour l'image source.
    pub max_image_size: u32,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            preview_width: 40,
            preview_height: 12,
            max_width: 300,
            max_image_size: 6000,
        }
    }
}

/// Catalogue complet, chargé une fois puis immuable.
///
/// # Example
/// ```
/// use tg_core::config::Config;
/// let config = Config::from_toml_str(r#"
///     [[templates]]
///     id = "PIXEL_RAW"
///     name = "Pixel"
///     mode = "pixel_raw"
/// "#).unwrap();
/// assert_eq!(config.get_template("PIXEL_RAW").unwrap().mode, "pixel_raw");
/// assert!(config.get_template("NOPE").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Paramètres globaux.
    #[serde(default)]
    pub defaults: CatalogDefaults,
    /// Templates, dans l'ordre d'affichage.
    #[serde(default, alias = "semantic_templates")]
    pub templates: Vec<Template>,
    /// Glyph families by id.
    #[serde(default, alias = "glyph_variants")]
    pub glyph_families: BTreeMap<String, GlyphFamily>,
    /// Legacy mode token → template id.
    #[serde(default)]
    pub legacy_mode_mapping: BTreeMap<String, String>,
}

impl Config {
    /// Parse a TOML catalog.
    ///
    /// # Errors
    /// Returns [`CoreError::ConfigInvalid`] if the document is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        Self::parse(content, Format::Toml, "<inline>")
    }

    fn parse(content: &str, format: Format, origin: &str) -> Result<Self, CoreError> {
        let mut config: Config = match format {
            Format::Toml => toml::from_str(content).map_err(|e| CoreError::ConfigInvalid {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?,
            Format::Json => {
                serde_json::from_str(content).map_err(|e| CoreError::ConfigInvalid {
                    origin: origin.to_string(),
                    reason: e.to_string(),
                })?
            }
        };
        for template in &mut config.templates {
            template.defaults.clamp_all();
            if template.mode_kind().is_err() {
                log::warn!(
                    "Template {} : mode '{}' inconnu, il sera refusé au rendu",
                    template.id,
                    template.mode
                );
            }
        }
        Ok(config)
    }

    /// Look up a template by id.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownTemplate`] if no template has this id.
    pub fn get_template(&self, id: &str) -> Result<&Template, CoreError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::UnknownTemplate(id.to_string()))
    }

    /// Look up a glyph family.
    #[must_use]
    pub fn get_glyph_family(&self, id: &str) -> Option<&GlyphFamily> {
        self.glyph_families.get(id)
    }

    /// Resolve a glyph variant; `None` selects the family default.
    ///
    /// Never fails: an absent family or variant yields the neutral
    /// [`GlyphVariant::default`], which resolves to the hardcoded glyph and
    /// charset.
    ///
    /// # Example
    /// ```
    /// use tg_core::config::{Config, GlyphVariant};
    /// let config = Config::default();
    /// assert_eq!(config.get_glyph_variant("missing", None), GlyphVariant::default());
    /// ```
    #[must_use]
    pub fn get_glyph_variant(&self, family_id: &str, variant_id: Option<&str>) -> GlyphVariant {
        let Some(family) = self.get_glyph_family(family_id) else {
            log::debug!("Famille de glyphs '{family_id}' absente, variante neutre");
            return GlyphVariant::default();
        };
        let wanted = variant_id.unwrap_or(&family.default);
        match family.variants.iter().find(|v| v.id == wanted) {
            Some(v) => v.clone(),
            None => {
                log::debug!("Variante '{wanted}' absente de '{family_id}', variante neutre");
                GlyphVariant::default()
            }
        }
    }

    /// Map a legacy mode token (`fg`, `bg`, `half`, `mono`) to a template id.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownLegacyToken`] if the token is not in the table.
    pub fn resolve_legacy_mode(&self, token: &str) -> Result<&str, CoreError> {
        self.legacy_mode_mapping
            .get(token)
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnknownLegacyToken(token.to_string()))
    }
}

#[derive(Clone, Copy)]
enum Format {
    Toml,
    Json,
}

/// Charge le catalogue depuis un fichier TOML (ou JSON selon l'extension).
///
/// # Errors
/// Returns [`CoreError::ConfigNotFound`] if the file cannot be read and
/// [`CoreError::ConfigInvalid`] if it cannot be parsed.
///
/// # Example
/// ```no_run
/// use tg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/presets.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<Config, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
        _ => Format::Toml,
    };
    let config = Config::parse(&content, format, &path.display().to_string())?;
    log::info!(
        "Catalogue chargé : {} templates, {} familles de glyphs ({})",
        config.templates.len(),
        config.glyph_families.len(),
        path.display()
    );
    Ok(config)
}
