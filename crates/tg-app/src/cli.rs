use std::path::PathBuf;

use clap::Parser;

/// termglyph — rendu d'images en art terminal true-color.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: Option<PathBuf>,

    /// Template du catalogue (PIXEL_RAW, HALF_HD, CHAR_COLOR, ...).
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Mode historique : fg, bg, half, mono. Ignoré si --preset est donné.
    #[arg(short, long, value_parser = ["fg", "bg", "half", "mono"])]
    pub mode: Option<String>,

    /// Variante de glyph de la famille du template (v1, v2, ...).
    #[arg(short, long)]
    pub glyph: Option<String>,

    /// Largeur de sortie en colonnes.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Correction d'aspect des cellules.
    #[arg(short, long)]
    pub aspect: Option<f32>,

    /// Délai par ligne en millisecondes.
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Inverser la luminance.
    #[arg(short, long, default_value_t = false)]
    pub invert: bool,

    /// Effacer l'écran avant le rendu.
    #[arg(long, default_value_t = false)]
    pub clear: bool,

    /// Aperçu recadré à la taille `preview_width × preview_height` du catalogue.
    #[arg(long, default_value_t = false)]
    pub preview: bool,

    /// Catalogue de templates (TOML, ou JSON si l'extension est `.json`).
    #[arg(short, long, default_value = "config/presets.toml")]
    pub config: PathBuf,

    /// Exporter le rendu en PNG.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Exporter le rendu en HTML.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Exporter le texte ANSI brut.
    #[arg(long)]
    pub ansi: Option<PathBuf>,

    /// Exporter l'image préparée (avant rendu) en PNG.
    #[arg(long)]
    pub source_png: Option<PathBuf>,

    /// Lister templates et variantes de glyph, puis quitter.
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// True when at least one file export is requested.
    #[must_use]
    pub fn has_exports(&self) -> bool {
        self.png.is_some() || self.html.is_some() || self.ansi.is_some() || self.source_png.is_some()
    }
}
