use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core module.
///
/// Config and mode errors are reported to the immediate caller, never
/// replaced by a default. Glyph variant lookups are the one exception and
/// do not appear here (see [`crate::config::Config::get_glyph_variant`]).
#[derive(Error, Debug)]
pub enum CoreError {
    /// The configuration source could not be read.
    #[error("Configuration introuvable : {}", path.display())]
    ConfigNotFound {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration source was read but its structure is invalid.
    #[error("Configuration invalide ({origin}) : {reason}")]
    ConfigInvalid {
        /// File path or `<inline>` for in-memory sources.
        origin: String,
        /// Parser message.
        reason: String,
    },

    /// No template carries the requested id.
    #[error("Template inconnu : {0}")]
    UnknownTemplate(String),

    /// A template names a mode outside the six known kinds.
    #[error("Mode de rendu inconnu : {0}")]
    UnknownMode(String),

    /// Legacy mode token absent from the compatibility table.
    #[error("Mode historique inconnu : {0}")]
    UnknownLegacyToken(String),

    /// A charset-driven mode received a zero-length charset.
    #[error("Charset vide pour le mode {mode}")]
    EmptyCharset {
        /// Mode that required the charset.
        mode: &'static str,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
