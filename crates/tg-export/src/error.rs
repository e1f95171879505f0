use std::path::PathBuf;

use thiserror::Error;

/// Erreurs des exports fichier.
///
/// Chaque export rapporte son propre échec ; l'appelant décide de
/// continuer avec les suivants.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Le fichier cible n'a pas pu être écrit.
    #[error("Écriture impossible : {}", path.display())]
    Io {
        /// Fichier cible.
        path: PathBuf,
        /// Cause I/O.
        #[source]
        source: std::io::Error,
    },

    /// L'encodeur PNG a refusé l'image.
    #[error("Encodage PNG échoué : {}", path.display())]
    Encode {
        /// Fichier cible.
        path: PathBuf,
        /// Cause côté encodeur.
        #[source]
        source: image::ImageError,
    },

    /// Rien à rasteriser.
    #[error("Grille vide : rien à exporter")]
    EmptyGrid,
}

impl ExportError {
    /// Classe une erreur du crate `image` : I/O ou encodage.
    pub(crate) fn from_image(path: PathBuf, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => Self::Io { path, source },
            other => Self::Encode {
                path,
                source: other,
            },
        }
    }
}
