//! Recherche d'une police monospace système.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use walkdir::WalkDir;

/// Monospace font files tried in order.
pub const FONT_CANDIDATES: [&str; 6] = [
    "consola.ttf",
    "DejaVuSansMono.ttf",
    "Courier New.ttf",
    "cour.ttf",
    "LiberationMono-Regular.ttf",
    "FreeMono.ttf",
];

/// Profondeur maximale de parcours d'un répertoire de polices.
const MAX_DEPTH: usize = 6;

/// Platform font directories, in search order. Missing ones are skipped later.
#[must_use]
pub fn font_dirs() -> Vec<PathBuf> {
    let mut out = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
    ];
    if let Some(user) = dirs::font_dir() {
        out.push(user);
    }
    if let Some(home) = dirs::home_dir() {
        out.push(home.join(".fonts"));
    }
    out.push(PathBuf::from(r"C:\Windows\Fonts"));
    out.push(PathBuf::from("/Library/Fonts"));
    out.push(PathBuf::from("/System/Library/Fonts"));
    out
}

/// Find the first candidate present under `dirs`.
///
/// Candidate order wins over directory order; within a candidate, the
/// first directory holding it wins. File names compare ASCII
/// case-insensitively.
///
/// # Example
/// ```
/// use tg_export::font::find_font_in;
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("FreeMono.ttf"), b"").unwrap();
/// std::fs::write(dir.path().join("cour.ttf"), b"").unwrap();
/// let found = find_font_in(&[dir.path().to_path_buf()]).unwrap();
/// assert!(found.ends_with("cour.ttf"));
/// ```
#[must_use]
pub fn find_font_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut found: HashMap<usize, PathBuf> = HashMap::new();

    for dir in dirs.iter().filter(|d| d.is_dir()) {
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy();
            if let Some(rank) = FONT_CANDIDATES
                .iter()
                .position(|c| c.eq_ignore_ascii_case(&name))
            {
                found.entry(rank).or_insert_with(|| entry.path().to_path_buf());
            }
        }
        // Le meilleur candidat est trouvé, inutile de parcourir la suite.
        if found.contains_key(&0) {
            break;
        }
    }

    found
        .into_iter()
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, path)| path)
}

/// Load and parse a font file.
///
/// Returns `None` (with a warning) when the file cannot be read or is not a
/// valid font.
#[must_use]
pub fn load_font_file(path: &Path) -> Option<FontVec> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Police illisible {} : {e}", path.display());
            return None;
        }
    };
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Police invalide {} : {e}", path.display());
            None
        }
    }
}

/// Locate and load the first usable system monospace font.
///
/// `None` means the built-in glyph painter will be used.
#[must_use]
pub fn load_system_font() -> Option<FontVec> {
    let Some(path) = find_font_in(&font_dirs()) else {
        log::warn!("Aucune police monospace trouvée, rendu intégré utilisé");
        return None;
    };
    log::info!("Police : {}", path.display());
    load_font_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order_beats_directory_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("FreeMono.ttf"), b"").unwrap();
        let nested = second.path().join("truetype/dejavu");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("DejaVuSansMono.ttf"), b"").unwrap();

        let found = find_font_in(&[first.path().to_path_buf(), second.path().to_path_buf()]).unwrap();
        assert_eq!(found, nested.join("DejaVuSansMono.ttf"));
    }

    #[test]
    fn names_match_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CONSOLA.TTF"), b"").unwrap();
        let found = find_font_in(&[dir.path().to_path_buf()]).unwrap();
        assert!(found.ends_with("CONSOLA.TTF"));
    }

    #[test]
    fn nothing_found_in_empty_or_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_font_in(&[dir.path().to_path_buf(), PathBuf::from("/nonexistent/fonts")]).is_none());
    }

    #[test]
    fn empty_file_is_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cour.ttf");
        std::fs::write(&path, b"").unwrap();
        assert!(load_font_file(&path).is_none());
    }
}
