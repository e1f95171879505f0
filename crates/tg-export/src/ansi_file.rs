//! Export texte brut : séquences conservées, rejouables avec `cat`.

use std::path::Path;

use crate::error::ExportError;

/// En-tête du fichier.
pub const HEADER: &str = "# ANSI Art File\n# Play: cat file.ans (Linux/macOS) / type file.ans (Windows)\n\n";

/// File content: header, blank line, then each row followed by `\n`.
///
/// # Example
/// ```
/// use tg_export::ansi_file::render_ansi_document;
/// let doc = render_ansi_document(&["ab".to_string(), "cd".to_string()]);
/// assert!(doc.starts_with("# ANSI Art File\n"));
/// assert!(doc.ends_with("\n\nab\ncd\n"));
/// ```
#[must_use]
pub fn render_ansi_document(lines: &[String]) -> String {
    let mut out = String::with_capacity(HEADER.len() + lines.iter().map(|l| l.len() + 1).sum::<usize>());
    out.push_str(HEADER);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Write the raw text document to `path`.
///
/// # Errors
/// [`ExportError::Io`] if the file cannot be written.
pub fn export_ansi(lines: &[String], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, render_ansi_document(lines)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("ANSI exporté : {}", path.display());
    Ok(())
}
