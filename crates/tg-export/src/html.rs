//! Export HTML : une ligne de texte coloré → des `<span>` à style inline.

use std::fmt::Write as _;
use std::path::Path;

use tg_core::ansi::{ColorRun, ansi_to_runs};

use crate::error::ExportError;

/// Pile de polices monospace du `<pre>`.
pub const FONT_STACK: &str = "Consolas, Monaco, 'Courier New', monospace";

/// Titre par défaut du document.
pub const DEFAULT_TITLE: &str = "Pixel Art";

/// Escape `&`, `<` and `>`.
///
/// # Example
/// ```
/// use tg_export::html::escape_html;
/// assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_run(out: &mut String, run: &ColorRun) {
    let mut style = String::new();
    if let Some((r, g, b)) = run.fg {
        let _ = write!(style, "color:rgb({r},{g},{b})");
    }
    if let Some((r, g, b)) = run.bg {
        if !style.is_empty() {
            style.push(';');
        }
        let _ = write!(style, "background-color:rgb({r},{g},{b})");
    }

    if style.is_empty() {
        out.push_str(&escape_html(&run.text));
    } else {
        let _ = write!(out, "<span style=\"{style}\">{}</span>", escape_html(&run.text));
    }
}

/// Convert one line of color-control text to HTML, terminated by `\n`.
///
/// # Example
/// ```
/// use tg_core::ansi::{bg, reset};
/// use tg_export::html::ansi_to_html;
/// let line = format!("{} {}", bg(255, 0, 0), reset());
/// assert_eq!(ansi_to_html(&line), "<span style=\"background-color:rgb(255,0,0)\"> </span>\n");
/// ```
#[must_use]
pub fn ansi_to_html(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    for run in ansi_to_runs(line) {
        push_run(&mut out, &run);
    }
    out.push('\n');
    out
}

/// Full HTML5 document wrapping the converted lines in a `<pre>`.
#[must_use]
pub fn render_html_document(lines: &[String], title: &str) -> String {
    let body: String = lines.iter().map(|l| ansi_to_html(l.as_str())).collect();
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"UTF-8\">
    <title>{title}</title>
    <style>
        body {{ background-color: #1e1e1e; margin: 20px; }}
        pre {{ font-family: {FONT_STACK}; font-size: 12px; line-height: 1.0; }}
    </style>
</head>
<body>
<pre>{body}</pre>
</body>
</html>
",
        title = escape_html(title)
    )
}

/// Write the HTML document for `lines` to `path`.
///
/// # Errors
/// [`ExportError::Io`] if the file cannot be written.
pub fn export_html(lines: &[String], path: &Path, title: &str) -> Result<(), ExportError> {
    std::fs::write(path, render_html_document(lines, title)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("HTML exporté : {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::ansi::{fg, reset};

    #[test]
    fn fg_and_bg_share_one_span() {
        let line = format!("{}\x1b[48;2;4;5;6mX{}", fg(1, 2, 3), reset());
        assert_eq!(
            ansi_to_html(&line),
            "<span style=\"color:rgb(1,2,3);background-color:rgb(4,5,6)\">X</span>\n"
        );
    }

    #[test]
    fn uncolored_text_is_bare_and_escaped() {
        assert_eq!(ansi_to_html("a<b"), "a&lt;b\n");
        let line = format!("{}a{}<", fg(9, 9, 9), reset());
        assert_eq!(
            ansi_to_html(&line),
            "<span style=\"color:rgb(9,9,9)\">a</span>&lt;\n"
        );
    }

    #[test]
    fn empty_line_is_just_a_newline() {
        assert_eq!(ansi_to_html(""), "\n");
        assert_eq!(ansi_to_html(reset()), "\n");
    }

    #[test]
    fn document_shell() {
        let doc = render_html_document(&["x".to_string()], "A & B");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"UTF-8\">"));
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains(FONT_STACK));
        assert!(doc.contains("line-height: 1.0"));
        assert!(doc.contains("<pre>x\n</pre>"));
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.html");
        let err = export_html(&[], &path, DEFAULT_TITLE).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
