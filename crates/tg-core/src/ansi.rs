//! Codec des séquences de couleur 24 bits (SGR `38;2` / `48;2`).
//!
//! Encoding is bit-exact: `ESC[38;2;R;G;Bm`, `ESC[48;2;R;G;Bm`, `ESC[0m`.
//! Decoding is permissive: anything it does not model is skipped or kept
//! as literal text, never reported as an error.

use std::fmt::Write as _;

use crate::color::Rgb;

const ESC: char = '\x1b';

/// Séquence de couleur de premier plan.
///
/// # Example
/// ```
/// use tg_core::ansi::fg;
/// assert_eq!(fg(1, 22, 255), "\x1b[38;2;1;22;255m");
/// ```
#[must_use]
pub fn fg(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// Séquence de couleur d'arrière-plan.
///
/// # Example
/// ```
/// use tg_core::ansi::bg;
/// assert_eq!(bg(255, 0, 0), "\x1b[48;2;255;0;0m");
/// ```
#[must_use]
pub fn bg(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[48;2;{r};{g};{b}m")
}

/// Foreground gray, `R = G = B = level`.
#[must_use]
pub fn fg_gray(level: u8) -> String {
    fg(level, level, level)
}

/// Background gray, `R = G = B = level`.
#[must_use]
pub fn bg_gray(level: u8) -> String {
    bg(level, level, level)
}

/// Réinitialise les couleurs.
#[must_use]
pub fn reset() -> &'static str {
    "\x1b[0m"
}

/// Efface l'écran et replace le curseur en haut à gauche.
#[must_use]
pub fn clear() -> &'static str {
    "\x1b[2J\x1b[H"
}

/// Append a foreground sequence to `out` without an intermediate allocation.
pub fn push_fg(out: &mut String, (r, g, b): Rgb) {
    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
}

/// Append a background sequence to `out` without an intermediate allocation.
pub fn push_bg(out: &mut String, (r, g, b): Rgb) {
    let _ = write!(out, "\x1b[48;2;{r};{g};{b}m");
}

/// Segment de texte décodé avec les couleurs actives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRun {
    /// Texte visible.
    pub text: String,
    /// Couleur de premier plan active, si définie.
    pub fg: Option<Rgb>,
    /// Couleur d'arrière-plan active, si définie.
    pub bg: Option<Rgb>,
}

/// Decode a line of color-control text into styled runs.
///
/// Each run holds the text found between two sequences, tagged with the
/// colors active when that text was reached. A reset clears both colors.
/// Unknown codes and malformed color groups leave the state untouched;
/// escape bytes that do not form a `ESC [ params m` sequence stay in the
/// text.
///
/// # Example
/// ```
/// use tg_core::ansi::{ansi_to_runs, fg, reset};
/// let line = format!("{}X{}", fg(1, 2, 3), reset());
/// let runs = ansi_to_runs(&line);
/// assert_eq!(runs.len(), 1);
/// assert_eq!(runs[0].text, "X");
/// assert_eq!(runs[0].fg, Some((1, 2, 3)));
/// assert_eq!(runs[0].bg, None);
/// ```
#[must_use]
pub fn ansi_to_runs(line: &str) -> Vec<ColorRun> {
    let mut runs = Vec::new();
    let mut current_fg: Option<Rgb> = None;
    let mut current_bg: Option<Rgb> = None;
    let mut pending = String::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let Some(esc_off) = rest.find(ESC) else {
            pending.push_str(rest);
            break;
        };
        pending.push_str(&rest[..esc_off]);
        let seq_start = pos + esc_off;

        match scan_sgr(&line[seq_start..]) {
            Some((params, consumed)) => {
                if !pending.is_empty() {
                    runs.push(ColorRun {
                        text: std::mem::take(&mut pending),
                        fg: current_fg,
                        bg: current_bg,
                    });
                }
                apply_sgr(params, &mut current_fg, &mut current_bg);
                pos = seq_start + consumed;
            }
            None => {
                // Pas une séquence SGR : l'octet ESC reste du texte.
                pending.push(ESC);
                pos = seq_start + ESC.len_utf8();
            }
        }
    }

    if !pending.is_empty() {
        runs.push(ColorRun {
            text: pending,
            fg: current_fg,
            bg: current_bg,
        });
    }
    runs
}

/// Match `ESC [ [0-9;]+ m` at the start of `s`.
///
/// Returns the parameter slice and the byte length of the whole sequence.
fn scan_sgr(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix("\x1b[")?;
    let params_len = body
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b';')
        .count();
    if params_len == 0 || body.as_bytes().get(params_len) != Some(&b'm') {
        return None;
    }
    Some((&body[..params_len], 2 + params_len + 1))
}

/// Apply the codes of one SGR sequence, left to right.
fn apply_sgr(params: &str, fg: &mut Option<Rgb>, bg: &mut Option<Rgb>) {
    let codes: Vec<&str> = params.split(';').collect();
    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            // Paramètre vide ou nul (`ESC[;m`, `ESC[000m`) : reset.
            code if code.bytes().all(|b| b == b'0') => {
                *fg = None;
                *bg = None;
            }
            selector @ ("38" | "48") if codes.get(i + 1) == Some(&"2") => {
                if let Some(rgb) = parse_rgb(codes.get(i + 2..i + 5)) {
                    if selector == "38" {
                        *fg = Some(rgb);
                    } else {
                        *bg = Some(rgb);
                    }
                    i += 4;
                } else {
                    // Le reste de la séquence n'est plus fiable.
                    log::trace!("groupe couleur malformé ignoré : {params}");
                    break;
                }
            }
            other => log::trace!("code SGR ignoré : {other}"),
        }
        i += 1;
    }
}

fn parse_rgb(components: Option<&[&str]>) -> Option<Rgb> {
    match components? {
        [r, g, b] => Some((r.parse().ok()?, g.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}
