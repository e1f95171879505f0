//! Session terminal : activation ANSI, avertissement true-color, diffusion ligne à ligne.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// True when `COLORTERM` advertises 24-bit color.
#[must_use]
pub fn truecolor_hint(colorterm: Option<&str>) -> bool {
    matches!(colorterm, Some("truecolor" | "24bit"))
}

/// Process-wide terminal state, owned by the front-end.
///
/// `init` is idempotent; the degraded-color warning is emitted at most once
/// per session.
pub struct TerminalSession<W: Write> {
    out: W,
    initialized: bool,
    truecolor: bool,
    degraded_warned: bool,
}

impl<W: Write> TerminalSession<W> {
    /// Wrap an output stream. Nothing is written until rows are streamed.
    pub fn new(out: W) -> Self {
        Self {
            out,
            initialized: false,
            truecolor: true,
            degraded_warned: false,
        }
    }

    /// Enable ANSI output and read the true-color hint from `COLORTERM`.
    pub fn init(&mut self) {
        let colorterm = std::env::var("COLORTERM").ok();
        self.init_with(colorterm.as_deref());
    }

    /// Same as [`Self::init`] with an explicit `COLORTERM` value.
    pub fn init_with(&mut self, colorterm: Option<&str>) {
        if self.initialized {
            return;
        }
        #[cfg(windows)]
        if !crossterm::ansi_support::supports_ansi() {
            log::warn!("Séquences ANSI non supportées par cette console");
        }
        self.truecolor = truecolor_hint(colorterm);
        self.initialized = true;
        log::debug!("Session terminal initialisée (truecolor={})", self.truecolor);
    }

    /// True once [`Self::init`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Warn once if the terminal did not advertise true-color support.
    ///
    /// Returns true when the warning was emitted by this call.
    pub fn warn_degraded(&mut self) -> bool {
        if self.truecolor || self.degraded_warned {
            return false;
        }
        log::warn!("Le terminal ne signale pas le true-color (COLORTERM), rendu possiblement dégradé");
        self.degraded_warned = true;
        true
    }

    /// Clear the screen and move the cursor home.
    ///
    /// # Errors
    /// Returns the underlying write error.
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    /// Write rows one per line, pausing `delay` after each when non-zero.
    ///
    /// # Errors
    /// Returns the underlying write error.
    pub fn stream(&mut self, lines: &[String], delay: Duration) -> io::Result<()> {
        self.init();
        self.warn_degraded();
        for line in lines {
            writeln!(self.out, "{line}")?;
            if !delay.is_zero() {
                self.out.flush()?;
                thread::sleep(delay);
            }
        }
        self.out.flush()
    }

    /// Give back the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_accepts_truecolor_and_24bit_only() {
        assert!(truecolor_hint(Some("truecolor")));
        assert!(truecolor_hint(Some("24bit")));
        assert!(!truecolor_hint(Some("256color")));
        assert!(!truecolor_hint(None));
    }

    #[test]
    fn init_is_idempotent() {
        let mut session = TerminalSession::new(Vec::new());
        session.init_with(Some("truecolor"));
        // Un second appel ne relit pas l'indice.
        session.init_with(None);
        assert!(session.is_initialized());
        assert!(!session.warn_degraded());
    }

    #[test]
    fn degraded_warning_fires_once() {
        let mut session = TerminalSession::new(Vec::new());
        session.init_with(None);
        assert!(session.warn_degraded());
        assert!(!session.warn_degraded());
    }

    #[test]
    fn stream_writes_one_line_per_row() {
        let mut session = TerminalSession::new(Vec::new());
        session.init_with(Some("truecolor"));
        let rows = vec!["\x1b[48;2;255;0;0m \x1b[0m".to_string(), "b".to_string()];
        session.stream(&rows, Duration::ZERO).unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert_eq!(out, "\x1b[48;2;255;0;0m \x1b[0m\nb\n");
    }

    #[test]
    fn delay_is_applied_per_row() {
        let mut session = TerminalSession::new(Vec::new());
        session.init_with(Some("24bit"));
        let rows = vec!["a".to_string(), "b".to_string()];
        let start = std::time::Instant::now();
        session.stream(&rows, Duration::from_millis(5)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn clear_emits_erase_and_home() {
        let mut session = TerminalSession::new(Vec::new());
        session.clear().unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[1;1H"));
    }
}
