//! Configuration, types, and shared structures for termglyph.
//!
//! This crate holds the template/glyph catalog, the color math, the
//! color-control codec and the pixel/cell types shared by the workspace.

pub mod ansi;
pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::{GlyphSpec, Ramp};
pub use color::Rgb;
pub use config::{ColorStrategy, Config, ModeKind, Template};
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiGrid, PixelBuffer};
