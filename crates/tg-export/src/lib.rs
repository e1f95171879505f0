//! Exports de termglyph : PNG rasterisé, HTML, texte ANSI brut.

pub mod ansi_file;
pub mod builtin;
pub mod error;
pub mod font;
pub mod html;
pub mod rasterizer;

pub use ansi_file::export_ansi;
pub use error::ExportError;
pub use html::export_html;
pub use rasterizer::{Rasterizer, export_png, export_source_png};
