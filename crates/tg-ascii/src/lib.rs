//! Moteur de modes de termglyph.
//!
//! Converts prepared pixel buffers into cell grids: six interchangeable
//! modes dispatched by [`compositor::render`], plus the pure pixel filters
//! some of them run first.

pub mod color_map;
pub mod compositor;
pub mod edge;
pub mod filters;
pub mod halfblock;
pub mod luminance;
pub mod pixel;

pub use compositor::{RenderOptions, render, render_named, render_template};
