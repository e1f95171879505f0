//! Chargement et préparation des images sources.
//!
//! Decodes image files into [`tg_core::frame::PixelBuffer`]s, bounds their
//! size, and resizes/crops them for a given render mode.

pub mod image;
pub mod prepare;
pub mod resize;

pub use self::image::{MAX_IMAGE_SIZE, limit_image_size, load_image};
pub use prepare::{prepare_image, prepare_preview};
