/// Rasterizer adapter for asciigen: decode, resize, luminance.

pub mod image;
pub mod resize;

pub use crate::image::ImageRasterizer;
