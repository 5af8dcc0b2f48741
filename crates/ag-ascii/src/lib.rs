/// Character-art engine for asciigen.
///
/// Converts luminance grids to text through a character ramp, with a
/// deterministic placeholder when the source cannot be rasterized.

pub mod converter;
pub mod fallback;
pub mod ramp;

pub use converter::{Artifact, Converter, RenderRequest};
pub use fallback::render_fallback;
pub use ramp::render;
