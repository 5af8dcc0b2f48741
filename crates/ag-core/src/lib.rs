/// Configuration, types, and shared structures for asciigen.
///
/// This crate contains the shared buffers, the character ramp, the error
/// type and the configuration logic used across the asciigen workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::CharacterRamp;
pub use config::RenderConfig;
pub use error::CoreError;
pub use frame::{FrameBuffer, LuminanceBuffer};
pub use traits::Rasterizer;
