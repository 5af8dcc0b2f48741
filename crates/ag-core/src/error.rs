use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Source bytes could not be decoded or resized.
    #[error("Décodage impossible : {0}")]
    Decode(String),

    /// Character ramp is empty or too short to bucket luminance.
    #[error("Rampe de caractères invalide : {len} glyphe(s), minimum 2")]
    InvalidRamp {
        /// Number of glyphs found.
        len: usize,
    },

    /// Buffer length does not match width/height.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

impl CoreError {
    /// True when the error is recoverable through the fallback renderer.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
