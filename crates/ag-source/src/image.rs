use ag_core::error::CoreError;
use ag_core::frame::{FrameBuffer, LuminanceBuffer};
use ag_core::traits::Rasterizer;
use anyhow::{Context, Result, ensure};

use crate::resize::Resizer;

/// Adaptateur de production : `image` pour le décodage, `fast_image_resize`
/// pour le redimensionnement, BT.709 pour la luminance.
///
/// Sans état : une même instance peut servir plusieurs threads.
///
/// # Example
/// ```
/// use ag_core::traits::Rasterizer;
/// use ag_source::image::ImageRasterizer;
/// let err = ImageRasterizer::new().decode_and_resize(b"not an image", 80, 20);
/// assert!(err.is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRasterizer;

impl ImageRasterizer {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ImageRasterizer {
    fn decode_and_resize(
        &self,
        bytes: &[u8],
        width_px: u32,
        height_px: u32,
    ) -> Result<LuminanceBuffer, CoreError> {
        rasterize(bytes, width_px, height_px).map_err(|e| CoreError::Decode(format!("{e:#}")))
    }
}

/// Décode une image encodée (PNG, JPEG, BMP, GIF) en frame RGBA.
///
/// # Errors
/// Returns an error if the bytes are empty or not a supported encoding.
pub fn decode_rgba(bytes: &[u8]) -> Result<FrameBuffer> {
    ensure!(!bytes.is_empty(), "Aucune donnée image");
    let img = image::load_from_memory(bytes).context("Impossible de décoder l'image")?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Image décodée : {width}×{height}");
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Décode, redimensionne à `width × height` puis convertit en luminance.
///
/// # Errors
/// Returns an error if decoding fails or either dimension is zero.
pub fn rasterize(bytes: &[u8], width: u32, height: u32) -> Result<LuminanceBuffer> {
    ensure!(
        width > 0 && height > 0,
        "Dimensions de redimensionnement invalides : {width}×{height}"
    );
    let frame = decode_rgba(bytes)?;
    let mut resized = FrameBuffer::new(width, height);
    Resizer::new()
        .resize_into(&frame, &mut resized)
        .with_context(|| {
            format!(
                "Redimensionnement {}×{} → {width}×{height} impossible",
                frame.width, frame.height
            )
        })?;
    Ok(resized.to_luminance())
}
