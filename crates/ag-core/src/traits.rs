use crate::error::CoreError;
use crate::frame::LuminanceBuffer;

/// Décode, redimensionne et convertit une image en grille de luminance.
///
/// Implémenté par : `ImageRasterizer` (ag-source). Les tests fournissent leurs
/// propres doublures.
///
/// # Example
/// ```
/// use ag_core::traits::Rasterizer;
/// use ag_core::frame::LuminanceBuffer;
/// use ag_core::error::CoreError;
///
/// struct Flat(u8);
/// impl Rasterizer for Flat {
///     fn decode_and_resize(&self, _bytes: &[u8], w: u32, h: u32)
///         -> Result<LuminanceBuffer, CoreError> {
///         LuminanceBuffer::from_raw(w, h, vec![self.0; (w * h) as usize])
///     }
/// }
/// let buf = Flat(7).decode_and_resize(&[], 2, 2).unwrap();
/// assert_eq!(buf.get(1, 1), 7);
/// ```
pub trait Rasterizer: Send + Sync {
    /// Retourne une grille d'exactement `width_px × height_px` échantillons.
    ///
    /// CONTRAT : pas de résultat partiel. Toute erreur (octets illisibles,
    /// format non supporté, dimension nulle) est un [`CoreError::Decode`].
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] when the bytes cannot be decoded or resized.
    fn decode_and_resize(
        &self,
        bytes: &[u8],
        width_px: u32,
        height_px: u32,
    ) -> Result<LuminanceBuffer, CoreError>;
}
