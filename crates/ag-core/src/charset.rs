use crate::error::CoreError;

/// 70 caractères — Paul Bourke, résolution maximale (dense→clair). Rampe par défaut.
pub const CHARSET_FULL: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// 10 caractères — compact, bon contraste.
pub const CHARSET_COMPACT: &str = "@%#*+=-:. ";

/// Blocs Unicode — pseudo-pixels.
pub const CHARSET_BLOCKS: &str = "█▓▒░ ";

/// Minimal — haut contraste.
pub const CHARSET_MINIMAL: &str = "█▓▒░:. ";

/// Named presets, all ordered densest glyph first.
pub const PRESETS: &[(&str, &str)] = &[
    ("full", CHARSET_FULL),
    ("compact", CHARSET_COMPACT),
    ("blocks", CHARSET_BLOCKS),
    ("minimal", CHARSET_MINIMAL),
];

/// Look up a preset charset by name (case-insensitive).
///
/// # Example
/// ```
/// use ag_core::charset::{preset, CHARSET_COMPACT};
/// assert_eq!(preset("Compact"), Some(CHARSET_COMPACT));
/// assert_eq!(preset("nope"), None);
/// ```
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, charset)| charset)
}

/// Ordered glyph sequence used to represent the luminance range.
///
/// Glyphs are stored densest first. Sample `v` lands in bucket
/// `floor(v / 256 * len)` and selects the glyph at the *reversed* index
/// `len - 1 - bucket`, so black maps to the last glyph and white to the first.
///
/// # Example
/// ```
/// use ag_core::charset::CharacterRamp;
/// let ramp = CharacterRamp::new("@#:. ").unwrap();
/// assert_eq!(ramp.glyph_for(0), ' ');
/// assert_eq!(ramp.glyph_for(128), ':');
/// assert_eq!(ramp.glyph_for(255), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRamp {
    glyphs: Vec<char>,
}

impl CharacterRamp {
    /// Build a ramp from a charset ordered densest→lightest.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRamp`] if the charset has fewer than 2 glyphs.
    pub fn new(charset: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = charset.chars().collect();
        if glyphs.len() < 2 {
            return Err(CoreError::InvalidRamp { len: glyphs.len() });
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs in the ramp.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: construction rejects short ramps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The glyphs, densest first.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Bucket index `floor(v / 256 * len)`, clamped to `[0, len - 1]`.
    ///
    /// Divides by 256, not 255. Changing the divisor changes rendered output.
    #[inline(always)]
    #[must_use]
    pub fn bucket(&self, luminance: u8) -> usize {
        let len = self.glyphs.len();
        (usize::from(luminance) * len / 256).min(len - 1)
    }

    /// Map a luminance value [0..255] to its glyph (inverted index).
    #[inline(always)]
    #[must_use]
    pub fn glyph_for(&self, luminance: u8) -> char {
        self.glyphs[self.glyphs.len() - 1 - self.bucket(luminance)]
    }
}

impl Default for CharacterRamp {
    fn default() -> Self {
        Self {
            glyphs: CHARSET_FULL.chars().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_ramp_has_70_glyphs() {
        assert_eq!(CharacterRamp::default().len(), 70);
    }

    #[test]
    fn inversion_maps_extremes() {
        let ramp = CharacterRamp::default();
        assert_eq!(ramp.bucket(0), 0);
        assert_eq!(ramp.glyph_for(0), ' ');
        assert_eq!(ramp.bucket(255), 69);
        assert_eq!(ramp.glyph_for(255), '$');
    }

    #[test]
    fn bucket_stays_in_bounds() {
        for len in 2..=300usize {
            let charset: String = (0..len)
                .map(|i| char::from_u32(0x4E00 + i as u32).unwrap())
                .collect();
            let ramp = CharacterRamp::new(&charset).unwrap();
            for v in 0..=255u8 {
                let raw = usize::from(v) * len / 256;
                assert!(raw <= len, "index brut hors bornes à {v} (len {len})");
                assert!(ramp.bucket(v) < len);
            }
        }
    }

    #[test]
    fn bucket_matches_float_formula() {
        let ramp = CharacterRamp::default();
        for v in 0..=255u8 {
            let expected = (f64::from(v) / 256.0 * 70.0).floor() as usize;
            assert_eq!(ramp.bucket(v), expected.min(69));
        }
    }

    #[test]
    fn glyphs_monotonic_towards_dense() {
        let ramp = CharacterRamp::new("@%#*+=-:. ").unwrap();
        let mut prev = usize::MAX;
        for v in 0..=255u8 {
            let idx = ramp.len() - 1 - ramp.bucket(v);
            assert!(idx <= prev, "rampe non monotone à luminance {v}");
            prev = idx;
        }
    }

    #[test]
    fn short_ramps_are_rejected() {
        assert!(matches!(
            CharacterRamp::new(""),
            Err(CoreError::InvalidRamp { len: 0 })
        ));
        assert!(matches!(
            CharacterRamp::new("@"),
            Err(CoreError::InvalidRamp { len: 1 })
        ));
        assert!(CharacterRamp::new("@ ").is_ok());
    }

    #[test]
    fn multibyte_glyphs_count_as_one() {
        let ramp = CharacterRamp::new(CHARSET_BLOCKS).unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.glyph_for(255), '█');
        assert_eq!(ramp.glyph_for(0), ' ');
    }

    #[test]
    fn presets_resolve_and_are_valid() {
        for (name, charset) in PRESETS {
            assert_eq!(preset(name), Some(*charset));
            assert!(CharacterRamp::new(charset).is_ok());
        }
    }
}
