use std::sync::Arc;
use std::time::Duration;

use ag_core::charset::CharacterRamp;
use ag_core::config::{DEFAULT_FALLBACK_LABEL, RenderConfig};
use ag_core::error::CoreError;
use ag_core::frame::LuminanceBuffer;
use ag_core::traits::Rasterizer;
use serde::Serialize;

use crate::fallback::render_fallback;
use crate::ramp::render;

/// Correction d'aspect : un glyphe est environ deux fois plus haut que large.
pub const ASPECT_CORRECTION: f64 = 0.5;

/// Largeur par défaut en caractères.
pub const DEFAULT_WIDTH: u32 = 80;

/// Hauteur par défaut en lignes de caractères.
pub const DEFAULT_HEIGHT: u32 = 40;

/// Pixel height requested from the rasterizer for `height_chars` rows.
///
/// `floor(height_chars * 0.5)`. Zero is a legal result and is passed through.
///
/// # Example
/// ```
/// use ag_ascii::converter::corrected_height;
/// assert_eq!(corrected_height(40), 20);
/// assert_eq!(corrected_height(1), 0);
/// ```
#[must_use]
pub fn corrected_height(height_chars: u32) -> u32 {
    (f64::from(height_chars) * ASPECT_CORRECTION).floor() as u32
}

/// One conversion job: encoded bytes plus target size in characters.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Encoded image, opaque to the converter.
    pub source_bytes: Arc<[u8]>,
    /// Largeur cible en caractères.
    pub width_chars: u32,
    /// Hauteur demandée en lignes (avant correction d'aspect).
    pub height_chars: u32,
}

impl RenderRequest {
    /// Request at the default 80×40 size.
    #[must_use]
    pub fn new(source_bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            source_bytes: source_bytes.into(),
            width_chars: DEFAULT_WIDTH,
            height_chars: DEFAULT_HEIGHT,
        }
    }

    /// Override the target size.
    #[must_use]
    pub fn with_size(mut self, width_chars: u32, height_chars: u32) -> Self {
        self.width_chars = width_chars;
        self.height_chars = height_chars;
        self
    }
}

/// Résultat d'une conversion : rendu réel ou bloc de repli.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Artifact {
    /// Text rendered from the decoded image.
    Rendered(String),
    /// Placeholder produced without decoding the source.
    Fallback(String),
}

impl Artifact {
    /// The text block, whichever path produced it.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Rendered(text) | Self::Fallback(text) => text,
        }
    }

    /// Consume into the text block.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Rendered(text) | Self::Fallback(text) => text,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Orchestre décodage → rendu, ou décodage en échec → bloc de repli.
///
/// Sans état mutable : un même `Converter` peut servir plusieurs threads.
///
/// # Example
/// ```
/// use ag_ascii::converter::{Converter, RenderRequest};
/// use ag_core::charset::CharacterRamp;
/// use ag_core::error::CoreError;
/// use ag_core::frame::LuminanceBuffer;
/// use ag_core::traits::Rasterizer;
///
/// struct Broken;
/// impl Rasterizer for Broken {
///     fn decode_and_resize(&self, _: &[u8], _: u32, _: u32)
///         -> Result<LuminanceBuffer, CoreError> {
///         Err(CoreError::Decode("corrupt".into()))
///     }
/// }
///
/// let converter = Converter::new(Broken, CharacterRamp::default());
/// let artifact = converter.convert(&RenderRequest::new(vec![0u8; 4]));
/// assert!(artifact.is_fallback());
/// assert!(artifact.text().contains("IMAGE CONVERSION FAILED"));
/// ```
pub struct Converter<R> {
    rasterizer: Arc<R>,
    ramp: CharacterRamp,
    fallback_label: String,
    invert: bool,
}

impl<R: Rasterizer> Converter<R> {
    /// Create a converter with the default fallback label and no inversion.
    #[must_use]
    pub fn new(rasterizer: R, ramp: CharacterRamp) -> Self {
        Self {
            rasterizer: Arc::new(rasterizer),
            ramp,
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
            invert: false,
        }
    }

    /// Build from a [`RenderConfig`], validating its charset first.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRamp`] if the charset has fewer than 2 glyphs.
    /// The rasterizer is never called in that case.
    pub fn from_config(rasterizer: R, config: &RenderConfig) -> Result<Self, CoreError> {
        let ramp = CharacterRamp::new(&config.charset)?;
        Ok(Self::new(rasterizer, ramp)
            .with_fallback_label(config.fallback_label.clone())
            .with_invert(config.invert))
    }

    /// Label embedded in the placeholder block.
    #[must_use]
    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }

    /// Flip luminance before mapping (light backgrounds).
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    #[must_use]
    pub fn ramp(&self) -> &CharacterRamp {
        &self.ramp
    }

    /// Convert one request. Always returns an artifact.
    ///
    /// The rasterizer is asked for `width_chars × corrected_height(height_chars)`;
    /// any [`CoreError`] it returns routes to the fallback block.
    #[must_use]
    pub fn convert(&self, request: &RenderRequest) -> Artifact {
        let height_px = corrected_height(request.height_chars);
        log::debug!(
            "Décodage : {} octets → {}×{height_px}",
            request.source_bytes.len(),
            request.width_chars
        );
        let decoded =
            self.rasterizer
                .decode_and_resize(&request.source_bytes, request.width_chars, height_px);
        self.finish(decoded)
    }

    fn finish(&self, decoded: Result<LuminanceBuffer, CoreError>) -> Artifact {
        match decoded {
            Ok(mut buffer) => {
                if self.invert {
                    buffer.invert();
                }
                log::debug!("Rendu : {}×{}", buffer.width(), buffer.height());
                Artifact::Rendered(render(&buffer, &self.ramp))
            }
            Err(e) => {
                log::warn!("Conversion impossible, bloc de repli : {e}");
                Artifact::Fallback(render_fallback(&self.fallback_label))
            }
        }
    }
}

impl<R: Rasterizer + 'static> Converter<R> {
    /// Like [`Converter::convert`], but gives up on the rasterizer after `deadline`.
    ///
    /// Decoding runs on a worker thread. A missed deadline is handled like a
    /// decode failure; a late result is discarded. Output for a call that
    /// finishes in time is identical to `convert`.
    #[must_use]
    pub fn convert_with_deadline(&self, request: &RenderRequest, deadline: Duration) -> Artifact {
        let width_px = request.width_chars;
        let height_px = corrected_height(request.height_chars);
        let bytes = Arc::clone(&request.source_bytes);
        let rasterizer = Arc::clone(&self.rasterizer);
        let (tx, rx) = flume::bounded(1);

        let spawned = std::thread::Builder::new()
            .name("ag-decode".into())
            .spawn(move || {
                let _ = tx.send(rasterizer.decode_and_resize(&bytes, width_px, height_px));
            });

        let decoded = match spawned {
            Ok(_) => match rx.recv_timeout(deadline) {
                Ok(result) => result,
                Err(flume::RecvTimeoutError::Timeout) => Err(CoreError::Decode(format!(
                    "deadline de {} ms dépassée",
                    deadline.as_millis()
                ))),
                Err(flume::RecvTimeoutError::Disconnected) => Err(CoreError::Decode(
                    "thread de décodage interrompu".to_string(),
                )),
            },
            Err(e) => Err(CoreError::Decode(format!(
                "thread de décodage indisponible : {e}"
            ))),
        };
        self.finish(decoded)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Clone, Copy)]
    enum Behaviour {
        Flat(u8),
        Fail,
        Slow(Duration),
    }

    /// Doublure qui enregistre chaque appel et rejette les dimensions nulles.
    struct Recorder {
        behaviour: Behaviour,
        calls: Arc<Mutex<Vec<(u32, u32)>>>,
    }

    impl Recorder {
        fn new(behaviour: Behaviour) -> (Self, Arc<Mutex<Vec<(u32, u32)>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    behaviour,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl Rasterizer for Recorder {
        fn decode_and_resize(
            &self,
            bytes: &[u8],
            width_px: u32,
            height_px: u32,
        ) -> Result<LuminanceBuffer, CoreError> {
            self.calls.lock().unwrap().push((width_px, height_px));
            if bytes.is_empty() || width_px == 0 || height_px == 0 {
                return Err(CoreError::Decode(format!("{width_px}×{height_px}")));
            }
            let level = match self.behaviour {
                Behaviour::Flat(v) => v,
                Behaviour::Fail => return Err(CoreError::Decode("corrupt".into())),
                Behaviour::Slow(d) => {
                    std::thread::sleep(d);
                    128
                }
            };
            LuminanceBuffer::from_raw(
                width_px,
                height_px,
                vec![level; width_px as usize * height_px as usize],
            )
        }
    }

    fn request() -> RenderRequest {
        RenderRequest::new(vec![1u8, 2, 3])
    }

    #[test]
    fn aspect_correction_halves_rows() {
        assert_eq!(corrected_height(40), 20);
        assert_eq!(corrected_height(41), 20);
        assert_eq!(corrected_height(2), 1);
        assert_eq!(corrected_height(1), 0);
        assert_eq!(corrected_height(0), 0);
    }

    #[test]
    fn rasterizer_receives_corrected_height() {
        let (recorder, calls) = Recorder::new(Behaviour::Flat(255));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let artifact = converter.convert(&request());
        assert_eq!(*calls.lock().unwrap(), vec![(80, 20)]);

        let Artifact::Rendered(text) = artifact else {
            panic!("rendu attendu");
        };
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| *l == "$".repeat(80)));
    }

    #[test]
    fn single_row_request_passes_zero_height_and_falls_back() {
        let (recorder, calls) = Recorder::new(Behaviour::Flat(0));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let artifact = converter.convert(&request().with_size(12, 1));
        assert_eq!(*calls.lock().unwrap(), vec![(12, 0)]);
        assert!(artifact.is_fallback());
    }

    #[test]
    fn decode_failure_routes_to_fallback() {
        let (recorder, _) = Recorder::new(Behaviour::Fail);
        let converter =
            Converter::new(recorder, CharacterRamp::default()).with_fallback_label("no luck");
        let artifact = converter.convert(&request());
        assert_eq!(artifact, Artifact::Fallback(render_fallback("no luck")));
        assert!(artifact.text().contains("    NO LUCK\n"));
    }

    #[test]
    fn empty_bytes_route_to_fallback() {
        let (recorder, _) = Recorder::new(Behaviour::Flat(200));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let artifact = converter.convert(&RenderRequest::new(Vec::<u8>::new()));
        assert!(artifact.is_fallback());
    }

    #[test]
    fn empty_ramp_fails_before_rasterizing() {
        let (recorder, calls) = Recorder::new(Behaviour::Flat(0));
        let config = RenderConfig {
            charset: String::new(),
            ..RenderConfig::default()
        };
        let result = Converter::from_config(recorder, &config);
        assert!(matches!(result, Err(CoreError::InvalidRamp { len: 0 })));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn from_config_applies_label_and_invert() {
        let (recorder, _) = Recorder::new(Behaviour::Flat(0));
        let config = RenderConfig {
            charset: "#-".into(),
            invert: true,
            fallback_label: "custom".into(),
            ..RenderConfig::default()
        };
        let converter = Converter::from_config(recorder, &config).unwrap();
        let artifact = converter.convert(&request().with_size(3, 4));
        // noir inversé → blanc → premier glyphe
        assert_eq!(artifact, Artifact::Rendered("###\n###\n".into()));

        let fallback = converter.convert(&request().with_size(3, 1));
        assert!(fallback.text().contains("CUSTOM"));
    }

    #[test]
    fn concurrent_conversions_agree() {
        let (recorder, calls) = Recorder::new(Behaviour::Flat(90));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let expected = converter.convert(&request());
        let done = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    assert_eq!(converter.convert(&request()), expected);
                    done.fetch_add(1, Ordering::Relaxed);
                });
            }
        });
        assert_eq!(done.load(Ordering::Relaxed), 8);
        assert_eq!(calls.lock().unwrap().len(), 9);
    }

    #[test]
    fn deadline_met_matches_plain_convert() {
        let (recorder, _) = Recorder::new(Behaviour::Flat(77));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let plain = converter.convert(&request());
        let bounded = converter.convert_with_deadline(&request(), Duration::from_secs(10));
        assert_eq!(bounded, plain);
        assert!(!bounded.is_fallback());
    }

    #[test]
    fn deadline_missed_falls_back() {
        let (recorder, _) = Recorder::new(Behaviour::Slow(Duration::from_millis(500)));
        let converter = Converter::new(recorder, CharacterRamp::default());
        let artifact = converter.convert_with_deadline(&request(), Duration::from_millis(10));
        assert!(artifact.is_fallback());
    }

    #[test]
    fn artifact_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Artifact::Fallback("x".into())).unwrap();
        assert_eq!(json, r#"{"kind":"fallback","text":"x"}"#);
        assert_eq!(Artifact::Rendered("ab\n".into()).to_string(), "ab\n");
    }
}
