use std::io::Read;
use std::path::Path;
use std::time::Duration;

use ag_ascii::converter::{Artifact, Converter, RenderRequest};
use ag_core::config::RenderConfig;
use ag_source::image::ImageRasterizer;
use anyhow::{Context, Result};
use serde::Serialize;

/// Lit les octets de l'image : fichier, ou stdin si le chemin vaut "-".
///
/// # Errors
/// Returns an error if the file or stdin cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Impossible de lire stdin")?;
        log::info!("{} octets lus depuis stdin", bytes.len());
        Ok(bytes)
    } else {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        log::info!("{} octets lus depuis {}", bytes.len(), path.display());
        Ok(bytes)
    }
}

/// Convert encoded image bytes with the production rasterizer.
///
/// Decode failures come back as a fallback artifact, not as an error.
///
/// # Errors
/// Returns an error only if the configured charset is not a valid ramp.
pub fn convert_bytes(bytes: Vec<u8>, config: &RenderConfig) -> Result<Artifact> {
    let converter = Converter::from_config(ImageRasterizer::new(), config)
        .context("Rampe de caractères inutilisable")?;
    let request = RenderRequest::new(bytes).with_size(config.width, config.height);

    let artifact = match config.deadline_ms {
        Some(ms) => converter.convert_with_deadline(&request, Duration::from_millis(ms)),
        None => converter.convert(&request),
    };
    if artifact.is_fallback() {
        log::info!("Bloc de repli émis");
    }
    Ok(artifact)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    success: bool,
    ascii: &'a str,
    fallback: bool,
}

/// Format the artifact for stdout: raw text, or a JSON object.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn format_output(artifact: &Artifact, json: bool) -> Result<String> {
    if !json {
        return Ok(artifact.text().to_string());
    }
    let body = serde_json::to_string_pretty(&JsonOutput {
        success: true,
        ascii: artifact.text(),
        fallback: artifact.is_fallback(),
    })?;
    Ok(body + "\n")
}
