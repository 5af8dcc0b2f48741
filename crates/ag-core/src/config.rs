use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Largeur maximale acceptée (en caractères).
pub const MAX_DIMENSION: u32 = 1000;

/// Label du bloc de repli par défaut.
pub const DEFAULT_FALLBACK_LABEL: &str = "Image conversion failed";

/// Configuration complète du rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ag_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!((config.width, config.height), (80, 40));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    /// Largeur cible en caractères.
    pub width: u32,
    /// Hauteur demandée en lignes de caractères (avant correction d'aspect).
    pub height: u32,
    /// Rampe de caractères (du plus dense au plus clair).
    pub charset: String,
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,
    /// Label embarqué dans le bloc de repli.
    pub fallback_label: String,
    /// Deadline du décodage en millisecondes. None = attente illimitée.
    pub deadline_ms: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            charset: crate::charset::CHARSET_FULL.to_string(),
            invert: false,
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
            deadline_ms: None,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, MAX_DIMENSION);
        self.height = self.height.clamp(1, MAX_DIMENSION);
        self.deadline_ms = self.deadline_ms.map(|ms| ms.max(1));
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    width: Option<u32>,
    height: Option<u32>,
    charset: Option<String>,
    invert: Option<bool>,
    fallback_label: Option<String>,
    deadline_ms: Option<u64>,
}

/// Parse une config TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the content is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ag_core::config::parse_config;
/// let config = parse_config("[render]\nwidth = 120\n").unwrap();
/// assert_eq!(config.width, 120);
/// assert_eq!(config.height, 40);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.width {
            config.width = v;
        }
        if let Some(v) = r.height {
            config.height = v;
        }
        if let Some(v) = r.charset {
            config.charset = v;
        }
        if let Some(v) = r.invert {
            config.invert = v;
        }
        if let Some(v) = r.fallback_label {
            config.fallback_label = v;
        }
        if r.deadline_ms.is_some() {
            config.deadline_ms = r.deadline_ms;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ag_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Config invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}
