use std::path::PathBuf;

use ag_core::charset;
use ag_core::config::RenderConfig;
use clap::Parser;

/// asciigen — image vers art ASCII.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source : chemin (PNG, JPEG, BMP, GIF) ou "-" pour stdin.
    #[arg(long)]
    pub image: PathBuf,

    /// Largeur en caractères. Défaut config : 80.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Hauteur en lignes de caractères, avant correction d'aspect. Défaut config : 40.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Rampe de caractères explicite, du plus dense au plus clair.
    #[arg(long)]
    pub charset: Option<String>,

    /// Rampe prédéfinie : full, compact, blocks, minimal.
    #[arg(long, conflicts_with = "charset")]
    pub preset: Option<String>,

    /// Inverser la luminance (fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Label du bloc de repli.
    #[arg(long)]
    pub label: Option<String>,

    /// Abandonner le décodage après N millisecondes.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub deadline_ms: Option<u64>,

    /// Sortie JSON {success, ascii, fallback} au lieu du texte brut.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    ///
    /// # Errors
    /// Returns an error if `--preset` names an unknown charset.
    pub fn apply_overrides(&self, config: &mut RenderConfig) -> anyhow::Result<()> {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(ref name) = self.preset {
            let Some(found) = charset::preset(name) else {
                let known: Vec<&str> = charset::PRESETS.iter().map(|(n, _)| *n).collect();
                anyhow::bail!("Preset inconnu : {name}. Disponibles : {}", known.join(", "));
            };
            config.charset = found.to_string();
        }
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(ref label) = self.label {
            config.fallback_label.clone_from(label);
        }
        if self.deadline_ms.is_some() {
            config.deadline_ms = self.deadline_ms;
        }
        config.clamp_all();
        Ok(())
    }
}
