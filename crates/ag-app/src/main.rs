use std::io::Write;

use ag_core::config::RenderConfig;
use anyhow::{Context, Result};
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr, stdout reste réservé à l'artefact)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;

    // 4. Lire la source et convertir
    let bytes = pipeline::read_source(&cli.image)?;
    let artifact = pipeline::convert_bytes(bytes, &config)?;

    // 5. Écrire le résultat
    let output = pipeline::format_output(&artifact, cli.json)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Écriture sur stdout impossible")?;
    Ok(())
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    if cli.config.exists() {
        ag_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(RenderConfig::default())
    }
}
