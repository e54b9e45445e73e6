use std::path::Path;

use anyhow::{Context, Result};
use canvasconfig::CanvasConfig;
use renderer::ShellConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;

/// `RUST_LOG` wins over the configured filter, which wins over `info`.
pub fn initialise_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|value| EnvFilter::try_new(value).ok()))
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the file at `path` (defaults when missing) and applies flag overrides.
pub fn effective_config(path: &Path, args: &RunArgs) -> Result<CanvasConfig> {
    let mut config = CanvasConfig::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    args.apply(&mut config);
    config
        .validate()
        .context("command-line overrides produced an invalid configuration")?;
    Ok(config)
}

pub fn run(config: &CanvasConfig) -> Result<()> {
    let shell = ShellConfig::from_config(config);
    tracing::info!(
        title = %shell.title,
        size = %config.window.size,
        scene = config.canvas.initial_scene,
        "opening canvas window"
    );
    renderer::run_desktop(shell)
}
