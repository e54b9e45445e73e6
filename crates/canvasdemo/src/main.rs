mod cli;
mod paths;
mod run;

use std::path::Path;

use anyhow::Result;
use canvasconfig::CanvasConfig;
use cli::{Command, ConfigAction};
use renderer::scenes::SCENES;

fn main() -> Result<()> {
    let cli = cli::parse();
    let config_path = paths::resolve_config_file(cli.config.as_deref())?;
    let config = run::effective_config(&config_path, &cli.run)?;
    run::initialise_tracing(config.log_filter.as_deref());
    tracing::debug!(config = %config_path.display(), "resolved configuration");

    match cli.command {
        Some(Command::Scenes) => list_scenes(&config),
        Some(Command::Config(config_cmd)) => match config_cmd.action {
            ConfigAction::Show => show_config(&config),
            ConfigAction::Where => show_config_path(&config_path),
        },
        None => run::run(&config),
    }
}

fn list_scenes(config: &CanvasConfig) -> Result<()> {
    let bindings = config.key_bindings();
    println!("Built-in scenes:");
    for (index, scene) in SCENES.iter().enumerate() {
        let keys: Vec<String> = bindings
            .iter()
            .filter(|(_, target)| usize::try_from(**target).ok() == Some(index))
            .map(|(key, _)| key.to_string())
            .collect();
        let marker = if config.canvas.initial_scene as usize == index {
            "*"
        } else {
            " "
        };
        println!(
            " {marker}{index:>2}  {:<10} {:<44} keys: {}",
            scene.name,
            scene.summary,
            if keys.is_empty() {
                "-".to_string()
            } else {
                keys.join(", ")
            }
        );
    }
    println!("Indices past the last scene show the last scene.");
    Ok(())
}

fn show_config(config: &CanvasConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn show_config_path(path: &Path) -> Result<()> {
    let status = if path.exists() { "present" } else { "missing; defaults in use" };
    println!("{} ({status})", path.display());
    Ok(())
}
