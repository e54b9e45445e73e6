use std::path::PathBuf;

use canvasconfig::{CanvasConfig, PowerPreference, WindowSize};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "canvasdemo",
    author,
    version,
    about = "Desktop shell for the wgpu canvas engine",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Configuration file (defaults to `canvas.toml` in the config directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Scene index to start on (out-of-range values show the last scene).
    #[arg(long, global = true, value_name = "INDEX", value_parser = clap::value_parser!(i32).range(0..))]
    pub scene: Option<i32>,

    /// Frame rate cap (0 = follow the display).
    #[arg(long, global = true, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Window size (e.g. `1280x720`).
    #[arg(long, global = true, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<WindowSize>,

    /// GPU power preference: `high` or `low`.
    #[arg(long, global = true, value_name = "PREFERENCE", value_parser = parse_power)]
    pub power: Option<PowerPreference>,

    /// Log a status line for every presented frame.
    #[arg(long, global = true)]
    pub report_frames: bool,
}

impl RunArgs {
    /// Layers command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut CanvasConfig) {
        if let Some(scene) = self.scene {
            config.canvas.initial_scene = scene;
        }
        if let Some(fps) = self.fps {
            config.canvas.max_fps = fps;
        }
        if let Some(size) = self.size {
            config.window.size = size;
        }
        if let Some(power) = self.power {
            config.canvas.power = power;
        }
        if self.report_frames {
            config.canvas.report_frames = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in scenes and their indices.
    Scenes,
    /// Inspect the effective configuration.
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the configuration after file defaults and flags are applied.
    Show,
    /// Print the resolved configuration file path.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_size(value: &str) -> Result<WindowSize, String> {
    value.parse()
}

fn parse_power(value: &str) -> Result<PowerPreference, String> {
    value.parse()
}
