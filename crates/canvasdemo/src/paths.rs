use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use canvasconfig::CONFIG_FILE_NAME;
use directories_next::ProjectDirs;

pub const ENV_CONFIG_DIR: &str = "CANVASDEMO_CONFIG_DIR";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "wgpu-canvas";
const APPLICATION: &str = "canvasdemo";

/// Picks the configuration file: an explicit `--config` path, then
/// `$CANVASDEMO_CONFIG_DIR/canvas.toml`, then the platform config directory.
pub fn resolve_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env_override(ENV_CONFIG_DIR) {
        return Ok(dir);
    }
    let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
        .ok_or_else(|| anyhow!("failed to determine user directories"))?;
    Ok(project_dirs.config_dir().to_path_buf())
}

fn env_override(name: &str) -> Option<PathBuf> {
    match env::var_os(name) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}
