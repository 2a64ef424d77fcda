use std::path::{Path, PathBuf};

use color_eyre::Result;
use dirs::data_dir;
use jotter_storage::LineFileStore;
use tracing::debug;

use crate::config::Config;

/// Default task file: `<platform data dir>/jotter/tasks.txt`.
pub fn default_data_file() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("jotter").join("tasks.txt"))
}

/// Picks the task file: CLI flag, then config, then the platform default.
pub fn resolve_data_file(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &config.data_file {
        return Ok(path.clone());
    }
    default_data_file()
}

pub fn store_for(flag: Option<&Path>, config: &Config) -> Result<LineFileStore> {
    let path = resolve_data_file(flag, config)?;
    debug!(path = %path.display(), "using task file");
    Ok(LineFileStore::new(path))
}
