use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// Log filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// User-level configuration loaded from `~/.config/jotter/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the task file location.
    pub data_file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `warn` or `jotter_storage=debug`.
    pub log_level: Option<String>,
}

impl Config {
    /// Fills unset keys so `config init` writes a self-describing file.
    pub fn with_defaults(mut self, data_file: PathBuf) -> Self {
        self.data_file.get_or_insert(data_file);
        self.log_level
            .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
        self
    }
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("jotter").join("config.toml"))
}

/// Write `config` to the default path unless a file is already there.
/// Returns the path and whether anything was written.
pub fn write_default_if_missing(config: &Config) -> Result<(PathBuf, bool)> {
    let path = default_path()?;
    let written = write_to_path_if_missing(config, &path)?;
    Ok((path, written))
}

/// Returns `false` when an existing file was left untouched.
pub fn write_to_path_if_missing(config: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(true)
}
