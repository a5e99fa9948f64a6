// Config module
// Loading grid options from TOML or JSON files

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::settings::GridOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read grid options from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML grid options: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON grid options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported grid options file {0} (expected .toml or .json)")]
    UnsupportedExtension(PathBuf),
}

pub fn from_toml_str(data: &str) -> Result<GridOptions, ConfigError> {
    Ok(toml::from_str(data)?)
}

pub fn from_json_str(data: &str) -> Result<GridOptions, ConfigError> {
    Ok(serde_json::from_str(data)?)
}

/// Load options from `path`, picking the format from its extension.
pub fn load_options(path: &Path) -> Result<GridOptions, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<GridOptions, ConfigError> = match extension.as_deref() {
        Some("toml") => from_toml_str,
        Some("json") => from_json_str,
        _ => return Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
    };

    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse(&data)?;
    log::info!("loaded grid options from {}", path.display());
    Ok(options)
}
