use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Looked up in the working directory, in order, when `--config` is absent.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["cannon.toml", "cannon.json"];

/// Returns the run settings file: the explicit `--config` path, else the
/// first default file that exists, else `None`. An explicit path that does
/// not exist is an error; a missing default file is not.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = match path {
        Some(explicit) => Some(PathBuf::from(explicit)),
        None => DEFAULT_CONFIG_FILES
            .into_iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()),
    };
    chosen
        .map(|file| load_config_file(&file))
        .transpose()
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
