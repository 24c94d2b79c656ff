use std::fs;
use std::path::{Path, PathBuf};

use super::core::ScreeningConfig;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".biomarker-risk.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ScreeningConfig, ConfigError> {
    parse_and_validate_config_at(contents, Path::new(CONFIG_FILE_NAME))
}

fn parse_and_validate_config_at(
    contents: &str,
    path: &Path,
) -> Result<ScreeningConfig, ConfigError> {
    let config = toml::from_str::<ScreeningConfig>(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.policy().validate().map_err(ConfigError::Invalid)?;

    Ok(config)
}

/// Load an explicitly requested config file. Any problem is an error.
pub fn load_config_from_path(path: &Path) -> Result<ScreeningConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_and_validate_config_at(&contents, path)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config file; unreadable or invalid files are skipped
/// with a warning.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ScreeningConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            None
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.biomarker-risk.toml`.
pub fn load_config_from(start: PathBuf) -> ScreeningConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ScreeningConfig::default()
        })
}

pub fn load_config() -> ScreeningConfig {
    match std::env::current_dir() {
        Ok(current) => load_config_from(current),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ScreeningConfig::default()
        }
    }
}
