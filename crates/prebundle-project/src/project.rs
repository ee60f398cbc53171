use std::path::{Path, PathBuf};

use crate::CONFIG_FILENAME;
use crate::config::{ProjectConfig, parse_config};
use crate::error::ProjectError;

/// Finds the nearest `prebundle.toml` at or above `start_dir` and loads it.
///
/// The directory containing the config file becomes the project root.
///
/// # Errors
///
/// Returns `ProjectError` if no config file can be found or if it cannot be
/// read or parsed.
pub fn discover_project(start_dir: &Path) -> Result<ProjectConfig, ProjectError> {
    let config_path = find_config_file(start_dir)?;
    load_config(&config_path)
}

/// # Errors
///
/// Returns `ProjectError::NotFound` if no ancestor of `start_dir` holds a
/// config file, or `ProjectError::ConfigRead` if `start_dir` does not exist.
pub fn find_config_file(start_dir: &Path) -> Result<PathBuf, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| ProjectError::ConfigRead {
            path: start_dir.to_path_buf(),
            source,
        })?;

    let mut current = start_dir.clone();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.is_file() {
            return Ok(config_path);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(ProjectError::NotFound { start_dir }),
        }
    }
}

/// # Errors
///
/// Returns `ProjectError` if the file cannot be read or parsed.
pub fn load_config(config_path: &Path) -> Result<ProjectConfig, ProjectError> {
    let content =
        std::fs::read_to_string(config_path).map_err(|source| ProjectError::ConfigRead {
            path: config_path.to_path_buf(),
            source,
        })?;

    let root = config_path.parent().unwrap_or(Path::new("."));
    parse_config(&content, root, config_path)
}
