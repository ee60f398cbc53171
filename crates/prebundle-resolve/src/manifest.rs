use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::MANIFEST_FILENAME;
use crate::error::ResolveError;

/// The subset of `package.json` the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Walks from `location` upward until a `package.json` is found.
///
/// A file location starts the search in its parent directory.
///
/// # Errors
///
/// Returns `ResolveError::ManifestNotFound` if no ancestor holds a manifest.
pub fn find_manifest(location: &Path) -> Result<PathBuf, ResolveError> {
    let start_dir = if location.is_file() {
        location.parent().unwrap_or(location)
    } else {
        location
    };

    start_dir
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ResolveError::ManifestNotFound {
            start_dir: start_dir.to_path_buf(),
        })
}

/// # Errors
///
/// Returns `ResolveError` if the file cannot be read or is not valid JSON.
pub fn read_manifest(path: &Path) -> Result<PackageManifest, ResolveError> {
    let content = std::fs::read_to_string(path).map_err(|source| ResolveError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ResolveError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
