use std::path::{Path, PathBuf};

use crate::traits::ArtifactProbe;

/// The bundle script and its manifest, both kept in the state directory.
#[must_use]
pub fn artifact_paths(state_dir: &Path, bundle: &str) -> [PathBuf; 2] {
    [
        state_dir.join(format!("{bundle}.dll.js")),
        state_dir.join(format!("{bundle}-manifest.json")),
    ]
}

pub struct FileSystemArtifactProbe;

impl FileSystemArtifactProbe {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemArtifactProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactProbe for FileSystemArtifactProbe {
    fn missing_artifacts(&self, state_dir: &Path, bundle: &str) -> Vec<PathBuf> {
        artifact_paths(state_dir, bundle)
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }
}
