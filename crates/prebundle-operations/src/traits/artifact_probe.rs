use std::path::{Path, PathBuf};

pub trait ArtifactProbe: Send + Sync {
    /// Lists the build artifacts of `bundle` that are absent from `state_dir`.
    fn missing_artifacts(&self, state_dir: &Path, bundle: &str) -> Vec<PathBuf>;

    fn is_valid(&self, state_dir: &Path, bundle: &str) -> bool {
        self.missing_artifacts(state_dir, bundle).is_empty()
    }
}
