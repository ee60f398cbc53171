use std::fs;
use std::io::Write;
use std::path::Path;

use prebundle_core::{PackageDescriptor, PersistedState};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::StateStore;

pub struct FileSystemStateStore;

impl FileSystemStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for FileSystemStateStore {
    fn load(&self, state_dir: &Path) -> Result<PersistedState> {
        let path = self.state_path(state_dir);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no state file, starting empty");
                return Ok(PersistedState::new());
            }
            Err(source) => return Err(OperationError::StateRead { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| OperationError::StateParse { path, source })
    }

    fn save(&self, state_dir: &Path, descriptors: &[PackageDescriptor]) -> Result<()> {
        let path = self.state_path(state_dir);
        let state = PersistedState::from_descriptors(descriptors);

        let mut content = serde_json::to_string_pretty(&state).map_err(|source| {
            OperationError::StateSerialize {
                path: path.clone(),
                source,
            }
        })?;
        content.push('\n');

        let write_err = |source| OperationError::StateWrite {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(state_dir).map_err(write_err)?;

        // temp file must live on the same filesystem for the rename
        let mut tmp = NamedTempFile::new_in(state_dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), entries = state.len(), "saved state");
        Ok(())
    }

    fn clear(&self, state_dir: &Path) -> Result<bool> {
        let path = self.state_path(state_dir);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(OperationError::StateRemove { path, source }),
        }
    }
}
