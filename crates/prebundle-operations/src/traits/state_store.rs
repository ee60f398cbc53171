use std::path::{Path, PathBuf};

use prebundle_core::{PackageDescriptor, PersistedState, STATE_FILENAME};

use crate::Result;

/// Persistence of the metadata snapshot taken after each successful build.
pub trait StateStore: Send + Sync {
    /// Loads the snapshot. A missing file yields an empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self, state_dir: &Path) -> Result<PersistedState>;

    /// Replaces the snapshot with one built from `descriptors`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    fn save(&self, state_dir: &Path, descriptors: &[PackageDescriptor]) -> Result<()>;

    /// Deletes the snapshot. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    fn clear(&self, state_dir: &Path) -> Result<bool>;

    fn state_path(&self, state_dir: &Path) -> PathBuf {
        state_dir.join(STATE_FILENAME)
    }
}
