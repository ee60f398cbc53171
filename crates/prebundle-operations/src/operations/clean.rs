use std::path::PathBuf;

use prebundle_project::ProjectConfig;

use crate::Result;
use crate::traits::{CheckReporter, StateStore};
use crate::types::CheckEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutput {
    pub path: PathBuf,
    /// False when there was no state file to remove.
    pub removed: bool,
}

/// Forgets the last build so the next check flags every bundle.
pub struct CleanOperation<S, E> {
    state_store: S,
    reporter: E,
}

impl<S, E> CleanOperation<S, E>
where
    S: StateStore,
    E: CheckReporter,
{
    pub fn new(state_store: S, reporter: E) -> Self {
        Self {
            state_store,
            reporter,
        }
    }

    /// # Errors
    ///
    /// Returns an error if an existing state file cannot be removed.
    pub fn execute(&self, config: &ProjectConfig) -> Result<CleanOutput> {
        let path = self.state_store.state_path(config.state_dir());
        let removed = self.state_store.clear(config.state_dir())?;

        if removed {
            self.reporter
                .report(&CheckEvent::StateCleared { path: path.clone() });
        }

        Ok(CleanOutput { path, removed })
    }
}
