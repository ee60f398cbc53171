use std::process::Command;

use tracing::{debug, info};

use crate::error::BuildError;
use crate::traits::{BuildRequest, BundleBuilder};

const BUNDLES_ENV: &str = "PREBUNDLE_BUNDLES";
const ENTRIES_ENV: &str = "PREBUNDLE_ENTRIES";
const STATE_DIR_ENV: &str = "PREBUNDLE_STATE_DIR";

/// Runs an external bundler command in the project root.
///
/// The command learns what to build from its environment:
/// - `PREBUNDLE_BUNDLES`: comma-separated names of the bundles to rebuild
/// - `PREBUNDLE_ENTRIES`: JSON object mapping bundle names to entry paths
/// - `PREBUNDLE_STATE_DIR`: directory the artifacts are expected in
pub struct CommandBundleBuilder {
    command: Vec<String>,
}

impl CommandBundleBuilder {
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl BundleBuilder for CommandBundleBuilder {
    fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(BuildError::EmptyCommand);
        };

        let entries = serde_json::to_string(&request.entries).map_err(BuildError::EncodeEntries)?;

        info!(
            program = %program,
            bundles = %request.bundles.join(","),
            "running build command"
        );

        let status = Command::new(program)
            .args(args)
            .current_dir(&request.root)
            .env(BUNDLES_ENV, request.bundles.join(","))
            .env(ENTRIES_ENV, entries)
            .env(STATE_DIR_ENV, &request.state_dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::Failed {
                program: program.clone(),
                status: status.to_string(),
            });
        }

        debug!(program = %program, "build command finished");
        Ok(())
    }
}
