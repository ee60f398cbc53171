use std::sync::Arc;

use indexmap::IndexMap;
use prebundle_project::ProjectConfig;
use tracing::info;

use super::check::{CheckOperation, CheckOutput};
use crate::Result;
use crate::error::BuildError;
use crate::traits::{
    ArtifactProbe, BuildRequest, BundleBuilder, CheckReporter, ResolverProvider, StateStore,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RebuildInput {
    /// Rebuild every declared bundle, stale or not.
    pub force: bool,
}

#[derive(Debug)]
pub enum RebuildOutcome {
    UpToDate(CheckOutput),
    Rebuilt {
        check: CheckOutput,
        rebuilt: Vec<String>,
    },
}

impl RebuildOutcome {
    #[must_use]
    pub fn check(&self) -> &CheckOutput {
        match self {
            Self::UpToDate(check) | Self::Rebuilt { check, .. } => check,
        }
    }
}

/// Checks, hands stale bundles to the builder, then records the snapshot.
///
/// The snapshot is only written after the builder succeeds. The builder runs
/// on the blocking pool since bundlers are long-running child processes.
pub struct RebuildOperation<R, S, A, E, B> {
    check: CheckOperation<R, S, A, E>,
    builder: Arc<B>,
}

impl<R, S, A, E, B> RebuildOperation<R, S, A, E, B>
where
    R: ResolverProvider + 'static,
    S: StateStore,
    A: ArtifactProbe,
    E: CheckReporter,
    B: BundleBuilder + 'static,
{
    pub fn new(check: CheckOperation<R, S, A, E>, builder: B) -> Self {
        Self {
            check,
            builder: Arc::new(builder),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the check fails, the builder fails, or the new
    /// snapshot cannot be written.
    pub async fn execute(
        &self,
        config: &ProjectConfig,
        input: &RebuildInput,
    ) -> Result<RebuildOutcome> {
        let check = self.check.execute(config).await?;

        let bundles: Vec<String> = if input.force {
            config.bundles().iter().map(|b| b.name.clone()).collect()
        } else {
            check.plan.names().map(str::to_string).collect()
        };

        if bundles.is_empty() {
            return Ok(RebuildOutcome::UpToDate(check));
        }

        let entries: IndexMap<String, Vec<String>> = config
            .bundles()
            .iter()
            .map(|b| {
                (
                    b.name.clone(),
                    b.entry_paths().map(str::to_string).collect(),
                )
            })
            .collect();

        let request = BuildRequest {
            root: config.root().to_path_buf(),
            state_dir: config.state_dir().to_path_buf(),
            bundles: bundles.clone(),
            entries,
        };

        info!(bundles = %bundles.join(","), force = input.force, "rebuilding bundles");
        let builder = Arc::clone(&self.builder);
        tokio::task::spawn_blocking(move || builder.build(&request))
            .await
            .map_err(BuildError::Interrupted)??;

        self.check.persist_state(config, &check.descriptors)?;

        Ok(RebuildOutcome::Rebuilt {
            check,
            rebuilt: bundles,
        })
    }
}
