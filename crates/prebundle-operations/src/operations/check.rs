use std::sync::Arc;

use prebundle_core::{PackageDescriptor, PersistedState};
use prebundle_project::ProjectConfig;
use tracing::debug;

use super::collect::MetadataCollector;
use super::decision::decide_rebuild;
use super::diff::compute_diff;
use crate::Result;
use crate::error::AggregateCheckError;
use crate::traits::{ArtifactProbe, CheckReporter, ResolverProvider, StateStore};
use crate::types::{CheckEvent, DiffResult, RebuildPlan};

#[derive(Debug, Clone)]
pub struct CheckOutput {
    /// Every resolved or failed package, in declaration order.
    pub descriptors: Vec<PackageDescriptor>,
    pub diff: DiffResult,
    pub plan: RebuildPlan,
}

impl CheckOutput {
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.plan.is_empty()
    }
}

/// Works out which bundles are stale.
///
/// Loads the snapshot, resolves all configured packages, diffs them and
/// flags bundles. In strict mode any unresolvable package fails the check
/// after every failure has been reported.
pub struct CheckOperation<R, S, A, E> {
    resolver: Arc<R>,
    state_store: S,
    probe: A,
    reporter: E,
}

impl<R, S, A, E> CheckOperation<R, S, A, E>
where
    R: ResolverProvider + 'static,
    S: StateStore,
    A: ArtifactProbe,
    E: CheckReporter,
{
    pub fn new(resolver: R, state_store: S, probe: A, reporter: E) -> Self {
        Self {
            resolver: Arc::new(resolver),
            state_store,
            probe,
            reporter,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the state file cannot be read or parsed, or, in
    /// strict mode, an `AggregateCheckError` naming every unresolvable package.
    pub async fn execute(&self, config: &ProjectConfig) -> Result<CheckOutput> {
        let state_dir = config.state_dir();
        let persisted = self.state_store.load(state_dir)?;
        self.reporter.report(&CheckEvent::StateLoaded {
            path: self.state_store.state_path(state_dir),
            entries: persisted.len(),
        });

        let descriptors = MetadataCollector::new(Arc::clone(&self.resolver))
            .with_timeout(config.resolve_timeout())
            .collect(config.root(), config.bundles())
            .await;

        for descriptor in &descriptors {
            self.report_descriptor(descriptor);
        }

        let diff = compute_diff(&descriptors, persisted);
        debug!(
            current = diff.current.len(),
            changed = diff.changed.len(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            errored = diff.errored.len(),
            "computed diff"
        );

        if config.strict() && !diff.errored.is_empty() {
            return Err(AggregateCheckError::from_descriptors(&diff.errored).into());
        }

        let plan = decide_rebuild(&diff, config.bundles(), &self.probe, state_dir);
        for flagged in &plan.bundles {
            self.reporter.report(&CheckEvent::BundleFlagged {
                bundle: flagged.name().to_string(),
                reasons: flagged.reasons.clone(),
            });
        }

        Ok(CheckOutput {
            descriptors,
            diff,
            plan,
        })
    }

    /// Records `descriptors` as the new snapshot. Errored ones are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn persist_state(
        &self,
        config: &ProjectConfig,
        descriptors: &[PackageDescriptor],
    ) -> Result<()> {
        let state_dir = config.state_dir();
        self.state_store.save(state_dir, descriptors)?;
        self.reporter.report(&CheckEvent::StateSaved {
            path: self.state_store.state_path(state_dir),
            entries: PersistedState::from_descriptors(descriptors).len(),
        });
        Ok(())
    }

    fn report_descriptor(&self, descriptor: &PackageDescriptor) {
        let event = match descriptor.error() {
            Some(error) => CheckEvent::PackageErrored {
                name: descriptor.name.clone(),
                bundle: descriptor.bundle.clone(),
                error: error.clone(),
            },
            None => CheckEvent::PackageResolved {
                name: descriptor.name.clone(),
                bundle: descriptor.bundle.clone(),
                version: descriptor.version().unwrap_or_default().to_string(),
            },
        };
        self.reporter.report(&event);
    }
}
