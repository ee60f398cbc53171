use std::collections::HashSet;
use std::path::Path;

use prebundle_core::BundleDefinition;

use crate::traits::ArtifactProbe;
use crate::types::{DiffResult, FlagReason, FlaggedBundle, RebuildPlan};

/// Flags every declared bundle whose artifacts are missing or that owns a
/// changed, added, removed or errored package.
///
/// Bundles appear in declaration order, each at most once. Removed packages
/// whose bundle is no longer declared flag nothing.
#[must_use]
pub fn decide_rebuild<A>(
    diff: &DiffResult,
    bundles: &[BundleDefinition],
    probe: &A,
    state_dir: &Path,
) -> RebuildPlan
where
    A: ArtifactProbe + ?Sized,
{
    let mut seen = HashSet::new();
    let mut plan = RebuildPlan::default();

    for bundle in bundles {
        if !seen.insert(bundle.name.as_str()) {
            continue;
        }

        let mut reasons = Vec::new();
        let missing = probe.missing_artifacts(state_dir, &bundle.name);
        if !missing.is_empty() {
            reasons.push(FlagReason::MissingArtifacts { paths: missing });
        }
        reasons.extend(diff.reasons_for(&bundle.name));

        if !reasons.is_empty() {
            plan.bundles.push(FlaggedBundle {
                definition: bundle.clone(),
                reasons,
            });
        }
    }

    plan
}
