use std::collections::HashSet;

use prebundle_core::{PackageDescriptor, PersistedState};

use crate::types::{ChangedPackage, DiffResult, RemovedPackage};

/// Classifies the current descriptors against the persisted snapshot.
///
/// Descriptors are processed in declaration order, so the first descriptor
/// carrying a name decides its classification and later duplicates are
/// dropped. Errored descriptors are always reported, duplicates included.
/// Snapshot entries no descriptor claimed end up in `removed`, in snapshot
/// order.
#[must_use]
pub fn compute_diff(descriptors: &[PackageDescriptor], persisted: PersistedState) -> DiffResult {
    let mut remaining = persisted;
    let mut reconciled: HashSet<&str> = HashSet::new();
    let mut diff = DiffResult::default();

    for descriptor in descriptors {
        let name = descriptor.name.as_str();

        let Some(version) = descriptor.version() else {
            if remaining.remove(name).is_some() {
                reconciled.insert(name);
            }
            diff.errored.push(descriptor.clone());
            continue;
        };

        if let Some(entry) = remaining.remove(name) {
            if entry.version == version {
                diff.current.push(descriptor.clone());
            } else {
                diff.changed.push(ChangedPackage {
                    descriptor: descriptor.clone(),
                    previous_version: entry.version,
                });
            }
            reconciled.insert(name);
        } else if reconciled.insert(name) {
            diff.added.push(descriptor.clone());
        }
    }

    diff.removed = remaining
        .into_iter()
        .map(|(name, entry)| RemovedPackage {
            name,
            bundle: entry.bundle,
        })
        .collect();

    diff
}
