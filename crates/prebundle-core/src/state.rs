use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::PackageDescriptor;

/// Name of the snapshot file inside the state directory.
pub const STATE_FILENAME: &str = "dll-bundles-state.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub bundle: String,
    pub version: String,
}

/// Metadata snapshot from the last successful build.
/// File: `<state-dir>/dll-bundles-state.json`
/// Format:
/// ```json
/// {
///   "react": { "bundle": "vendor", "version": "18.2.0" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState {
    packages: IndexMap<String, StateEntry>,
}

impl PersistedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the snapshot written after a successful rebuild.
    ///
    /// Errored descriptors are skipped. When several descriptors share a name,
    /// the first one in declaration order is kept.
    #[must_use]
    pub fn from_descriptors(descriptors: &[PackageDescriptor]) -> Self {
        let mut state = Self::new();
        for descriptor in descriptors {
            let Some(version) = descriptor.version() else {
                continue;
            };
            state
                .packages
                .entry(descriptor.name.clone())
                .or_insert_with(|| StateEntry {
                    bundle: descriptor.bundle.clone(),
                    version: version.to_string(),
                });
        }
        state
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StateEntry> {
        self.packages.get(name)
    }

    pub fn insert(&mut self, name: String, entry: StateEntry) {
        self.packages.insert(name, entry);
    }

    /// Removes an entry, keeping the remaining entries in their original order.
    #[must_use]
    pub fn remove(&mut self, name: &str) -> Option<StateEntry> {
        self.packages.shift_remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateEntry)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl IntoIterator for PersistedState {
    type Item = (String, StateEntry);
    type IntoIter = indexmap::map::IntoIter<String, StateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}
