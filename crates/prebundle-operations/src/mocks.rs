use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use prebundle_core::{PackageDescriptor, PackageReference, PersistedState, StateEntry};
use prebundle_resolve::{ResolveError, ResolvedPackage};

use crate::Result;
use crate::error::{BuildError, OperationError};
use crate::providers::artifact_paths;
use crate::traits::{
    ArtifactProbe, BuildRequest, BundleBuilder, CheckReporter, ResolverProvider, StateStore,
};
use crate::types::CheckEvent;

#[derive(Debug, Clone)]
enum MockResolution {
    Version(String),
    Declares { name: String, version: String },
    NotFound,
    Panic,
}

/// Resolves references by their `path`, from a fixed table.
pub struct MockResolver {
    outcomes: HashMap<String, MockResolution>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The reference at `path` resolves to its configured name at `version`.
    #[must_use]
    pub fn with_package(mut self, path: &str, version: &str) -> Self {
        self.outcomes
            .insert(path.to_string(), MockResolution::Version(version.to_string()));
        self
    }

    /// The manifest at `path` declares `name`, whatever was configured.
    #[must_use]
    pub fn with_declared(mut self, path: &str, name: &str, version: &str) -> Self {
        self.outcomes.insert(
            path.to_string(),
            MockResolution::Declares {
                name: name.to_string(),
                version: version.to_string(),
            },
        );
        self
    }

    #[must_use]
    pub fn with_missing(mut self, path: &str) -> Self {
        self.outcomes
            .insert(path.to_string(), MockResolution::NotFound);
        self
    }

    #[must_use]
    pub fn with_panic(mut self, path: &str) -> Self {
        self.outcomes.insert(path.to_string(), MockResolution::Panic);
        self
    }

    #[must_use]
    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverProvider for MockResolver {
    fn resolve(
        &self,
        context: &Path,
        reference: &PackageReference,
    ) -> std::result::Result<ResolvedPackage, ResolveError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(reference.path.clone());

        if let Some(delay) = self.delays.get(&reference.path) {
            std::thread::sleep(*delay);
        }

        let manifest_path = context
            .join("node_modules")
            .join(&reference.path)
            .join("package.json");

        match self.outcomes.get(&reference.path) {
            Some(MockResolution::Version(version)) => Ok(ResolvedPackage {
                name: reference.name.clone(),
                version: version.clone(),
                manifest_path,
            }),
            Some(MockResolution::Declares { name, version }) if *name == reference.name => {
                Ok(ResolvedPackage {
                    name: name.clone(),
                    version: version.clone(),
                    manifest_path,
                })
            }
            Some(MockResolution::Declares { name, .. }) => Err(ResolveError::NameMismatch {
                expected: reference.name.clone(),
                found: name.clone(),
                path: manifest_path,
            }),
            Some(MockResolution::Panic) => panic!("mock resolver panicked on {}", reference.path),
            Some(MockResolution::NotFound) | None => Err(ResolveError::ModuleNotFound {
                specifier: reference.path.clone(),
                context: context.to_path_buf(),
            }),
        }
    }
}

impl ResolverProvider for Arc<MockResolver> {
    fn resolve(
        &self,
        context: &Path,
        reference: &PackageReference,
    ) -> std::result::Result<ResolvedPackage, ResolveError> {
        (**self).resolve(context, reference)
    }
}

pub struct MockStateStore {
    state: Mutex<PersistedState>,
    saves: Mutex<Vec<Vec<PackageDescriptor>>>,
    fail_on_save: bool,
    fail_on_load: bool,
}

impl MockStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PersistedState::new()),
            saves: Mutex::new(Vec::new()),
            fail_on_save: false,
            fail_on_load: false,
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn with_entry(self, name: &str, bundle: &str, version: &str) -> Self {
        self.state.lock().expect("lock poisoned").insert(
            name.to_string(),
            StateEntry {
                bundle: bundle.to_string(),
                version: version.to_string(),
            },
        );
        self
    }

    #[must_use]
    pub fn failing_save(mut self) -> Self {
        self.fail_on_save = true;
        self
    }

    #[must_use]
    pub fn failing_load(mut self) -> Self {
        self.fail_on_load = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn state(&self) -> PersistedState {
        self.state.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.lock().expect("lock poisoned").len()
    }
}

impl Default for MockStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MockStateStore {
    fn load(&self, state_dir: &Path) -> Result<PersistedState> {
        if self.fail_on_load {
            let path = self.state_path(state_dir);
            let source = serde_json::from_str::<PersistedState>("{")
                .expect_err("truncated json never parses");
            return Err(OperationError::StateParse { path, source });
        }
        Ok(self.state())
    }

    fn save(&self, state_dir: &Path, descriptors: &[PackageDescriptor]) -> Result<()> {
        if self.fail_on_save {
            return Err(OperationError::StateWrite {
                path: self.state_path(state_dir),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.state.lock().expect("lock poisoned") = PersistedState::from_descriptors(descriptors);
        self.saves
            .lock()
            .expect("lock poisoned")
            .push(descriptors.to_vec());
        Ok(())
    }

    fn clear(&self, _state_dir: &Path) -> Result<bool> {
        let mut state = self.state.lock().expect("lock poisoned");
        let had_entries = !state.is_empty();
        *state = PersistedState::new();
        Ok(had_entries)
    }
}

impl StateStore for Arc<MockStateStore> {
    fn load(&self, state_dir: &Path) -> Result<PersistedState> {
        (**self).load(state_dir)
    }

    fn save(&self, state_dir: &Path, descriptors: &[PackageDescriptor]) -> Result<()> {
        (**self).save(state_dir, descriptors)
    }

    fn clear(&self, state_dir: &Path) -> Result<bool> {
        (**self).clear(state_dir)
    }
}

/// Reports every bundle's artifacts as present unless told otherwise.
pub struct MockArtifactProbe {
    missing: HashSet<String>,
    all_missing: bool,
}

impl MockArtifactProbe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            missing: HashSet::new(),
            all_missing: false,
        }
    }

    #[must_use]
    pub fn with_missing(mut self, bundle: &str) -> Self {
        self.missing.insert(bundle.to_string());
        self
    }

    #[must_use]
    pub fn all_missing() -> Self {
        Self {
            missing: HashSet::new(),
            all_missing: true,
        }
    }
}

impl Default for MockArtifactProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactProbe for MockArtifactProbe {
    fn missing_artifacts(&self, state_dir: &Path, bundle: &str) -> Vec<PathBuf> {
        if self.all_missing || self.missing.contains(bundle) {
            artifact_paths(state_dir, bundle).to_vec()
        } else {
            Vec::new()
        }
    }
}

impl ArtifactProbe for Arc<MockArtifactProbe> {
    fn missing_artifacts(&self, state_dir: &Path, bundle: &str) -> Vec<PathBuf> {
        (**self).missing_artifacts(state_dir, bundle)
    }
}

pub struct MockBundleBuilder {
    requests: Mutex<Vec<BuildRequest>>,
    fail: bool,
}

impl MockBundleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<BuildRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleBuilder for MockBundleBuilder {
    fn build(&self, request: &BuildRequest) -> std::result::Result<(), BuildError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(request.clone());
        if self.fail {
            return Err(BuildError::Failed {
                program: "mock-bundler".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

impl BundleBuilder for Arc<MockBundleBuilder> {
    fn build(&self, request: &BuildRequest) -> std::result::Result<(), BuildError> {
        (**self).build(request)
    }
}

pub struct RecordingReporter {
    events: Mutex<Vec<CheckEvent>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<CheckEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn errored_packages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                CheckEvent::PackageErrored { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn flagged_bundles(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                CheckEvent::BundleFlagged { bundle, .. } => Some(bundle),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReporter for RecordingReporter {
    fn report(&self, event: &CheckEvent) {
        self.events
            .lock()
            .expect("lock poisoned")
            .push(event.clone());
    }
}

impl CheckReporter for Arc<RecordingReporter> {
    fn report(&self, event: &CheckEvent) {
        (**self).report(event);
    }
}

/// A resolved descriptor for a bare reference.
#[must_use]
pub fn resolved(name: &str, bundle: &str, version: &str) -> PackageDescriptor {
    PackageDescriptor::resolved(&PackageReference::bare(name), bundle, version)
}

#[must_use]
pub fn failed(name: &str, bundle: &str) -> PackageDescriptor {
    PackageDescriptor::failed(
        &PackageReference::bare(name),
        bundle,
        prebundle_core::ErrorInfo::new(
            prebundle_core::ErrorKind::Resolution,
            format!("cannot resolve '{name}'"),
        ),
    )
}
