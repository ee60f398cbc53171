use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use prebundle_core::{BundleDefinition, ErrorInfo, PackageDescriptor};
use semver::Version;

/// A package whose resolved version differs from the persisted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPackage {
    pub descriptor: PackageDescriptor,
    pub previous_version: String,
}

impl ChangedPackage {
    #[must_use]
    pub fn current_version(&self) -> &str {
        self.descriptor.version().unwrap_or_default()
    }

    /// Compares the versions as semver when both parse.
    #[must_use]
    pub fn direction(&self) -> ChangeDirection {
        let parse = |v: &str| Version::parse(v.trim_start_matches('v')).ok();
        match (
            parse(&self.previous_version),
            parse(self.current_version()),
        ) {
            (Some(previous), Some(current)) => match current.cmp(&previous) {
                Ordering::Greater => ChangeDirection::Upgrade,
                Ordering::Less => ChangeDirection::Downgrade,
                // e.g. differing build metadata only
                Ordering::Equal => ChangeDirection::Unknown,
            },
            _ => ChangeDirection::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Upgrade,
    Downgrade,
    Unknown,
}

/// A persisted package that no current descriptor matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedPackage {
    pub name: String,
    pub bundle: String,
}

/// Five-way classification of the current packages against the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub current: Vec<PackageDescriptor>,
    pub changed: Vec<ChangedPackage>,
    pub added: Vec<PackageDescriptor>,
    pub removed: Vec<RemovedPackage>,
    pub errored: Vec<PackageDescriptor>,
}

impl DiffResult {
    /// Returns true if nothing differs from the snapshot.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.errored.is_empty()
    }

    /// Reasons contributed by package classification for `bundle`.
    #[must_use]
    pub fn reasons_for(&self, bundle: &str) -> Vec<FlagReason> {
        let changed = self
            .changed
            .iter()
            .filter(|c| c.descriptor.bundle == bundle)
            .map(|c| FlagReason::Changed {
                package: c.descriptor.name.clone(),
                from: c.previous_version.clone(),
                to: c.current_version().to_string(),
            });
        let added = self
            .added
            .iter()
            .filter(|d| d.bundle == bundle)
            .map(|d| FlagReason::Added {
                package: d.name.clone(),
            });
        let removed = self
            .removed
            .iter()
            .filter(|r| r.bundle == bundle)
            .map(|r| FlagReason::Removed {
                package: r.name.clone(),
            });
        let errored = self
            .errored
            .iter()
            .filter(|d| d.bundle == bundle)
            .map(|d| FlagReason::Errored {
                package: d.name.clone(),
            });

        changed.chain(added).chain(removed).chain(errored).collect()
    }
}

/// Why a bundle needs to be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagReason {
    MissingArtifacts { paths: Vec<PathBuf> },
    Changed {
        package: String,
        from: String,
        to: String,
    },
    Added { package: String },
    Removed { package: String },
    Errored { package: String },
}

impl fmt::Display for FlagReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArtifacts { paths } => {
                let names: Vec<_> = paths
                    .iter()
                    .map(|p| {
                        p.file_name()
                            .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
                    })
                    .collect();
                write!(f, "missing artifacts: {}", names.join(", "))
            }
            Self::Changed { package, from, to } => write!(f, "{package} changed {from} -> {to}"),
            Self::Added { package } => write!(f, "{package} added"),
            Self::Removed { package } => write!(f, "{package} removed"),
            Self::Errored { package } => write!(f, "{package} could not be resolved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedBundle {
    pub definition: BundleDefinition,
    pub reasons: Vec<FlagReason>,
}

impl FlaggedBundle {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Bundles that need rebuilding, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildPlan {
    pub bundles: Vec<FlaggedBundle>,
}

impl RebuildPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    #[must_use]
    pub fn contains(&self, bundle: &str) -> bool {
        self.bundles.iter().any(|b| b.name() == bundle)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bundles.iter().map(FlaggedBundle::name)
    }
}

/// Structured progress notifications emitted by the operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent {
    StateLoaded {
        path: PathBuf,
        entries: usize,
    },
    PackageResolved {
        name: String,
        bundle: String,
        version: String,
    },
    PackageErrored {
        name: String,
        bundle: String,
        error: ErrorInfo,
    },
    BundleFlagged {
        bundle: String,
        reasons: Vec<FlagReason>,
    },
    StateSaved {
        path: PathBuf,
        entries: usize,
    },
    StateCleared {
        path: PathBuf,
    },
}
