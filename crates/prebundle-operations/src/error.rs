use std::fmt;
use std::path::PathBuf;

use prebundle_core::{ErrorInfo, PackageDescriptor};
use thiserror::Error;

/// One package that could not be resolved during a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFailure {
    pub name: String,
    pub bundle: String,
    pub error: ErrorInfo,
}

impl fmt::Display for PackageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (bundle '{}'): {}", self.name, self.bundle, self.error)
    }
}

/// Strict-mode failure listing every package that could not be resolved.
#[derive(Debug, Error)]
#[error(
    "{} package(s) could not be resolved: {}",
    .failures.len(),
    .failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
)]
pub struct AggregateCheckError {
    pub failures: Vec<PackageFailure>,
}

impl AggregateCheckError {
    /// Collects the failures of all errored descriptors, in order.
    #[must_use]
    pub fn from_descriptors(descriptors: &[PackageDescriptor]) -> Self {
        let failures = descriptors
            .iter()
            .filter_map(|d| {
                d.error().map(|error| PackageFailure {
                    name: d.name.clone(),
                    bundle: d.bundle.clone(),
                    error: error.clone(),
                })
            })
            .collect();
        Self { failures }
    }

    #[must_use]
    pub fn package_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build command is empty")]
    EmptyCommand,

    #[error("failed to start build command '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("build command '{program}' failed with {status}")]
    Failed { program: String, status: String },

    #[error("failed to encode bundle entries for the build command")]
    EncodeEntries(#[source] serde_json::Error),

    #[error("build task did not complete")]
    Interrupted(#[source] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("package check failed")]
    Check(#[from] AggregateCheckError),

    #[error("bundle build failed")]
    Build(#[from] BuildError),

    #[error("no build command configured; add a [build] section to prebundle.toml")]
    NoBuildCommand,

    #[error("failed to read state file '{path}'")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file '{path}'")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state for '{path}'")]
    StateSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write state file '{path}'")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove state file '{path}'")]
    StateRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
