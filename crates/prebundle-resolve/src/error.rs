use std::path::PathBuf;

use prebundle_core::{ErrorInfo, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve '{specifier}' from '{context}'")]
    ModuleNotFound { specifier: String, context: PathBuf },

    #[error("failed to inspect resolved location '{path}'")]
    Location {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no package.json found traversing from '{start_dir}'")]
    ManifestNotFound { start_dir: PathBuf },

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest at '{path}' missing required field(s): {}", .fields.join(", "))]
    MissingFields {
        path: PathBuf,
        fields: Vec<&'static str>,
    },

    #[error("manifest at '{path}' declares '{found}' but '{expected}' was configured")]
    NameMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },
}

impl ResolveError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModuleNotFound { .. } | Self::Location { .. } => ErrorKind::Resolution,
            Self::ManifestNotFound { .. }
            | Self::ManifestRead { .. }
            | Self::ManifestParse { .. }
            | Self::MissingFields { .. } => ErrorKind::Manifest,
            Self::NameMismatch { .. } => ErrorKind::NameMismatch,
        }
    }

    /// Converts into the record stored on a failed descriptor.
    #[must_use]
    pub fn to_info(&self) -> ErrorInfo {
        ErrorInfo::from_error(self.kind(), self)
    }
}
