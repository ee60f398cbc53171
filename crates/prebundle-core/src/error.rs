use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classifies why a package reference could not be turned into metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The location identifier did not resolve to anything on disk.
    Resolution,
    /// The owning `package.json` is missing, unreadable or incomplete.
    Manifest,
    /// The manifest declares a different name than the configured one.
    NameMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resolution => "resolution error",
            Self::Manifest => "manifest error",
            Self::NameMismatch => "name mismatch",
        };
        write!(f, "{s}")
    }
}

/// Per-package failure record stored on a descriptor.
///
/// Holds the rendered message rather than the original error so descriptors
/// stay `Clone` and can cross task boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Renders `error` and its whole source chain into a single message.
    #[must_use]
    pub fn from_error(kind: ErrorKind, error: &dyn std::error::Error) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { kind, message }
    }
}
