use serde::{Deserialize, Serialize};

use crate::error::ErrorInfo;

/// A configured pointer to code that belongs in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    /// Expected package identity, checked against the resolved manifest.
    pub name: String,
    /// Module specifier or filesystem location.
    pub path: String,
}

impl PackageReference {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// A reference given only as a location string; the name equals the path.
    #[must_use]
    pub fn bare(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDefinition {
    pub name: String,
    pub packages: Vec<PackageReference>,
}

impl BundleDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, packages: Vec<PackageReference>) -> Self {
        Self {
            name: name.into(),
            packages,
        }
    }

    /// Entry points handed to the bundler, in declaration order.
    pub fn entry_paths(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.path.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorStatus {
    Resolved { version: String },
    Failed(ErrorInfo),
}

/// Resolution result for one package reference within one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub path: String,
    pub bundle: String,
    pub status: DescriptorStatus,
}

impl PackageDescriptor {
    #[must_use]
    pub fn resolved(
        reference: &PackageReference,
        bundle: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: reference.name.clone(),
            path: reference.path.clone(),
            bundle: bundle.into(),
            status: DescriptorStatus::Resolved {
                version: version.into(),
            },
        }
    }

    #[must_use]
    pub fn failed(
        reference: &PackageReference,
        bundle: impl Into<String>,
        error: ErrorInfo,
    ) -> Self {
        Self {
            name: reference.name.clone(),
            path: reference.path.clone(),
            bundle: bundle.into(),
            status: DescriptorStatus::Failed(error),
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match &self.status {
            DescriptorStatus::Resolved { version } => Some(version),
            DescriptorStatus::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        match &self.status {
            DescriptorStatus::Resolved { .. } => None,
            DescriptorStatus::Failed(error) => Some(error),
        }
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        matches!(self.status, DescriptorStatus::Failed(_))
    }
}
