use std::path::{Path, PathBuf};

use prebundle_core::PackageReference;
use tracing::debug;

use crate::error::ResolveError;
use crate::locate::locate_module;
use crate::manifest::{find_manifest, read_manifest};

/// Verified identity of a package reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    pub version: String,
    pub manifest_path: PathBuf,
}

/// Resolves package references relative to a fixed context directory.
#[derive(Debug, Clone)]
pub struct PackageResolver {
    context: PathBuf,
}

impl PackageResolver {
    #[must_use]
    pub fn new(context: impl Into<PathBuf>) -> Self {
        Self {
            context: context.into(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &Path {
        &self.context
    }

    /// Locates the owning `package.json` of `reference.path` and checks it
    /// declares `reference.name`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if the location cannot be resolved, the manifest
    /// is missing, unreadable or incomplete, or it declares another name.
    pub fn resolve(&self, reference: &PackageReference) -> Result<ResolvedPackage, ResolveError> {
        let location = locate_module(&self.context, &reference.path)?;
        let manifest_path = find_manifest(&location)?;
        let manifest = read_manifest(&manifest_path)?;

        let (name, version) = match (manifest.name, manifest.version) {
            (Some(name), Some(version)) => (name, version),
            (name, version) => {
                let mut fields = Vec::new();
                if name.is_none() {
                    fields.push("name");
                }
                if version.is_none() {
                    fields.push("version");
                }
                return Err(ResolveError::MissingFields {
                    path: manifest_path,
                    fields,
                });
            }
        };

        if name != reference.name {
            return Err(ResolveError::NameMismatch {
                expected: reference.name.clone(),
                found: name,
                path: manifest_path,
            });
        }

        debug!(
            package = %name,
            version = %version,
            manifest = %manifest_path.display(),
            "resolved package"
        );

        Ok(ResolvedPackage {
            name,
            version,
            manifest_path,
        })
    }
}
