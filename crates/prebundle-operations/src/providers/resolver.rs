use std::path::Path;

use prebundle_core::PackageReference;
use prebundle_resolve::{PackageResolver, ResolveError, ResolvedPackage};

use crate::traits::ResolverProvider;

/// Resolves references through `node_modules` lookup and `package.json`.
pub struct NodePackageResolver;

impl NodePackageResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NodePackageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverProvider for NodePackageResolver {
    fn resolve(
        &self,
        context: &Path,
        reference: &PackageReference,
    ) -> Result<ResolvedPackage, ResolveError> {
        PackageResolver::new(context).resolve(reference)
    }
}
