use std::path::Path;

use prebundle_core::PackageReference;
use prebundle_resolve::{ResolveError, ResolvedPackage};

/// Resolves a package reference to its verified name and version.
///
/// Implementations are called from blocking worker threads, one call per
/// reference, so they must be shareable across threads.
pub trait ResolverProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns a `ResolveError` if the reference cannot be located, its
    /// manifest is unusable, or the manifest declares a different name.
    fn resolve(
        &self,
        context: &Path,
        reference: &PackageReference,
    ) -> Result<ResolvedPackage, ResolveError>;
}
