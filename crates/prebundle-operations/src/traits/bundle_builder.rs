use std::path::PathBuf;

use indexmap::IndexMap;

use crate::error::BuildError;

/// Everything a bundler needs to rebuild a set of bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub root: PathBuf,
    pub state_dir: PathBuf,
    /// Bundles to rebuild, in declaration order.
    pub bundles: Vec<String>,
    /// Entry points per bundle.
    pub entries: IndexMap<String, Vec<String>>,
}

pub trait BundleBuilder: Send + Sync {
    /// # Errors
    ///
    /// Returns a `BuildError` if the bundler cannot be started or reports
    /// failure.
    fn build(&self, request: &BuildRequest) -> Result<(), BuildError>;
}
