mod error;
mod locate;
mod manifest;
mod resolver;

pub const MANIFEST_FILENAME: &str = "package.json";

pub use error::ResolveError;
pub use locate::locate_module;
pub use manifest::{PackageManifest, find_manifest, read_manifest};
pub use resolver::{PackageResolver, ResolvedPackage};

pub type Result<T> = std::result::Result<T, ResolveError>;
