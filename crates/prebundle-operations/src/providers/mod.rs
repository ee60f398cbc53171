mod artifacts;
mod builder;
mod reporter;
mod resolver;
mod state_store;

pub use artifacts::{FileSystemArtifactProbe, artifact_paths};
pub use builder::CommandBundleBuilder;
pub use reporter::TracingReporter;
pub use resolver::NodePackageResolver;
pub use state_store::FileSystemStateStore;
