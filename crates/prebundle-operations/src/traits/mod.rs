mod artifact_probe;
mod bundle_builder;
mod reporter;
mod resolver_provider;
mod state_store;

pub use artifact_probe::ArtifactProbe;
pub use bundle_builder::{BuildRequest, BundleBuilder};
pub use reporter::CheckReporter;
pub use resolver_provider::ResolverProvider;
pub use state_store::StateStore;
