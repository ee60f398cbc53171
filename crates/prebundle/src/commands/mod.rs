mod check;
mod clean;
mod rebuild;
mod status;

use std::path::Path;

use clap::{Args, Subcommand};
use prebundle_operations::operations::CheckOperation;
use prebundle_operations::providers::{
    FileSystemArtifactProbe, FileSystemStateStore, NodePackageResolver, TracingReporter,
};
use prebundle_project::{ProjectConfig, discover_project};
use tracing::debug;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List bundles whose packages or artifacts are out of date
    Check(CheckArgs),
    /// Show how every configured package compares to the last build
    Status(StatusArgs),
    /// Run the configured build command for stale bundles
    Rebuild(RebuildArgs),
    /// Forget the last build so every bundle is rebuilt next time
    Clean,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Report unresolvable packages instead of failing
    #[arg(long)]
    pub permissive: bool,

    /// Print only the names of bundles that need rebuilding
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Report unresolvable packages instead of failing
    #[arg(long)]
    pub permissive: bool,
}

#[derive(Args)]
pub(crate) struct RebuildArgs {
    /// Rebuild every bundle, even if it is up to date
    #[arg(long)]
    pub force: bool,

    /// Report unresolvable packages instead of failing
    #[arg(long)]
    pub permissive: bool,
}

impl Commands {
    pub(crate) async fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Check(args) => check::run(args, start_path).await,
            Self::Status(args) => status::run(args, start_path).await,
            Self::Rebuild(args) => rebuild::run(args, start_path).await,
            Self::Clean => clean::run(start_path),
        }
    }
}

type FileSystemCheck = CheckOperation<
    NodePackageResolver,
    FileSystemStateStore,
    FileSystemArtifactProbe,
    TracingReporter,
>;

fn load_config(start_path: &Path, permissive: bool) -> Result<ProjectConfig> {
    let config = discover_project(start_path)?;
    debug!(
        root = %config.root().display(),
        state_dir = %config.state_dir().display(),
        bundles = config.bundles().len(),
        "loaded project config"
    );
    Ok(if permissive {
        config.with_strict(false)
    } else {
        config
    })
}

fn check_operation() -> FileSystemCheck {
    CheckOperation::new(
        NodePackageResolver::new(),
        FileSystemStateStore::new(),
        FileSystemArtifactProbe::new(),
        TracingReporter::new(),
    )
}
