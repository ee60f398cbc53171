use std::path::Path;

use prebundle_operations::operations::CleanOperation;
use prebundle_operations::providers::{FileSystemStateStore, TracingReporter};

use super::load_config;
use crate::error::Result;

pub(crate) fn run(start_path: &Path) -> Result<()> {
    let config = load_config(start_path, false)?;
    let output = CleanOperation::new(FileSystemStateStore::new(), TracingReporter::new())
        .execute(&config)?;

    if output.removed {
        println!("Removed {}", output.path.display());
    } else {
        println!("No build state to remove.");
    }
    Ok(())
}
