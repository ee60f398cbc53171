use std::path::Path;

use prebundle_operations::OperationError;
use prebundle_operations::operations::{RebuildInput, RebuildOperation, RebuildOutcome};
use prebundle_operations::providers::CommandBundleBuilder;

use super::{RebuildArgs, check_operation, load_config};
use crate::error::Result;

pub(crate) async fn run(args: RebuildArgs, start_path: &Path) -> Result<()> {
    let config = load_config(start_path, args.permissive)?;
    let command = config
        .build_command()
        .ok_or(OperationError::NoBuildCommand)?
        .to_vec();

    let operation = RebuildOperation::new(check_operation(), CommandBundleBuilder::new(command));
    let input = RebuildInput { force: args.force };

    match operation.execute(&config, &input).await? {
        RebuildOutcome::UpToDate(_) => println!("All bundles are up to date."),
        RebuildOutcome::Rebuilt { rebuilt, .. } => {
            println!("Rebuilt {} bundle(s): {}", rebuilt.len(), rebuilt.join(", "));
        }
    }
    Ok(())
}
