use std::path::Path;

use super::{CheckArgs, check_operation, load_config};
use crate::error::Result;
use crate::output::{CheckFormatter, PlainTextFormatter};

pub(crate) async fn run(args: CheckArgs, start_path: &Path) -> Result<()> {
    let config = load_config(start_path, args.permissive)?;
    let output = check_operation().execute(&config).await?;

    if args.quiet {
        for name in output.plan.names() {
            println!("{name}");
        }
        return Ok(());
    }

    print!("{}", PlainTextFormatter.format_plan(&output.plan));
    Ok(())
}
