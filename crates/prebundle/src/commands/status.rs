use std::path::Path;

use super::{StatusArgs, check_operation, load_config};
use crate::error::Result;
use crate::output::{CheckFormatter, PlainTextFormatter};

pub(crate) async fn run(args: StatusArgs, start_path: &Path) -> Result<()> {
    let config = load_config(start_path, args.permissive)?;
    let output = check_operation().execute(&config).await?;

    let formatter = PlainTextFormatter;
    print!("{}", formatter.format_diff(&output.diff));
    println!();
    print!("{}", formatter.format_plan(&output.plan));
    Ok(())
}
