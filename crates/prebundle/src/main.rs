mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::error::CliError;

const LOG_ENV: &str = "PREBUNDLE_LOG";

#[derive(Parser)]
#[command(name = "prebundle")]
#[command(version, about = "Keep prebuilt vendor bundles in sync with installed packages", long_about = None)]
struct Cli {
    /// Path to start project discovery from (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Log resolution and rebuild details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            print_error(&CliError::Runtime(e));
            return ExitCode::FAILURE;
        }
    };

    match run_to_completion(runtime, run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let start_path = resolve_start_path(cli.path)?;
    cli.command.execute(&start_path).await
}

/// Drives `future` on `runtime`, then shuts the runtime down without joining
/// blocking tasks. Resolutions abandoned after a timeout would otherwise keep
/// the process alive until they return.
fn run_to_completion<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    output
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn abandoned_blocking_task_does_not_delay_exit() {
        let runtime = Runtime::new().expect("build runtime");
        let started = Instant::now();

        let timed_out = run_to_completion(runtime, async {
            let hung = tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(5)));
            tokio::time::timeout(Duration::from_millis(20), hung)
                .await
                .is_err()
        });

        assert!(timed_out);
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "runtime shutdown waited {:?}",
            started.elapsed()
        );
    }
}
