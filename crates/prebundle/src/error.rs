use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Project(#[from] prebundle_project::ProjectError),

    #[error(transparent)]
    Operation(#[from] prebundle_operations::OperationError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
