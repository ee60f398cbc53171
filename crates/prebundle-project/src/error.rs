use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no prebundle.toml found traversing from '{start_dir}'")]
    NotFound { start_dir: PathBuf },

    #[error("failed to read config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config at '{path}' declares a bundle with an empty name")]
    EmptyBundleName { path: PathBuf },

    #[error("config at '{path}' declares bundle '{name}' more than once")]
    DuplicateBundle { path: PathBuf, name: String },

    #[error("bundle '{bundle}' in '{path}' contains an empty package entry")]
    EmptyPackageEntry { path: PathBuf, bundle: String },

    #[error("config at '{path}' has an empty build command")]
    EmptyBuildCommand { path: PathBuf },

    #[error("config at '{path}' sets resolve-timeout-ms to 0; omit it to disable the timeout")]
    ZeroResolveTimeout { path: PathBuf },
}
