mod config;
mod error;
mod project;
mod schema;

pub const CONFIG_FILENAME: &str = "prebundle.toml";
pub const DEFAULT_STATE_DIR: &str = ".prebundle";

pub use config::{ProjectConfig, parse_config};
pub use error::ProjectError;
pub use project::{discover_project, find_config_file, load_config};

pub type Result<T> = std::result::Result<T, ProjectError>;
