use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub(crate) state_dir: Option<PathBuf>,
    pub(crate) strict: Option<bool>,
    pub(crate) resolve_timeout_ms: Option<u64>,
    pub(crate) build: Option<BuildSection>,
    #[serde(default)]
    pub(crate) bundles: Vec<BundleSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BuildSection {
    pub(crate) command: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BundleSection {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) packages: Vec<PackageEntry>,
}

/// A package entry is either a bare location string or a table naming the
/// expected package explicitly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PackageEntry {
    Bare(String),
    Detailed { name: String, path: Option<String> },
}
