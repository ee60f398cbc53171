use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use prebundle_core::{BundleDefinition, PackageReference};

use crate::error::ProjectError;
use crate::schema::{BundleSection, ConfigFile, PackageEntry};

/// Resolved `prebundle.toml` settings for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    root: PathBuf,
    state_dir: PathBuf,
    strict: bool,
    resolve_timeout: Option<Duration>,
    build_command: Option<Vec<String>>,
    bundles: Vec<BundleDefinition>,
}

impl ProjectConfig {
    /// Creates a configuration with default settings rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, bundles: Vec<BundleDefinition>) -> Self {
        let root = root.into();
        Self {
            state_dir: root.join(crate::DEFAULT_STATE_DIR),
            root,
            strict: true,
            resolve_timeout: None,
            build_command: None,
            bundles,
        }
    }

    /// Directory module resolution starts from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the state file and the built artifacts.
    #[must_use]
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Whether a single unresolvable package fails the whole check.
    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout
    }

    #[must_use]
    pub fn build_command(&self) -> Option<&[String]> {
        self.build_command.as_deref()
    }

    #[must_use]
    pub fn bundles(&self) -> &[BundleDefinition] {
        &self.bundles
    }

    /// Relative paths are taken relative to the project root.
    #[must_use]
    pub fn with_state_dir(mut self, state_dir: impl AsRef<Path>) -> Self {
        self.state_dir = self.root.join(state_dir);
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_resolve_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_build_command(mut self, command: Vec<String>) -> Self {
        self.build_command = Some(command);
        self
    }
}

/// Parses `prebundle.toml` content for a project rooted at `root`.
///
/// `config_path` is only used for error messages.
///
/// # Errors
///
/// Returns `ProjectError` if the content is not valid TOML, does not match
/// the schema, declares empty or duplicate bundles, or sets a zero timeout.
pub fn parse_config(
    content: &str,
    root: &Path,
    config_path: &Path,
) -> Result<ProjectConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
        path: config_path.to_path_buf(),
        source,
    })?;

    if file.resolve_timeout_ms == Some(0) {
        return Err(ProjectError::ZeroResolveTimeout {
            path: config_path.to_path_buf(),
        });
    }

    let bundles = build_bundles(file.bundles, config_path)?;

    let mut config = ProjectConfig::new(root, bundles)
        .with_strict(file.strict.unwrap_or(true))
        .with_resolve_timeout(file.resolve_timeout_ms.map(Duration::from_millis));

    if let Some(state_dir) = file.state_dir {
        config = config.with_state_dir(state_dir);
    }

    if let Some(build) = file.build {
        if build.command.is_empty() || build.command[0].trim().is_empty() {
            return Err(ProjectError::EmptyBuildCommand {
                path: config_path.to_path_buf(),
            });
        }
        config = config.with_build_command(build.command);
    }

    Ok(config)
}

fn build_bundles(
    sections: Vec<BundleSection>,
    config_path: &Path,
) -> Result<Vec<BundleDefinition>, ProjectError> {
    let mut seen = HashSet::new();
    let mut bundles = Vec::with_capacity(sections.len());

    for section in sections {
        let name = section.name.trim().to_string();
        if name.is_empty() {
            return Err(ProjectError::EmptyBundleName {
                path: config_path.to_path_buf(),
            });
        }
        if !seen.insert(name.clone()) {
            return Err(ProjectError::DuplicateBundle {
                path: config_path.to_path_buf(),
                name,
            });
        }

        let packages = section
            .packages
            .into_iter()
            .map(|entry| to_reference(entry, &name, config_path))
            .collect::<Result<Vec<_>, _>>()?;

        bundles.push(BundleDefinition::new(name, packages));
    }

    Ok(bundles)
}

fn to_reference(
    entry: PackageEntry,
    bundle: &str,
    config_path: &Path,
) -> Result<PackageReference, ProjectError> {
    let reference = match entry {
        PackageEntry::Bare(path) => PackageReference::bare(path),
        PackageEntry::Detailed { name, path } => {
            let path = path.unwrap_or_else(|| name.clone());
            PackageReference::new(name, path)
        }
    };

    if reference.name.trim().is_empty() || reference.path.trim().is_empty() {
        return Err(ProjectError::EmptyPackageEntry {
            path: config_path.to_path_buf(),
            bundle: bundle.to_string(),
        });
    }

    Ok(reference)
}
