use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::ResolveError;

const EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "json"];
const MODULES_DIR: &str = "node_modules";

/// Resolves a module specifier or filesystem location to an existing path.
///
/// Locations starting with `./`, `../` or `/` (or any absolute path) are
/// joined onto `context`. Anything else is treated as a bare module name and
/// looked up in `node_modules` of `context` and each of its ancestors.
///
/// # Errors
///
/// Returns `ResolveError::ModuleNotFound` if no candidate exists, or
/// `ResolveError::Location` if the hit cannot be canonicalized.
pub fn locate_module(context: &Path, specifier: &str) -> Result<PathBuf, ResolveError> {
    let not_found = || ResolveError::ModuleNotFound {
        specifier: specifier.to_string(),
        context: context.to_path_buf(),
    };

    if specifier.trim().is_empty() {
        return Err(not_found());
    }

    let hit = if is_path_like(specifier) {
        probe(&context.join(specifier))
    } else {
        context
            .ancestors()
            .find_map(|dir| probe(&dir.join(MODULES_DIR).join(specifier)))
    };

    let hit = hit.ok_or_else(not_found)?;
    trace!(specifier, location = %hit.display(), "located module");

    hit.canonicalize()
        .map_err(|source| ResolveError::Location { path: hit, source })
}

fn is_path_like(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
        || Path::new(specifier).is_absolute()
}

/// Tries the exact file, then the file with each extension, then the
/// directory, in the order Node does.
fn probe(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }

    EXTENSIONS
        .iter()
        .find_map(|ext| {
            let mut with_ext = OsString::from(candidate.as_os_str());
            with_ext.push(".");
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            with_ext.is_file().then_some(with_ext)
        })
        .or_else(|| candidate.is_dir().then(|| candidate.to_path_buf()))
}
