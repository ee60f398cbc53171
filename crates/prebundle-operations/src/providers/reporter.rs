use tracing::{debug, info, warn};

use crate::traits::CheckReporter;
use crate::types::CheckEvent;

/// Forwards check events to `tracing`.
pub struct TracingReporter;

impl TracingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReporter for TracingReporter {
    fn report(&self, event: &CheckEvent) {
        match event {
            CheckEvent::StateLoaded { path, entries } => {
                debug!(path = %path.display(), entries, "loaded state");
            }
            CheckEvent::PackageResolved {
                name,
                bundle,
                version,
            } => {
                debug!(package = %name, bundle = %bundle, version = %version, "package resolved");
            }
            CheckEvent::PackageErrored {
                name,
                bundle,
                error,
            } => {
                warn!(package = %name, bundle = %bundle, kind = %error.kind, "{}", error.message);
            }
            CheckEvent::BundleFlagged { bundle, reasons } => {
                let reasons: Vec<_> = reasons.iter().map(ToString::to_string).collect();
                info!(bundle = %bundle, reasons = %reasons.join("; "), "bundle needs rebuild");
            }
            CheckEvent::StateSaved { path, entries } => {
                info!(path = %path.display(), entries, "saved state");
            }
            CheckEvent::StateCleared { path } => {
                info!(path = %path.display(), "cleared state");
            }
        }
    }
}
