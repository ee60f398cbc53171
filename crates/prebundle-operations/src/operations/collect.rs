use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use prebundle_core::{
    BundleDefinition, ErrorInfo, ErrorKind, PackageDescriptor, PackageReference,
};
use prebundle_resolve::{ResolveError, ResolvedPackage};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::traits::ResolverProvider;

type Outcome = Result<String, ErrorInfo>;

/// Resolves every package reference of a set of bundles concurrently.
///
/// Each reference gets its own blocking task; a failing or panicking
/// resolution only affects its own descriptor.
pub struct MetadataCollector<R> {
    resolver: Arc<R>,
    timeout: Option<Duration>,
}

impl<R> MetadataCollector<R>
where
    R: ResolverProvider + 'static,
{
    #[must_use]
    pub fn new(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns one descriptor per reference, in declaration order.
    pub async fn collect(
        &self,
        context: &Path,
        bundles: &[BundleDefinition],
    ) -> Vec<PackageDescriptor> {
        let pending: Vec<(&str, &PackageReference)> = bundles
            .iter()
            .flat_map(|bundle| {
                bundle
                    .packages
                    .iter()
                    .map(move |reference| (bundle.name.as_str(), reference))
            })
            .collect();

        debug!(packages = pending.len(), "resolving package metadata");

        let mut tasks = JoinSet::new();
        for (index, (_, reference)) in pending.iter().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let context = context.to_path_buf();
            let reference = (*reference).clone();
            let timeout = self.timeout;

            tasks.spawn(async move {
                let blocking =
                    tokio::task::spawn_blocking(move || resolver.resolve(&context, &reference));
                let outcome = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, blocking).await {
                        Ok(joined) => settle(joined),
                        Err(_) => Err(ErrorInfo::new(
                            ErrorKind::Resolution,
                            format!("timed out after {} ms", limit.as_millis()),
                        )),
                    },
                    None => settle(blocking.await),
                };
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<Outcome>> = (0..pending.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => warn!(error = %e, "resolution task aborted"),
            }
        }

        pending
            .into_iter()
            .zip(slots)
            .map(|((bundle, reference), slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    Err(ErrorInfo::new(
                        ErrorKind::Resolution,
                        "resolution task did not complete",
                    ))
                });
                match outcome {
                    Ok(version) => PackageDescriptor::resolved(reference, bundle, version),
                    Err(error) => PackageDescriptor::failed(reference, bundle, error),
                }
            })
            .collect()
    }
}

fn settle(joined: Result<Result<ResolvedPackage, ResolveError>, JoinError>) -> Outcome {
    match joined {
        Ok(Ok(package)) => Ok(package.version),
        Ok(Err(e)) => Err(e.to_info()),
        Err(e) => Err(ErrorInfo::new(
            ErrorKind::Resolution,
            format!("resolver failed: {e}"),
        )),
    }
}
