mod error;
pub mod operations;
pub mod providers;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use error::{AggregateCheckError, BuildError, OperationError, PackageFailure, Result};
pub use types::{
    ChangeDirection, ChangedPackage, CheckEvent, DiffResult, FlagReason, FlaggedBundle,
    RebuildPlan, RemovedPackage,
};
