mod check;
mod clean;
mod collect;
mod decision;
mod diff;
mod rebuild;

pub use check::{CheckOperation, CheckOutput};
pub use clean::{CleanOperation, CleanOutput};
pub use collect::MetadataCollector;
pub use decision::decide_rebuild;
pub use diff::compute_diff;
pub use rebuild::{RebuildInput, RebuildOperation, RebuildOutcome};
