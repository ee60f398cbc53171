use crate::types::CheckEvent;

/// Receives progress events while bundles are checked and rebuilt.
pub trait CheckReporter: Send + Sync {
    fn report(&self, event: &CheckEvent);
}
