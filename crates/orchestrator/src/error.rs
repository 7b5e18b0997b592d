//! Cycle error taxonomy: what abandons a cycle vs what stops the engine.

use thiserror::Error;

/// Errors surfaced by one polling cycle.
///
/// Row-level input defects never reach this level; they are dropped inside
/// the normalizer. Signal-level configuration defects are skips, counted
/// in the cycle report. Everything here is cycle-level or worse.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The signal feed could not be read; the cycle is abandoned.
    #[error("signal feed error: {0}")]
    Feed(anyhow::Error),

    /// The symbol table could not be loaded; the cycle is abandoned.
    #[error("symbol configuration error: {0}")]
    Config(anyhow::Error),

    /// The order gateway failed mid-dispatch; the cycle is abandoned and
    /// the loop retries on the next scheduled interval.
    #[error("order gateway error: {0}")]
    Gateway(anyhow::Error),

    /// The ledger store is unavailable. Without it the engine cannot
    /// guarantee at-most-once dispatch, so the loop must stop.
    #[error("execution ledger error: {0}")]
    Ledger(anyhow::Error),
}

impl CycleError {
    /// True for defects the loop must not retry through.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Ledger(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ledger_errors_are_fatal() {
        assert!(CycleError::Ledger(anyhow::anyhow!("disk full")).is_fatal());
        assert!(!CycleError::Feed(anyhow::anyhow!("gone")).is_fatal());
        assert!(!CycleError::Config(anyhow::anyhow!("gone")).is_fatal());
        assert!(!CycleError::Gateway(anyhow::anyhow!("rejected")).is_fatal());
    }
}
