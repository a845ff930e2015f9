use std::sync::Arc;

use ballotline_ledger::LedgerClient;
use ballotline_types::{ElectionWindow, RejectReason, Timestamp};

use crate::error::Result;

/// Resolves the voting window from ledger truth
pub struct WindowTracker {
    client: Arc<dyn LedgerClient>,
}

impl WindowTracker {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        WindowTracker { client }
    }

    /// One window read, classified as undefined iff both fields are zero.
    /// Openness against wall-clock time is a presentation concern derived
    /// from the returned bounds, not computed here.
    pub async fn resolve(&self) -> Result<ElectionWindow> {
        let (start, end) = self.client.read_window().await?;
        Ok(ElectionWindow::from_ledger(start, end))
    }
}

/// Validate window bounds before any network call
/// Zero is the ledger's unset sentinel, so both bounds must be strictly positive
pub fn validate_window_bounds(
    start: Timestamp,
    end: Timestamp,
) -> std::result::Result<(), RejectReason> {
    if start <= 0 || end <= 0 || start >= end {
        return Err(RejectReason::InvalidRange);
    }
    Ok(())
}
