use std::sync::Arc;

use ballotline_ledger::LedgerClient;
use ballotline_types::Identity;

use crate::error::Result;

/// Answers whether an identity has already voted, always from ledger truth
pub struct VoteStatusTracker {
    client: Arc<dyn LedgerClient>,
}

impl VoteStatusTracker {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        VoteStatusTracker { client }
    }

    /// Fresh read on every call, never cached: the answer can change out
    /// from under the client when the same identity votes from another
    /// session.
    pub async fn has_voted(&self, identity: &Identity) -> Result<bool> {
        Ok(self.client.has_voted(identity).await?)
    }
}
