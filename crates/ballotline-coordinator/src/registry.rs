use std::sync::Arc;

use ballotline_ledger::LedgerClient;
use ballotline_types::{RegistrySnapshot, RejectReason};
use futures::future::try_join_all;

use crate::error::Result;

/// Fetches the candidate roster from the ledger
pub struct CandidateRegistry {
    client: Arc<dyn LedgerClient>,
}

impl CandidateRegistry {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        CandidateRegistry { client }
    }

    /// Read the count, then fan out one read per 1-based index and join
    /// them all. All-or-nothing: one failed read fails the whole fetch, so
    /// a partial roster never reaches the ballot. Safe to re-invoke; each
    /// call yields an independent, internally consistent snapshot.
    pub async fn fetch_all(&self) -> Result<RegistrySnapshot> {
        let count = self.client.count_candidates().await?;
        if count == 0 {
            return Ok(RegistrySnapshot::empty());
        }

        let reads = (1..=count).map(|index| {
            let client = Arc::clone(&self.client);
            async move { client.read_candidate(index).await }
        });
        let records = try_join_all(reads).await?;

        Ok(RegistrySnapshot::from_records(records))
    }
}

/// Validate candidate fields before any network call; returns trimmed values
pub fn validate_candidate_fields<'a>(
    name: &'a str,
    party: &'a str,
) -> std::result::Result<(&'a str, &'a str), RejectReason> {
    let name = name.trim();
    let party = party.trim();
    if name.is_empty() {
        return Err(RejectReason::MissingField("name".to_string()));
    }
    if party.is_empty() {
        return Err(RejectReason::MissingField("party".to_string()));
    }
    Ok((name, party))
}
