use serde::{Deserialize, Serialize};

/// Candidate identifier (ledger-assigned, 1-based, contiguous)
pub type CandidateId = u32;

/// A candidate record as stored on the ledger
/// Created only by the ledger; locally superseded by full re-fetch, never patched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
}
