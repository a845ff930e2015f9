use async_trait::async_trait;
use ballotline_types::{Candidate, CandidateId, Identity, LedgerResult, SubmissionRef, Timestamp};

/// Remote interface to the election ledger
/// Provides an abstraction that can be implemented for in-memory, RPC, or on-chain access
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Read the voting window bounds; zero/zero means no window has been set
    async fn read_window(&self) -> LedgerResult<(Timestamp, Timestamp)>;

    /// Define the voting window (caller-authorized)
    /// Rejects an unauthorized caller or an invalid range
    async fn define_window(&self, start: Timestamp, end: Timestamp) -> LedgerResult<SubmissionRef>;

    /// Number of registered candidates
    async fn count_candidates(&self) -> LedgerResult<u32>;

    /// Read one candidate record by 1-based index; index must be in `[1, count]`
    async fn read_candidate(&self, index: u32) -> LedgerResult<Candidate>;

    /// Register a new candidate (caller-authorized); the ledger assigns the next id
    async fn add_candidate(&self, name: &str, party: &str) -> LedgerResult<SubmissionRef>;

    /// Whether the given identity has already voted
    async fn has_voted(&self, identity: &Identity) -> LedgerResult<bool>;

    /// Cast the caller's vote; one vote per identity is enforced here, not client-side
    async fn cast_vote(&self, candidate_id: CandidateId) -> LedgerResult<SubmissionRef>;
}
