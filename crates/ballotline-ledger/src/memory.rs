use async_trait::async_trait;
use ballotline_types::{
    Candidate, CandidateId, Identity, LedgerError, LedgerResult, SubmissionRef, Timestamp,
};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::LedgerClient;

/// Ledger operations, for call accounting and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerOp {
    ReadWindow,
    DefineWindow,
    CountCandidates,
    ReadCandidate,
    AddCandidate,
    HasVoted,
    CastVote,
}

/// One-shot fault, consumed by the first matching call
#[derive(Debug, Clone)]
enum Fault {
    /// The call fails in transit; no state change
    Transport(LedgerOp),
    /// The read of one candidate index fails in transit
    CandidateRead(u32),
    /// The next vote is applied but its acknowledgement is dropped
    LostVoteAck,
}

#[derive(Debug)]
struct LedgerCore {
    admin: Identity,
    window: (Timestamp, Timestamp),
    candidates: Vec<Candidate>,
    voters: HashSet<Identity>,
    sequence: u64,
    calls: HashMap<LedgerOp, usize>,
    faults: VecDeque<Fault>,
    latency: Option<Duration>,
}

impl LedgerCore {
    fn new(admin: Identity) -> Self {
        LedgerCore {
            admin,
            window: (0, 0),
            candidates: Vec::new(),
            voters: HashSet::new(),
            sequence: 0,
            calls: HashMap::new(),
            faults: VecDeque::new(),
            latency: None,
        }
    }

    /// Consume the first queued transport fault matching this operation
    fn take_transport(&mut self, op: LedgerOp) -> Option<String> {
        let position = self.faults.iter().position(|fault| match fault {
            Fault::Transport(faulted) => *faulted == op,
            Fault::CandidateRead(_) | Fault::LostVoteAck => false,
        })?;
        self.faults.remove(position);
        Some(format!("injected transport fault on {:?}", op))
    }

    /// Consume a targeted candidate-read fault for this index, if queued
    fn take_candidate_fault(&mut self, index: u32) -> bool {
        let position = self
            .faults
            .iter()
            .position(|fault| matches!(fault, Fault::CandidateRead(faulted) if *faulted == index));
        match position {
            Some(position) => {
                self.faults.remove(position);
                true
            }
            None => false,
        }
    }

    /// Consume a queued lost-acknowledgement fault, if any
    fn take_lost_ack(&mut self) -> bool {
        let position = self
            .faults
            .iter()
            .position(|fault| matches!(fault, Fault::LostVoteAck));
        match position {
            Some(position) => {
                self.faults.remove(position);
                true
            }
            None => false,
        }
    }

    fn next_ref(&mut self, op: &str, payload: &str) -> SubmissionRef {
        self.sequence += 1;
        let mut hasher = Sha256::new();
        hasher.update(op.as_bytes());
        hasher.update(payload.as_bytes());
        hasher.update(self.sequence.to_be_bytes());
        SubmissionRef::new(format!("0x{}", hex::encode(hasher.finalize())))
    }
}

/// In-memory ledger implementation
/// Suitable for testing and demo purposes: one shared store, one handle per session
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    shared: Arc<Mutex<LedgerCore>>,
    caller: Identity,
}

impl MemoryLedger {
    /// Open a fresh ledger; the opener becomes the authorized administrator
    pub fn open(admin: impl Into<Identity>) -> Self {
        let admin = admin.into();
        MemoryLedger {
            shared: Arc::new(Mutex::new(LedgerCore::new(admin.clone()))),
            caller: admin,
        }
    }

    /// Another handle to the same store, bound to a different caller
    /// (models a second session or browser tab against the same ledger)
    pub fn bind(&self, caller: impl Into<Identity>) -> Self {
        MemoryLedger {
            shared: Arc::clone(&self.shared),
            caller: caller.into(),
        }
    }

    pub fn caller(&self) -> &Identity {
        &self.caller
    }

    /// Number of calls observed for one operation, across all handles
    pub fn calls(&self, op: LedgerOp) -> usize {
        self.shared
            .lock()
            .unwrap()
            .calls
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    /// Fail the next call of the given operation with a transport error
    pub fn fail_next(&self, op: LedgerOp) {
        self.shared
            .lock()
            .unwrap()
            .faults
            .push_back(Fault::Transport(op));
    }

    /// Fail the next read of the candidate at the given 1-based index
    pub fn fail_candidate_read(&self, index: u32) {
        self.shared
            .lock()
            .unwrap()
            .faults
            .push_back(Fault::CandidateRead(index));
    }

    /// Apply the next vote but drop its acknowledgement, as if the
    /// submission was broadcast and the reply was lost
    pub fn drop_ack_on_vote(&self) {
        self.shared.lock().unwrap().faults.push_back(Fault::LostVoteAck);
    }

    /// Delay every call by the given duration
    pub fn set_latency(&self, latency: Duration) {
        self.shared.lock().unwrap().latency = Some(latency);
    }

    /// Record the call and apply configured latency before touching state
    async fn begin(&self, op: LedgerOp) {
        let latency = {
            let mut core = self.shared.lock().unwrap();
            *core.calls.entry(op).or_insert(0) += 1;
            core.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn read_window(&self) -> LedgerResult<(Timestamp, Timestamp)> {
        self.begin(LedgerOp::ReadWindow).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::ReadWindow) {
            return Err(LedgerError::Transport(reason));
        }
        Ok(core.window)
    }

    async fn define_window(&self, start: Timestamp, end: Timestamp) -> LedgerResult<SubmissionRef> {
        self.begin(LedgerOp::DefineWindow).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::DefineWindow) {
            return Err(LedgerError::Transport(reason));
        }
        if self.caller != core.admin {
            return Err(LedgerError::Rejected(
                "caller is not the election administrator".to_string(),
            ));
        }
        if start <= 0 || end <= 0 || start >= end {
            return Err(LedgerError::Rejected(format!(
                "invalid window range: {}..{}",
                start, end
            )));
        }
        core.window = (start, end);
        Ok(core.next_ref("define_window", &format!("{}:{}", start, end)))
    }

    async fn count_candidates(&self) -> LedgerResult<u32> {
        self.begin(LedgerOp::CountCandidates).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::CountCandidates) {
            return Err(LedgerError::Transport(reason));
        }
        Ok(core.candidates.len() as u32)
    }

    async fn read_candidate(&self, index: u32) -> LedgerResult<Candidate> {
        self.begin(LedgerOp::ReadCandidate).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::ReadCandidate) {
            return Err(LedgerError::Transport(reason));
        }
        if core.take_candidate_fault(index) {
            return Err(LedgerError::Transport(format!(
                "injected transport fault reading candidate {}",
                index
            )));
        }
        if index == 0 || index as usize > core.candidates.len() {
            return Err(LedgerError::Rejected(format!(
                "candidate index {} out of range",
                index
            )));
        }
        Ok(core.candidates[(index - 1) as usize].clone())
    }

    async fn add_candidate(&self, name: &str, party: &str) -> LedgerResult<SubmissionRef> {
        self.begin(LedgerOp::AddCandidate).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::AddCandidate) {
            return Err(LedgerError::Transport(reason));
        }
        if self.caller != core.admin {
            return Err(LedgerError::Rejected(
                "caller is not the election administrator".to_string(),
            ));
        }
        let id = core.candidates.len() as CandidateId + 1;
        core.candidates.push(Candidate {
            id,
            name: name.to_string(),
            party: party.to_string(),
            vote_count: 0,
        });
        Ok(core.next_ref("add_candidate", &format!("{}:{}", name, party)))
    }

    async fn has_voted(&self, identity: &Identity) -> LedgerResult<bool> {
        self.begin(LedgerOp::HasVoted).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::HasVoted) {
            return Err(LedgerError::Transport(reason));
        }
        Ok(core.voters.contains(identity))
    }

    async fn cast_vote(&self, candidate_id: CandidateId) -> LedgerResult<SubmissionRef> {
        self.begin(LedgerOp::CastVote).await;
        let mut core = self.shared.lock().unwrap();
        if let Some(reason) = core.take_transport(LedgerOp::CastVote) {
            return Err(LedgerError::Transport(reason));
        }
        if !core.candidates.iter().any(|c| c.id == candidate_id) {
            return Err(LedgerError::Rejected(format!(
                "unknown candidate id {}",
                candidate_id
            )));
        }
        if core.voters.contains(&self.caller) {
            return Err(LedgerError::Rejected(
                "identity has already voted".to_string(),
            ));
        }
        let caller = self.caller.clone();
        core.voters.insert(caller);
        if let Some(candidate) = core.candidates.iter_mut().find(|c| c.id == candidate_id) {
            candidate.vote_count += 1;
        }
        let reference = core.next_ref("cast_vote", &candidate_id.to_string());
        if core.take_lost_ack() {
            return Err(LedgerError::Transport(
                "acknowledgement lost after broadcast".to_string(),
            ));
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_window_define_and_read() {
        let ledger = MemoryLedger::open("admin");

        assert_eq!(ledger.read_window().await.unwrap(), (0, 0));

        ledger.define_window(100, 200).await.unwrap();
        assert_eq!(ledger.read_window().await.unwrap(), (100, 200));
    }

    #[tokio::test]
    async fn test_define_window_rejects_invalid_range() {
        let ledger = MemoryLedger::open("admin");

        assert!(matches!(
            ledger.define_window(200, 100).await,
            Err(LedgerError::Rejected(_))
        ));
        assert!(matches!(
            ledger.define_window(0, 100).await,
            Err(LedgerError::Rejected(_))
        ));

        // A rejected define leaves the window unset
        assert_eq!(ledger.read_window().await.unwrap(), (0, 0));
    }

    #[tokio::test]
    async fn test_unauthorized_caller() {
        let admin = MemoryLedger::open("admin");
        let voter = admin.bind("voter");

        assert!(matches!(
            voter.define_window(100, 200).await,
            Err(LedgerError::Rejected(_))
        ));
        assert!(matches!(
            voter.add_candidate("Alice", "Blue").await,
            Err(LedgerError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_candidate_assignment_is_sequential() {
        let ledger = MemoryLedger::open("admin");

        ledger.add_candidate("Alice", "Blue").await.unwrap();
        ledger.add_candidate("Bob", "Red").await.unwrap();

        assert_eq!(ledger.count_candidates().await.unwrap(), 2);

        let first = ledger.read_candidate(1).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Alice");
        assert_eq!(first.vote_count, 0);

        let second = ledger.read_candidate(2).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.party, "Red");
    }

    #[tokio::test]
    async fn test_read_candidate_out_of_range() {
        let ledger = MemoryLedger::open("admin");
        ledger.add_candidate("Alice", "Blue").await.unwrap();

        assert!(matches!(
            ledger.read_candidate(0).await,
            Err(LedgerError::Rejected(_))
        ));
        assert!(matches!(
            ledger.read_candidate(2).await,
            Err(LedgerError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_one_vote_per_identity() {
        let admin = MemoryLedger::open("admin");
        admin.add_candidate("Alice", "Blue").await.unwrap();

        let voter = admin.bind("voter");
        voter.cast_vote(1).await.unwrap();
        assert!(voter.has_voted(&Identity::new("voter")).await.unwrap());

        assert!(matches!(
            voter.cast_vote(1).await,
            Err(LedgerError::Rejected(_))
        ));

        // The candidate tally reflects exactly one vote
        assert_eq!(admin.read_candidate(1).await.unwrap().vote_count, 1);
    }

    #[tokio::test]
    async fn test_submission_references_are_unique() {
        let ledger = MemoryLedger::open("admin");

        let first = ledger.add_candidate("Alice", "Blue").await.unwrap();
        let second = ledger.add_candidate("Alice", "Blue").await.unwrap();

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("0x"));
        assert_eq!(first.as_str().len(), 66);
    }

    #[tokio::test]
    async fn test_call_accounting() {
        let ledger = MemoryLedger::open("admin");

        ledger.read_window().await.unwrap();
        ledger.read_window().await.unwrap();
        ledger.count_candidates().await.unwrap();

        assert_eq!(ledger.calls(LedgerOp::ReadWindow), 2);
        assert_eq!(ledger.calls(LedgerOp::CountCandidates), 1);
        assert_eq!(ledger.calls(LedgerOp::CastVote), 0);
    }

    #[tokio::test]
    async fn test_transport_fault_is_one_shot() {
        let ledger = MemoryLedger::open("admin");
        ledger.fail_next(LedgerOp::ReadWindow);

        assert!(matches!(
            ledger.read_window().await,
            Err(LedgerError::Transport(_))
        ));
        assert!(ledger.read_window().await.is_ok());
    }

    #[tokio::test]
    async fn test_lost_ack_applies_the_vote() {
        let admin = MemoryLedger::open("admin");
        admin.add_candidate("Alice", "Blue").await.unwrap();

        let voter = admin.bind("voter");
        voter.drop_ack_on_vote();

        assert!(matches!(
            voter.cast_vote(1).await,
            Err(LedgerError::Transport(_))
        ));

        // The vote registered even though the acknowledgement was dropped
        assert!(voter.has_voted(&Identity::new("voter")).await.unwrap());
        assert_eq!(admin.read_candidate(1).await.unwrap().vote_count, 1);
    }
}
