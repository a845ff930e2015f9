use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use ballotline_ledger::LedgerClient;
use ballotline_types::{
    CandidateId, Identity, LedgerError, RegistrySnapshot, RejectReason, SubmissionOutcome,
    Timestamp,
};
use tracing::{info, warn};

use crate::registry::validate_candidate_fields;
use crate::window::validate_window_bounds;

/// The three mutating operation kinds, gated independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    DefineWindow,
    AddCandidate,
    CastVote,
}

/// Mutual exclusion per (identity, operation class)
///
/// A second attempt for the same key while one is outstanding is refused
/// locally instead of being dispatched to the ledger twice. Different
/// identities, and different operation classes for one identity, proceed
/// concurrently.
#[derive(Debug, Default)]
struct SubmissionGate {
    in_flight: Mutex<HashSet<(Identity, OperationClass)>>,
}

impl SubmissionGate {
    /// Try to mark this key as submitting; `None` if already in flight
    fn try_acquire(&self, identity: &Identity, class: OperationClass) -> Option<GateGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap();
        let key = (identity.clone(), class);
        if !in_flight.insert(key.clone()) {
            return None;
        }
        Some(GateGuard { gate: self, key })
    }

    fn is_held(&self, identity: &Identity, class: OperationClass) -> bool {
        self.in_flight
            .lock()
            .unwrap()
            .contains(&(identity.clone(), class))
    }
}

/// Releases the gate entry once the submission runs to completion
struct GateGuard<'a> {
    gate: &'a SubmissionGate,
    key: (Identity, OperationClass),
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.lock().unwrap().remove(&self.key);
    }
}

/// Validates, gates, submits, and reconciles mutating operations
pub struct SubmissionOrchestrator {
    client: Arc<dyn LedgerClient>,
    gate: SubmissionGate,
}

impl SubmissionOrchestrator {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        SubmissionOrchestrator {
            client,
            gate: SubmissionGate::default(),
        }
    }

    /// Whether a submission of this class is currently outstanding
    pub fn is_submitting(&self, identity: &Identity, class: OperationClass) -> bool {
        self.gate.is_held(identity, class)
    }

    /// Define the voting window
    pub async fn define_window(
        &self,
        identity: &Identity,
        start: Timestamp,
        end: Timestamp,
    ) -> SubmissionOutcome {
        let _guard = match self.gate.try_acquire(identity, OperationClass::DefineWindow) {
            Some(guard) => guard,
            None => return SubmissionOutcome::Rejected(RejectReason::InFlight),
        };
        if let Err(reason) = validate_window_bounds(start, end) {
            return SubmissionOutcome::Rejected(reason);
        }

        info!(%identity, start, end, "defining voting window");
        match self.client.define_window(start, end).await {
            Ok(reference) => SubmissionOutcome::Success(Some(reference)),
            Err(LedgerError::Rejected(reason)) => {
                SubmissionOutcome::Rejected(RejectReason::Ledger(reason))
            }
            Err(LedgerError::Transport(reason)) => SubmissionOutcome::Indeterminate(reason),
        }
    }

    /// Register a candidate
    pub async fn add_candidate(
        &self,
        identity: &Identity,
        name: &str,
        party: &str,
    ) -> SubmissionOutcome {
        let _guard = match self.gate.try_acquire(identity, OperationClass::AddCandidate) {
            Some(guard) => guard,
            None => return SubmissionOutcome::Rejected(RejectReason::InFlight),
        };
        let (name, party) = match validate_candidate_fields(name, party) {
            Ok(fields) => fields,
            Err(reason) => return SubmissionOutcome::Rejected(reason),
        };

        info!(%identity, name, party, "registering candidate");
        match self.client.add_candidate(name, party).await {
            Ok(reference) => SubmissionOutcome::Success(Some(reference)),
            Err(LedgerError::Rejected(reason)) => {
                SubmissionOutcome::Rejected(RejectReason::Ledger(reason))
            }
            Err(LedgerError::Transport(reason)) => SubmissionOutcome::Indeterminate(reason),
        }
    }

    /// Cast a vote, reconciling an errored call against ledger truth
    ///
    /// The candidate must be present in the roster the caller passed in
    /// (its most recent registry snapshot); anything else is refused before
    /// the network is touched.
    pub async fn cast_vote(
        &self,
        identity: &Identity,
        candidate_id: CandidateId,
        roster: &RegistrySnapshot,
    ) -> SubmissionOutcome {
        let _guard = match self.gate.try_acquire(identity, OperationClass::CastVote) {
            Some(guard) => guard,
            None => return SubmissionOutcome::Rejected(RejectReason::InFlight),
        };
        if !roster.contains(candidate_id) {
            return SubmissionOutcome::Rejected(RejectReason::UnknownCandidate(candidate_id));
        }

        // Fresh baseline immediately before dispatch. Advisory only: the
        // attempt goes out regardless, the ledger holds the real invariant.
        let voted_before = match self.client.has_voted(identity).await {
            Ok(flag) => Some(flag),
            Err(error) => {
                warn!(%identity, %error, "baseline vote-status read failed");
                None
            }
        };

        info!(%identity, candidate_id, "casting vote");
        let error = match self.client.cast_vote(candidate_id).await {
            Ok(reference) => return SubmissionOutcome::Success(Some(reference)),
            Err(error) => error,
        };

        // The error alone does not prove the vote failed to register.
        // Re-read ledger truth: a false-to-true flip across the attempt
        // means the vote landed and only the acknowledgement was lost.
        match self.client.has_voted(identity).await {
            Ok(true) if voted_before == Some(false) => {
                info!(%identity, candidate_id, "vote registered despite failed acknowledgement");
                SubmissionOutcome::Success(None)
            }
            Ok(_) => match error {
                LedgerError::Rejected(reason) => {
                    SubmissionOutcome::Rejected(RejectReason::Ledger(reason))
                }
                LedgerError::Transport(reason) => SubmissionOutcome::Indeterminate(reason),
            },
            Err(recheck_error) => {
                warn!(%identity, error = %recheck_error, "vote-status re-check failed");
                SubmissionOutcome::Indeterminate(error.to_string())
            }
        }
    }
}
