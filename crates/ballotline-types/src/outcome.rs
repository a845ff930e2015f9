use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::candidate::CandidateId;

/// Reference to a submission the ledger acknowledged (e.g. a transaction hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionRef(String);

impl SubmissionRef {
    pub fn new(reference: impl Into<String>) -> Self {
        SubmissionRef(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated display form (first 10 characters)
    pub fn short(&self) -> &str {
        let cut = self
            .0
            .char_indices()
            .nth(10)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..cut]
    }
}

impl fmt::Display for SubmissionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubmissionRef {
    fn from(s: String) -> Self {
        SubmissionRef(s)
    }
}

/// Why a submission attempt was refused
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("window bounds are invalid: start must be positive and precede end")]
    InvalidRange,

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("candidate {0} is not in the current registry")]
    UnknownCandidate(CandidateId),

    #[error("a submission of this kind is already in flight for this identity")]
    InFlight,

    #[error("ledger rejected the submission: {0}")]
    Ledger(String),
}

/// Outcome of one mutating submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// The ledger accepted the submission. The reference is absent when
    /// success was established by read-back reconciliation instead of an
    /// observed acknowledgement.
    Success(Option<SubmissionRef>),

    /// Refused locally or declined by the ledger; terminal for this attempt
    Rejected(RejectReason),

    /// The call failed before a definitive on-ledger outcome was observed
    Indeterminate(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmissionOutcome::Rejected(_))
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, SubmissionOutcome::Indeterminate(_))
    }

    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            SubmissionOutcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
