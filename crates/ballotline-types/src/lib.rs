mod identity;
mod candidate;
mod window;
mod registry;
mod outcome;
mod error;

pub use identity::Identity;
pub use candidate::{Candidate, CandidateId};
pub use window::{ElectionWindow, Timestamp};
pub use registry::RegistrySnapshot;
pub use outcome::{RejectReason, SubmissionOutcome, SubmissionRef};
pub use error::{LedgerError, LedgerResult};

#[cfg(test)]
mod tests;
