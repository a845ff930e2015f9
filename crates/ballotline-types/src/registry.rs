use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateId};

/// Immutable ordered roster of candidates as of one fetch cycle
/// Superseded wholesale by the next successful fetch, never patched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    candidates: Vec<Candidate>,
}

impl RegistrySnapshot {
    /// Create an empty snapshot
    pub fn empty() -> Self {
        RegistrySnapshot {
            candidates: Vec::new(),
        }
    }

    /// Assemble a snapshot from fetched records, ordered ascending by id
    pub fn from_records(mut records: Vec<Candidate>) -> Self {
        records.sort_by_key(|c| c.id);
        RegistrySnapshot {
            candidates: records,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Look up a candidate by its ledger-assigned id
    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Check whether an id is present in this snapshot
    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_some()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}
