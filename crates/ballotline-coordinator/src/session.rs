use std::sync::Arc;

use ballotline_ledger::LedgerClient;
use ballotline_types::Identity;

use crate::error::{CoordinatorError, Result};

/// One caller's connection to the ledger: identity plus client handle
///
/// Replaces process-wide "current account" and "current instance" state
/// with an explicit value handed to the coordinator at construction.
#[derive(Clone)]
pub struct Session {
    identity: Identity,
    client: Arc<dyn LedgerClient>,
}

impl Session {
    /// Establish a session; this is the single initialization failure path
    pub fn new(identity: impl Into<Identity>, client: Arc<dyn LedgerClient>) -> Result<Self> {
        let identity = identity.into();
        if identity.is_empty() {
            return Err(CoordinatorError::InvalidIdentity);
        }
        Ok(Session { identity, client })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn client(&self) -> &Arc<dyn LedgerClient> {
        &self.client
    }
}
