use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoordinatorError>;

/// Errors surfaced by the coordinator's read paths and session setup
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("ledger error: {0}")]
    Ledger(#[from] ballotline_types::LedgerError),

    #[error("session identity must not be empty")]
    InvalidIdentity,
}
