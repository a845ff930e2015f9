use thiserror::Error;

/// Failure of one remote ledger call
///
/// `Rejected` means the ledger observed the call and declined it; the
/// outcome is definitive. `Transport` means the call failed before a
/// definitive on-ledger outcome could be observed, so the operation may or
/// may not have registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("ledger rejected the call: {0}")]
    Rejected(String),

    #[error("transport failed before an outcome was observed: {0}")]
    Transport(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
