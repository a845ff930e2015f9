use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds; the ledger stores zero for an unset field
pub type Timestamp = i64;

/// The voting time window as recorded on the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionWindow {
    /// The ledger has not set a window yet (both fields zero)
    Undefined,
    /// Window bounds as read from the ledger; invariant: start < end
    Defined { start: Timestamp, end: Timestamp },
}

impl ElectionWindow {
    /// Classify a raw ledger read: undefined iff both fields are zero
    pub fn from_ledger(start: Timestamp, end: Timestamp) -> Self {
        if start == 0 && end == 0 {
            ElectionWindow::Undefined
        } else {
            ElectionWindow::Defined { start, end }
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ElectionWindow::Defined { .. })
    }

    /// Window bounds, if defined
    pub fn bounds(&self) -> Option<(Timestamp, Timestamp)> {
        match self {
            ElectionWindow::Undefined => None,
            ElectionWindow::Defined { start, end } => Some((*start, *end)),
        }
    }
}
