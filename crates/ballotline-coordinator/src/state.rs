use ballotline_types::{ElectionWindow, RegistrySnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The composite view of election state as of one refresh cycle
///
/// Replaced atomically as a whole, never patched field-by-field. A `None`
/// field means that read degraded during the last refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub window: Option<ElectionWindow>,
    pub candidates: Option<RegistrySnapshot>,
    pub voted: Option<bool>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl ElectionSnapshot {
    /// The snapshot before any refresh has completed
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when every component read succeeded in the last refresh
    pub fn is_complete(&self) -> bool {
        self.window.is_some() && self.candidates.is_some() && self.voted.is_some()
    }
}
