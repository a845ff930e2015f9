use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_EVENT_CAPACITY;

/// Configuration for the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Buffer size of the event channel handed to subscribers
    pub event_capacity: usize,

    /// Re-read ledger state after every accepted submission
    pub refresh_after_submit: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            refresh_after_submit: true,
        }
    }
}
