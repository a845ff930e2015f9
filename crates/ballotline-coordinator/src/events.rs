use ballotline_types::{CandidateId, Timestamp};
use tokio::sync::broadcast;

use crate::state::ElectionSnapshot;

/// Default buffer size for the event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Notifications for the presentation layer, so it can re-render without polling
/// Fired on every completed refresh and every accepted submission
#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    /// A refresh completed and the composite snapshot was replaced
    Refreshed(ElectionSnapshot),

    /// The voting window was defined on the ledger
    WindowDefined { start: Timestamp, end: Timestamp },

    /// A candidate was registered on the ledger
    CandidateAdded { name: String, party: String },

    /// The session identity's vote was accepted
    VoteCast { candidate_id: CandidateId },
}

/// Broadcast surface for coordinator events
#[derive(Debug)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<CoordinatorEvent>,
}

impl EventBus {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        EventBus { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.sender.subscribe()
    }

    /// Deliver to current subscribers; an absent or lagging subscriber is not an error
    pub(crate) fn publish(&self, event: CoordinatorEvent) {
        let _ = self.sender.send(event);
    }
}
