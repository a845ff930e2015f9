use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ballotline_types::{CandidateId, RegistrySnapshot, SubmissionOutcome, Timestamp};
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::config::CoordinatorConfig;
use crate::events::{CoordinatorEvent, EventBus};
use crate::registry::CandidateRegistry;
use crate::session::Session;
use crate::state::ElectionSnapshot;
use crate::status::VoteStatusTracker;
use crate::submission::{OperationClass, SubmissionOrchestrator};
use crate::window::WindowTracker;

/// Composes window, roster, and vote status into one coherent view-model
/// and mediates every mutation against the ledger
///
/// The coordinator owns the current composite snapshot exclusively; it is
/// replaced atomically after each refresh and never patched in place.
pub struct ElectionStateCoordinator {
    session: Session,
    window: WindowTracker,
    registry: CandidateRegistry,
    status: VoteStatusTracker,
    orchestrator: SubmissionOrchestrator,
    snapshot: Mutex<ElectionSnapshot>,
    stale: AtomicBool,
    events: EventBus,
    config: CoordinatorConfig,
}

impl ElectionStateCoordinator {
    /// Create a coordinator with the default configuration
    pub fn new(session: Session) -> Self {
        Self::with_config(session, CoordinatorConfig::default())
    }

    pub fn with_config(session: Session, config: CoordinatorConfig) -> Self {
        let client = Arc::clone(session.client());
        ElectionStateCoordinator {
            window: WindowTracker::new(Arc::clone(&client)),
            registry: CandidateRegistry::new(Arc::clone(&client)),
            status: VoteStatusTracker::new(Arc::clone(&client)),
            orchestrator: SubmissionOrchestrator::new(client),
            snapshot: Mutex::new(ElectionSnapshot::empty()),
            stale: AtomicBool::new(false),
            events: EventBus::new(config.event_capacity),
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The most recent composite snapshot
    pub fn snapshot(&self) -> ElectionSnapshot {
        self.snapshot.lock().unwrap().clone()
    }

    /// Whether a submission of this class is outstanding for the session identity
    pub fn in_flight(&self, class: OperationClass) -> bool {
        self.orchestrator
            .is_submitting(self.session.identity(), class)
    }

    /// Subscribe to refresh and submission notifications
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    /// Re-read window, roster, and vote status jointly and replace the
    /// composite atomically
    ///
    /// The three reads run concurrently and are joined before anything is
    /// published, so consumers never observe a partially updated composite.
    /// A failed read degrades its own field to `None` instead of failing
    /// the refresh.
    pub async fn refresh(&self) -> ElectionSnapshot {
        debug!(identity = %self.session.identity(), "refreshing election state");
        let (window, candidates, voted) = tokio::join!(
            self.window.resolve(),
            self.registry.fetch_all(),
            self.status.has_voted(self.session.identity()),
        );

        let snapshot = ElectionSnapshot {
            window: match window {
                Ok(window) => Some(window),
                Err(error) => {
                    warn!(%error, "window read degraded");
                    None
                }
            },
            candidates: match candidates {
                Ok(candidates) => Some(candidates),
                Err(error) => {
                    warn!(%error, "candidate roster read degraded");
                    None
                }
            },
            voted: match voted {
                Ok(voted) => Some(voted),
                Err(error) => {
                    warn!(%error, "vote status read degraded");
                    None
                }
            },
            refreshed_at: Some(Utc::now()),
        };

        *self.snapshot.lock().unwrap() = snapshot.clone();
        self.stale.store(false, Ordering::SeqCst);
        self.events
            .publish(CoordinatorEvent::Refreshed(snapshot.clone()));
        snapshot
    }

    /// Define the voting window on the ledger
    pub async fn define_window(&self, start: Timestamp, end: Timestamp) -> SubmissionOutcome {
        self.ensure_fresh().await;
        let outcome = self
            .orchestrator
            .define_window(self.session.identity(), start, end)
            .await;
        if outcome.is_success() {
            self.events
                .publish(CoordinatorEvent::WindowDefined { start, end });
        }
        self.settle(&outcome).await;
        outcome
    }

    /// Register a candidate on the ledger
    pub async fn add_candidate(&self, name: &str, party: &str) -> SubmissionOutcome {
        self.ensure_fresh().await;
        let outcome = self
            .orchestrator
            .add_candidate(self.session.identity(), name, party)
            .await;
        if outcome.is_success() {
            self.events.publish(CoordinatorEvent::CandidateAdded {
                name: name.trim().to_string(),
                party: party.trim().to_string(),
            });
        }
        self.settle(&outcome).await;
        outcome
    }

    /// Cast the session identity's vote
    ///
    /// The candidate must be present in the most recent registry snapshot;
    /// the assigned id is never assumed client-side.
    pub async fn cast_vote(&self, candidate_id: CandidateId) -> SubmissionOutcome {
        self.ensure_fresh().await;
        let roster = self.current_roster();
        let outcome = self
            .orchestrator
            .cast_vote(self.session.identity(), candidate_id, &roster)
            .await;
        if outcome.is_success() {
            self.events
                .publish(CoordinatorEvent::VoteCast { candidate_id });
        }
        self.settle(&outcome).await;
        outcome
    }

    fn current_roster(&self) -> RegistrySnapshot {
        self.snapshot
            .lock()
            .unwrap()
            .candidates
            .clone()
            .unwrap_or_default()
    }

    /// Local knowledge is stale after an indeterminate outcome; re-read
    /// ledger truth before dispatching anything new
    async fn ensure_fresh(&self) {
        if self.stale.swap(false, Ordering::SeqCst) {
            self.refresh().await;
        }
    }

    async fn settle(&self, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Success(_) => {
                if self.config.refresh_after_submit {
                    self.refresh().await;
                }
            }
            SubmissionOutcome::Indeterminate(_) => {
                self.stale.store(true, Ordering::SeqCst);
            }
            SubmissionOutcome::Rejected(_) => {}
        }
    }
}
