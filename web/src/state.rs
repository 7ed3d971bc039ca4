//! Application state shared with all handlers.

use slotboard_roster::{
    AccessGate, AttendancePermissions, GateConfig, MatchStore, ReservationManager,
    ShareTokenStore, SlotAssignmentEngine, TopicRepository,
};
use std::sync::Arc;

/// Shared application state.
///
/// Generic over the host-platform providers, like every handler: tests
/// inject mocks, the binary injects the forum HTTP client.
#[derive(Clone)]
pub struct AppState<T, P> {
    /// The access-control gate.
    pub gate: Arc<AccessGate<T, P>>,
    /// The owning store of match documents.
    pub matches: Arc<MatchStore>,
    /// Atomic slot claim/release.
    pub engine: SlotAssignmentEngine,
    /// Reservation management.
    pub reservations: ReservationManager,
    /// Share-token issue and validation.
    pub share_tokens: Arc<ShareTokenStore>,
}

impl<T, P> AppState<T, P>
where
    T: TopicRepository,
    P: AttendancePermissions,
{
    /// Wire up stores, engine, and gate from config and providers.
    #[must_use]
    pub fn new(config: GateConfig, topics: T, permissions: P) -> Self {
        let matches = Arc::new(MatchStore::new());
        let share_tokens = Arc::new(ShareTokenStore::new());
        let gate = Arc::new(AccessGate::new(
            config,
            topics,
            permissions,
            share_tokens.clone(),
        ));

        Self {
            gate,
            engine: SlotAssignmentEngine::new(matches.clone()),
            reservations: ReservationManager::new(matches.clone()),
            matches,
            share_tokens,
        }
    }
}
