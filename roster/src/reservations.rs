//! Pre-assignment of slots to specific users.

use crate::store::MatchStore;
use slotboard_core::{MatchId, Result, SlotId, SlotboardError, TopicId, UserId};
use std::sync::Arc;

/// Manages reservations: admin-set intent binding a slot to a user before
/// it is claimed.
///
/// A reservation does not hide the slot from anyone; it only makes the
/// claim path reject other, non-privileged users (see
/// [`crate::engine::SlotAssignmentEngine::claim`]). Restricted to
/// admin/owner callers by the surrounding gate, not by this component.
#[derive(Debug, Clone)]
pub struct ReservationManager {
    matches: Arc<MatchStore>,
}

impl ReservationManager {
    /// Create a manager over the given store.
    #[must_use]
    pub fn new(matches: Arc<MatchStore>) -> Self {
        Self { matches }
    }

    /// Reserve a slot for `for_user`.
    ///
    /// Re-reserving an already-reserved slot overwrites the previous
    /// reservation; the gate has already established the caller is
    /// privileged.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot; `Conflict` if the slot is
    /// already occupied.
    pub fn reserve(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        slot_id: &SlotId,
        for_user: UserId,
    ) -> Result<()> {
        self.matches.update(topic_id, match_id, |m| {
            let slot = m
                .slot_mut(slot_id)
                .ok_or_else(|| missing_slot(slot_id))?;
            if slot.occupant.is_some() {
                return Err(SlotboardError::conflict(format!(
                    "slot {slot_id} is already occupied"
                )));
            }
            slot.reserved_for = Some(for_user);
            Ok(())
        })??;

        tracing::info!(%topic_id, %match_id, %slot_id, %for_user, "slot reserved");
        Ok(())
    }

    /// Clear a slot's reservation. Clearing an unreserved slot succeeds.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot.
    pub fn unreserve(&self, topic_id: TopicId, match_id: MatchId, slot_id: &SlotId) -> Result<()> {
        self.matches.update(topic_id, match_id, |m| {
            let slot = m
                .slot_mut(slot_id)
                .ok_or_else(|| missing_slot(slot_id))?;
            slot.reserved_for = None;
            Ok(())
        })??;

        tracing::info!(%topic_id, %match_id, %slot_id, "reservation cleared");
        Ok(())
    }

    /// The user a slot is reserved for, if any.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot.
    pub fn reservation(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        slot_id: &SlotId,
    ) -> Result<Option<UserId>> {
        let found = self.matches.get(topic_id, match_id)?;
        found
            .slot(slot_id)
            .map(|slot| slot.reserved_for)
            .ok_or_else(|| missing_slot(slot_id))
    }
}

fn missing_slot(slot_id: &SlotId) -> SlotboardError {
    SlotboardError::not_found(format!("slot {slot_id} not found"))
}
