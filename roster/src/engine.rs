//! Atomic claim, release, and inspection of slots.

use crate::store::MatchStore;
use slotboard_core::{MatchId, Result, Slot, SlotId, SlotboardError, TopicId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The slot assignment engine.
///
/// Claim and release are check-and-set operations executed under the match
/// store's per-match write guard: of two concurrent claims on the same
/// empty slot exactly one succeeds and the other observes `Conflict`; a
/// claim racing a release on the same slot sees one consistent order.
///
/// The `privileged` flag on [`claim`](Self::claim) and
/// [`release`](Self::release) is the admin/owner (or share-token) bypass:
/// privileged callers may claim slots reserved for someone else and may
/// release any occupant ("kick from slot").
#[derive(Debug, Clone)]
pub struct SlotAssignmentEngine {
    matches: Arc<MatchStore>,
}

impl SlotAssignmentEngine {
    /// Create an engine over the given store.
    #[must_use]
    pub fn new(matches: Arc<MatchStore>) -> Self {
        Self { matches }
    }

    /// Put `user_id` into a slot.
    ///
    /// Succeeds only if the slot exists and is unoccupied. A slot reserved
    /// for a different user rejects the claim with `Conflict` unless the
    /// caller is privileged. A successful claim clears the slot's
    /// reservation: the user fulfilled their own, or a privileged caller
    /// deliberately overrode someone else's.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot; `Conflict` when the slot is
    /// occupied or reserved for another user.
    pub fn claim(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        slot_id: &SlotId,
        user_id: UserId,
        privileged: bool,
    ) -> Result<()> {
        self.matches.update(topic_id, match_id, |m| {
            let slot = m
                .slot_mut(slot_id)
                .ok_or_else(|| missing_slot(slot_id))?;

            if slot.occupant.is_some() {
                return Err(SlotboardError::conflict(format!(
                    "slot {slot_id} is already taken"
                )));
            }
            if let Some(reserved) = slot.reserved_for {
                if reserved != user_id && !privileged {
                    return Err(SlotboardError::conflict(format!(
                        "slot {slot_id} is reserved for another user"
                    )));
                }
            }

            slot.occupant = Some(user_id);
            slot.reserved_for = None;
            Ok(())
        })??;

        tracing::info!(%topic_id, %match_id, %slot_id, %user_id, privileged, "slot claimed");
        Ok(())
    }

    /// Clear a slot's occupant.
    ///
    /// Succeeds if `acting` is the current occupant, or if the caller is
    /// privileged. A privileged release of an already-empty slot is a
    /// no-op success (an idempotent kick).
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot, or when a non-privileged
    /// caller releases a slot that is no longer occupied; `Forbidden` when
    /// the occupant is someone else.
    pub fn release(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        slot_id: &SlotId,
        acting: Option<UserId>,
        privileged: bool,
    ) -> Result<()> {
        self.matches.update(topic_id, match_id, |m| {
            let slot = m
                .slot_mut(slot_id)
                .ok_or_else(|| missing_slot(slot_id))?;

            match slot.occupant {
                None if privileged => Ok(()),
                None => Err(SlotboardError::not_found(format!(
                    "slot {slot_id} is not occupied"
                ))),
                Some(occupant) if privileged || acting == Some(occupant) => {
                    slot.occupant = None;
                    Ok(())
                }
                Some(_) => Err(SlotboardError::forbidden(
                    "only the occupant may release this slot",
                )),
            }
        })??;

        tracing::info!(%topic_id, %match_id, %slot_id, ?acting, privileged, "slot released");
        Ok(())
    }

    /// The occupant of one slot, if any.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match or slot.
    pub fn occupant(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        slot_id: &SlotId,
    ) -> Result<Option<UserId>> {
        let found = self.matches.get(topic_id, match_id)?;
        found
            .slot(slot_id)
            .map(|slot| slot.occupant)
            .ok_or_else(|| missing_slot(slot_id))
    }

    /// All slots of a match, flattened in document order.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing match.
    pub fn slots(&self, topic_id: TopicId, match_id: MatchId) -> Result<Vec<Slot>> {
        let found = self.matches.get(topic_id, match_id)?;
        Ok(found.slots().into_iter().cloned().collect())
    }

    /// Every user occupying any slot of any match of the topic, sorted
    /// and deduplicated. Served from latest committed state; stale reads
    /// are acceptable for display.
    #[must_use]
    pub fn list_occupant_user_ids(&self, topic_id: TopicId) -> Vec<UserId> {
        let mut users = BTreeSet::new();
        for m in self.matches.list(topic_id) {
            users.extend(m.occupant_user_ids());
        }
        users.into_iter().collect()
    }
}

fn missing_slot(slot_id: &SlotId) -> SlotboardError {
    SlotboardError::not_found(format!("slot {slot_id} not found"))
}
