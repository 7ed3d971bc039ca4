//! Automatic unslotting on attendance changes.

use crate::providers::{NotificationSink, UnslotNotice};
use crate::store::MatchStore;
use serde::Serialize;
use slotboard_core::{AttendanceChange, MatchId, Result, SlotId, TopicId, UserId};
use std::sync::Arc;

/// One slot a user was removed from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotRemoval {
    /// Match the slot belongs to.
    pub match_id: MatchId,
    /// The freed slot.
    pub slot_id: SlotId,
}

/// The observable result of one attendance-change handling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UnslotOutcome {
    /// Every slot the user was removed from, across all matches.
    pub removals: Vec<SlotRemoval>,
    /// Whether a notification was emitted (exactly once, iff any removal
    /// happened).
    pub notified: bool,
}

impl UnslotOutcome {
    /// Number of slots freed.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removals.len()
    }
}

/// Reacts to attendance-change signals from the host platform.
///
/// Invoked out-of-band, not via HTTP. Removal is best-effort per match:
/// removals already committed are never rolled back, and a failure
/// surfaces as a single error to the caller.
pub struct AutoUnslotService<N> {
    matches: Arc<MatchStore>,
    sink: N,
}

impl<N: NotificationSink> AutoUnslotService<N> {
    /// Create a service over the given store and notification sink.
    pub const fn new(matches: Arc<MatchStore>, sink: N) -> Self {
        Self { matches, sink }
    }

    /// Handle one attendance change.
    ///
    /// A probability at or above `1.0` means the user is certain to attend:
    /// nothing is unslotted and the operation succeeds trivially. Otherwise
    /// the user is removed from every slot they occupy across every match
    /// of the topic (privileged release, bypassing ownership), and exactly
    /// one notification carrying the removal count is emitted iff anything
    /// was removed.
    ///
    /// # Errors
    ///
    /// Propagates a notification-delivery failure; the removals already
    /// performed stay in place.
    pub async fn handle(&self, change: &AttendanceChange) -> Result<UnslotOutcome> {
        if change.probability >= 1.0 {
            return Ok(UnslotOutcome::default());
        }

        let removals = self.remove_everywhere(change.topic_id, change.user_id);
        if removals.is_empty() {
            return Ok(UnslotOutcome {
                removals,
                notified: false,
            });
        }

        tracing::info!(
            topic_id = %change.topic_id,
            user_id = %change.user_id,
            removed = removals.len(),
            probability = change.probability,
            "user auto-unslotted"
        );

        self.sink
            .notify_unslotted(UnslotNotice {
                topic_id: change.topic_id,
                user_id: change.user_id,
                removed_count: removals.len(),
            })
            .await?;

        Ok(UnslotOutcome {
            removals,
            notified: true,
        })
    }

    fn remove_everywhere(&self, topic_id: TopicId, user_id: UserId) -> Vec<SlotRemoval> {
        let mut removals = Vec::new();
        for match_id in self.matches.match_ids(topic_id) {
            // A match deleted between listing and update is simply gone;
            // there is nothing left to unslot there.
            let Ok(freed) = self
                .matches
                .update(topic_id, match_id, |m| m.release_user(user_id))
            else {
                continue;
            };
            removals.extend(freed.into_iter().map(|slot_id| SlotRemoval {
                match_id,
                slot_id,
            }));
        }
        removals
    }
}
