//! Notification sink trait.

use serde::{Deserialize, Serialize};
use slotboard_core::{Result, TopicId, UserId};
use std::future::Future;

/// A notification that a user was removed from a topic's slots.
///
/// Emitted at most once per auto-unslot batch, carrying the number of
/// slots the user was removed from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnslotNotice {
    /// Topic the user was unslotted from.
    pub topic_id: TopicId,
    /// The removed user.
    pub user_id: UserId,
    /// How many slots were freed.
    pub removed_count: usize,
}

/// Delivery of unslot notices to the host platform.
pub trait NotificationSink: Send + Sync {
    /// Deliver one unslot notice.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the auto-unslot service
    /// propagates it to its caller without retrying.
    fn notify_unslotted(&self, notice: UnslotNotice) -> impl Future<Output = Result<()>> + Send;
}
