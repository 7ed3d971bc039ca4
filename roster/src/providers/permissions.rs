//! Attendance permission trait.

use slotboard_core::{Result, TopicId, UserId};
use std::future::Future;

/// The host forum's permission decisions about a user and a topic.
///
/// All three questions are answered by the host's own group/privilege
/// subsystem; this service only composes them into gate chains. User id
/// `0` denotes a guest and must be answerable like any other user.
pub trait AttendancePermissions: Send + Sync {
    /// May the user see the topic's attendance (the slot lists)?
    ///
    /// # Errors
    ///
    /// Returns an error if the host platform cannot be reached.
    fn can_see(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// May the user slot into the topic's matches?
    ///
    /// # Errors
    ///
    /// Returns an error if the host platform cannot be reached.
    fn can_attend(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// May the user edit the topic (forum admin or topic owner)?
    ///
    /// # Errors
    ///
    /// Returns an error if the host platform cannot be reached.
    fn can_edit(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> impl Future<Output = Result<bool>> + Send;
}
