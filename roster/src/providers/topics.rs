//! Topic repository trait.

use slotboard_core::{Result, Topic, TopicId};
use std::future::Future;

/// Read-only access to the host forum's topics.
///
/// Topics are owned by the host platform; this service never writes them.
/// Implementations should treat "topic hidden from everyone" the same as
/// "topic absent" and return `Ok(None)`.
pub trait TopicRepository: Send + Sync {
    /// Fetch a topic by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(topic))`: the topic resolves
    /// - `Ok(None)`: no such topic
    ///
    /// # Errors
    ///
    /// Returns an error if the host platform cannot be reached; callers
    /// surface this as an internal failure, never as "not found".
    fn topic(&self, topic_id: TopicId) -> impl Future<Output = Result<Option<Topic>>> + Send;
}
