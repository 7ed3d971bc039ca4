//! Mock permission provider for testing.

use crate::providers::AttendancePermissions;
use slotboard_core::{Result, SlotboardError, TopicId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    see_denied: HashSet<(UserId, TopicId)>,
    attend_denied: HashSet<(UserId, TopicId)>,
    editors: HashSet<(UserId, TopicId)>,
    fail_next_can_edit: bool,
}

/// Mock permission provider.
///
/// Defaults mirror an open forum: everyone may see and attend, nobody may
/// edit. Tests tighten it per `(user, topic)` pair.
#[derive(Debug, Clone, Default)]
pub struct MockPermissions {
    inner: Arc<Mutex<Inner>>,
}

impl MockPermissions {
    /// Create a provider with open defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny `can_see` for one pair.
    pub fn deny_see(&self, user_id: UserId, topic_id: TopicId) {
        self.inner.lock().unwrap().see_denied.insert((user_id, topic_id));
    }

    /// Deny `can_attend` for one pair.
    pub fn deny_attend(&self, user_id: UserId, topic_id: TopicId) {
        self.inner
            .lock()
            .unwrap()
            .attend_denied
            .insert((user_id, topic_id));
    }

    /// Grant `can_edit` for one pair.
    pub fn allow_edit(&self, user_id: UserId, topic_id: TopicId) {
        self.inner.lock().unwrap().editors.insert((user_id, topic_id));
    }

    /// Make the next `can_edit` call fail, simulating an unreachable host.
    pub fn fail_next_can_edit(&self) {
        self.inner.lock().unwrap().fail_next_can_edit = true;
    }
}

impl AttendancePermissions for MockPermissions {
    async fn can_see(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        Ok(!self
            .inner
            .lock()
            .unwrap()
            .see_denied
            .contains(&(user_id, topic_id)))
    }

    async fn can_attend(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        Ok(!self
            .inner
            .lock()
            .unwrap()
            .attend_denied
            .contains(&(user_id, topic_id)))
    }

    async fn can_edit(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_can_edit {
            inner.fail_next_can_edit = false;
            return Err(SlotboardError::internal("forum unreachable"));
        }
        Ok(inner.editors.contains(&(user_id, topic_id)))
    }
}
