//! Mock topic repository for testing.

use crate::providers::TopicRepository;
use slotboard_core::{Result, Topic, TopicId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock topic repository.
///
/// Seed it with topics; everything else resolves to "not found".
#[derive(Debug, Clone, Default)]
pub struct MockTopicRepository {
    topics: Arc<Mutex<HashMap<TopicId, Topic>>>,
}

impl MockTopicRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a topic.
    pub fn insert(&self, topic: Topic) {
        self.topics.lock().unwrap().insert(topic.id, topic);
    }

    /// Remove a topic.
    pub fn remove(&self, topic_id: TopicId) {
        self.topics.lock().unwrap().remove(&topic_id);
    }
}

impl TopicRepository for MockTopicRepository {
    async fn topic(&self, topic_id: TopicId) -> Result<Option<Topic>> {
        Ok(self.topics.lock().unwrap().get(&topic_id).cloned())
    }
}
