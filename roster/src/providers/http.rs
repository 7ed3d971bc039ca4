//! HTTP-backed host-platform providers.
//!
//! [`ForumHttpClient`] implements every provider trait against the host
//! forum's internal REST surface. It is the production wiring; tests use
//! the in-memory mocks instead.
//!
//! # Expected forum surface
//!
//! ```text
//! GET  {base}/topics/:tid                     -> 200 Topic JSON | 404
//! GET  {base}/permissions/:uid/:tid           -> 200 {"can_see", "can_attend", "can_edit"}
//! POST {base}/notifications/unslotted         <- UnslotNotice JSON
//! ```

use crate::providers::{
    AttendancePermissions, NotificationSink, TopicRepository, UnslotNotice,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use slotboard_core::{Result, SlotboardError, Topic, TopicId, UserId};
use std::time::Duration;

/// Permission answers for one `(user, topic)` pair.
#[derive(Debug, Deserialize)]
struct PermissionAnswers {
    can_see: bool,
    can_attend: bool,
    can_edit: bool,
}

/// Reqwest-backed client for the host forum's internal API.
#[derive(Clone, Debug)]
pub struct ForumHttpClient {
    /// Base URL of the forum's internal API, without trailing slash.
    base_url: String,

    /// HTTP client for making requests.
    http_client: Client,
}

impl ForumHttpClient {
    /// Create a new client for the forum at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SlotboardError::internal(format!("http client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    async fn permissions(&self, user_id: UserId, topic_id: TopicId) -> Result<PermissionAnswers> {
        let url = format!("{}/permissions/{user_id}/{topic_id}", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SlotboardError::internal(format!("forum unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(SlotboardError::internal(format!(
                "forum permission lookup returned {}",
                response.status()
            )));
        }

        response
            .json::<PermissionAnswers>()
            .await
            .map_err(|e| SlotboardError::internal(format!("forum permission payload: {e}")))
    }
}

impl TopicRepository for ForumHttpClient {
    async fn topic(&self, topic_id: TopicId) -> Result<Option<Topic>> {
        let url = format!("{}/topics/{topic_id}", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SlotboardError::internal(format!("forum unreachable: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SlotboardError::internal(format!(
                "forum topic lookup returned {}",
                response.status()
            )));
        }

        let topic = response
            .json::<Topic>()
            .await
            .map_err(|e| SlotboardError::internal(format!("forum topic payload: {e}")))?;
        Ok(Some(topic))
    }
}

impl AttendancePermissions for ForumHttpClient {
    async fn can_see(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        Ok(self.permissions(user_id, topic_id).await?.can_see)
    }

    async fn can_attend(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        Ok(self.permissions(user_id, topic_id).await?.can_attend)
    }

    async fn can_edit(&self, user_id: UserId, topic_id: TopicId) -> Result<bool> {
        Ok(self.permissions(user_id, topic_id).await?.can_edit)
    }
}

impl NotificationSink for ForumHttpClient {
    async fn notify_unslotted(&self, notice: UnslotNotice) -> Result<()> {
        let url = format!("{}/notifications/unslotted", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&notice)
            .send()
            .await
            .map_err(|e| SlotboardError::internal(format!("forum unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(SlotboardError::internal(format!(
                "forum notification returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ForumHttpClient::new("http://forum.internal/api/").unwrap();
        assert_eq!(client.base_url, "http://forum.internal/api");
    }
}
