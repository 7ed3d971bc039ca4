//! The access-control gate.
//!
//! Authorization is a pipeline of independent checks, each able to
//! short-circuit with a specific failure. The routing layer composes
//! exactly the right chain per verb per resource via the `authorize_*`
//! methods; the individual `require_*` checks stay public so each can be
//! tested on its own.
//!
//! Chain order is fixed: topic existence → category allow-list → login →
//! event window → verb-specific permission. A disallowed category masks a
//! topic as `NotFound` before the event window is ever consulted.

use crate::providers::{AttendancePermissions, TopicRepository};
use crate::store::ShareTokenStore;
use chrono::{DateTime, Utc};
use slotboard_core::{event_date, CategoryId, MatchId, Result, SlotboardError, Topic, TopicId, UserId};
use std::sync::Arc;

/// User id passed to permission providers for anonymous callers.
const GUEST: UserId = UserId(0);

/// Static configuration for the gate, passed in at construction.
///
/// No process-wide mutable state: the router owns one gate built from one
/// config value.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// Static API key; bypasses login and ownership checks everywhere.
    pub api_key: Option<String>,

    /// Category allow-list. Empty means the feature is enabled for all
    /// categories; non-empty masks topics of other categories as absent.
    pub allowed_category_ids: Vec<CategoryId>,
}

impl GateConfig {
    /// Create an empty config (no API key, all categories allowed).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            api_key: None,
            allowed_category_ids: Vec::new(),
        }
    }

    /// Set the static API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the category allow-list.
    #[must_use]
    pub fn with_allowed_categories(mut self, ids: Vec<CategoryId>) -> Self {
        self.allowed_category_ids = ids;
        self
    }
}

/// Credentials presented with one request.
///
/// Built by the web layer from headers; all fields are optional and the
/// gate decides what each chain requires.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    /// Authenticated identity asserted by the host platform.
    pub user_id: Option<UserId>,
    /// Static API key, if presented.
    pub api_key: Option<String>,
    /// Share-token secret, if presented.
    pub share_secret: Option<String>,
}

impl Caller {
    /// An anonymous caller with no credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            api_key: None,
            share_secret: None,
        }
    }

    /// A caller carrying only an authenticated identity.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            api_key: None,
            share_secret: None,
        }
    }

    fn effective_user(&self) -> UserId {
        self.user_id.unwrap_or(GUEST)
    }
}

/// The composable authorization gate.
pub struct AccessGate<T, P> {
    config: GateConfig,
    topics: T,
    permissions: P,
    share_tokens: Arc<ShareTokenStore>,
}

impl<T, P> AccessGate<T, P>
where
    T: TopicRepository,
    P: AttendancePermissions,
{
    /// Build a gate from config and providers.
    pub const fn new(
        config: GateConfig,
        topics: T,
        permissions: P,
        share_tokens: Arc<ShareTokenStore>,
    ) -> Self {
        Self {
            config,
            topics,
            permissions,
            share_tokens,
        }
    }

    // ========================================================================
    // Individual checks
    // ========================================================================

    /// TopicExists: resolve the topic or fail `NotFound`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the topic does not resolve; `Internal` if the host
    /// platform cannot be reached.
    pub async fn require_topic(&self, topic_id: TopicId) -> Result<Topic> {
        self.topics
            .topic(topic_id)
            .await?
            .ok_or_else(|| SlotboardError::not_found(format!("topic {topic_id} not found")))
    }

    /// CategoryAllowed: with a non-empty allow-list, topics of other
    /// categories are reported as absent. An empty list always passes.
    ///
    /// # Errors
    ///
    /// `NotFound` when the topic's category is outside the allow-list.
    pub fn require_category_allowed(&self, topic: &Topic) -> Result<()> {
        if self.config.allowed_category_ids.is_empty()
            || self.config.allowed_category_ids.contains(&topic.category_id)
        {
            Ok(())
        } else {
            // Same message as a missing topic: the allow-list hides, it
            // does not explain.
            Err(SlotboardError::not_found(format!(
                "topic {} not found",
                topic.id
            )))
        }
    }

    /// RequireLoggedIn: passes on a matching API key, an authenticated
    /// identity, or a presented share key (whose actual validity is
    /// decided by the write check).
    ///
    /// # Errors
    ///
    /// `Unauthorized` when no credential at all is presented.
    pub fn require_logged_in(&self, caller: &Caller) -> Result<()> {
        if self.api_key_matches(caller) || caller.user_id.is_some() || caller.share_secret.is_some()
        {
            Ok(())
        } else {
            Err(SlotboardError::unauthorized("login required"))
        }
    }

    /// RequireEventInFuture at an explicit instant.
    ///
    /// # Errors
    ///
    /// `NotFound` if the topic is not an event; `Forbidden` once the
    /// event window has passed.
    pub fn require_event_in_future_at(&self, topic: &Topic, now: DateTime<Utc>) -> Result<()> {
        if !event_date::is_event(&topic.title) {
            return Err(SlotboardError::not_found(format!(
                "topic {} is not an event",
                topic.id
            )));
        }
        if event_date::seconds_to_event_at(&topic.title, now) < 0 {
            return Err(SlotboardError::forbidden("the event has already started"));
        }
        Ok(())
    }

    /// RequireEventInFuture against the current instant.
    ///
    /// # Errors
    ///
    /// See [`require_event_in_future_at`](Self::require_event_in_future_at).
    pub fn require_event_in_future(&self, topic: &Topic) -> Result<()> {
        self.require_event_in_future_at(topic, Utc::now())
    }

    /// RequireCanSeeAttendance: delegates to the host's permission
    /// provider; the API key passes unconditionally.
    ///
    /// # Errors
    ///
    /// `Forbidden` on a negative provider answer.
    pub async fn require_can_see(&self, caller: &Caller, topic_id: TopicId) -> Result<()> {
        if self.api_key_matches(caller) {
            return Ok(());
        }
        if self
            .permissions
            .can_see(caller.effective_user(), topic_id)
            .await?
        {
            Ok(())
        } else {
            Err(SlotboardError::forbidden(
                "you may not view this topic's attendance",
            ))
        }
    }

    /// RequireCanWriteAttendance: a presented share key must validate for
    /// this exact `(topic, match)`; otherwise the host's `can_attend`
    /// decides. The API key passes unconditionally.
    ///
    /// # Errors
    ///
    /// `Forbidden` on an invalid share key or negative provider answer;
    /// `Unauthorized` when no credential at all is presented.
    pub async fn require_can_write(
        &self,
        caller: &Caller,
        topic_id: TopicId,
        match_id: MatchId,
    ) -> Result<()> {
        if self.api_key_matches(caller) {
            return Ok(());
        }
        if let Some(secret) = &caller.share_secret {
            return if self.share_tokens.validate(topic_id, match_id, secret) {
                Ok(())
            } else {
                Err(SlotboardError::forbidden("invalid share key"))
            };
        }
        match caller.user_id {
            None => Err(SlotboardError::unauthorized("login required")),
            Some(user_id) => {
                if self.permissions.can_attend(user_id, topic_id).await? {
                    Ok(())
                } else {
                    Err(SlotboardError::forbidden(
                        "you may not slot into this event",
                    ))
                }
            }
        }
    }

    /// RequireAdminOrThreadOwner: the API key passes; otherwise a missing
    /// identity is a `BadRequest` and the host's edit permission decides.
    ///
    /// # Errors
    ///
    /// `BadRequest` without an identity; `Forbidden` on a negative
    /// provider answer.
    pub async fn require_admin_or_owner(&self, caller: &Caller, topic_id: TopicId) -> Result<()> {
        if self.api_key_matches(caller) {
            return Ok(());
        }
        let Some(user_id) = caller.user_id else {
            return Err(SlotboardError::bad_request("user identity required"));
        };
        if self.permissions.can_edit(user_id, topic_id).await? {
            Ok(())
        } else {
            Err(SlotboardError::forbidden("admin or topic owner required"))
        }
    }

    /// IsAdminOrThreadOwnerQuery: the read-only probe behind the
    /// `has-permissions` endpoint. Mirrors
    /// [`require_admin_or_owner`](Self::require_admin_or_owner) but never
    /// fails the request; a provider error is logged and reported as
    /// `false`.
    pub async fn is_admin_or_owner(&self, caller: &Caller, topic_id: TopicId) -> bool {
        if self.api_key_matches(caller) {
            return true;
        }
        let Some(user_id) = caller.user_id else {
            return false;
        };
        match self.permissions.can_edit(user_id, topic_id).await {
            Ok(answer) => answer,
            Err(error) => {
                tracing::warn!(%topic_id, %user_id, %error, "edit-permission probe failed");
                false
            }
        }
    }

    // ========================================================================
    // Composed chains
    // ========================================================================

    /// Chain for read endpoints: topic existence → can-see.
    ///
    /// # Errors
    ///
    /// The first failing check's error.
    pub async fn authorize_read(&self, caller: &Caller, topic_id: TopicId) -> Result<Topic> {
        let topic = self.require_topic(topic_id).await?;
        self.require_can_see(caller, topic_id).await?;
        Ok(topic)
    }

    /// Chain for claim/release: topic existence → category → login →
    /// event window → can-write.
    ///
    /// # Errors
    ///
    /// The first failing check's error.
    pub async fn authorize_write(
        &self,
        caller: &Caller,
        topic_id: TopicId,
        match_id: MatchId,
    ) -> Result<Topic> {
        let topic = self.require_topic(topic_id).await?;
        self.require_category_allowed(&topic)?;
        self.require_logged_in(caller)?;
        self.require_event_in_future(&topic)?;
        self.require_can_write(caller, topic_id, match_id).await?;
        Ok(topic)
    }

    /// Chain for privileged reads (e.g. listing share tokens): topic
    /// existence → admin-or-owner.
    ///
    /// # Errors
    ///
    /// The first failing check's error.
    pub async fn authorize_admin_read(&self, caller: &Caller, topic_id: TopicId) -> Result<Topic> {
        let topic = self.require_topic(topic_id).await?;
        self.require_admin_or_owner(caller, topic_id).await?;
        Ok(topic)
    }

    /// Chain for privileged mutations: topic existence → category → login
    /// → event window → admin-or-owner.
    ///
    /// # Errors
    ///
    /// The first failing check's error.
    pub async fn authorize_admin_write(&self, caller: &Caller, topic_id: TopicId) -> Result<Topic> {
        let topic = self.require_topic(topic_id).await?;
        self.require_category_allowed(&topic)?;
        self.require_logged_in(caller)?;
        self.require_event_in_future(&topic)?;
        self.require_admin_or_owner(caller, topic_id).await?;
        Ok(topic)
    }

    /// Whether the caller is privileged for slot operations: the API key
    /// or an admin/owner identity. Share-token holders are handled by the
    /// write chain, not here.
    pub async fn is_privileged(&self, caller: &Caller, topic_id: TopicId) -> bool {
        self.is_admin_or_owner(caller, topic_id).await
    }

    fn api_key_matches(&self, caller: &Caller) -> bool {
        match (&self.config.api_key, &caller.api_key) {
            (Some(configured), Some(presented)) => {
                constant_time_eq::constant_time_eq(configured.as_bytes(), presented.as_bytes())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockPermissions, MockTopicRepository};
    use chrono::TimeZone;

    fn topic(id: u64, title: &str, category: u64) -> Topic {
        Topic {
            id: TopicId(id),
            title: title.to_string(),
            category_id: CategoryId(category),
            owner_user_id: UserId(1),
        }
    }

    fn gate(
        config: GateConfig,
        topics: MockTopicRepository,
        permissions: MockPermissions,
    ) -> AccessGate<MockTopicRepository, MockPermissions> {
        AccessGate::new(config, topics, permissions, Arc::new(ShareTokenStore::new()))
    }

    fn far_future_title() -> String {
        "Op 2999-01-01 kickoff".to_string()
    }

    #[tokio::test]
    async fn test_topic_exists_check() {
        let topics = MockTopicRepository::new();
        topics.insert(topic(5, &far_future_title(), 2));
        let gate = gate(GateConfig::new(), topics, MockPermissions::new());

        assert!(gate.require_topic(TopicId(5)).await.is_ok());
        assert!(matches!(
            gate.require_topic(TopicId(6)).await,
            Err(SlotboardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_category_allow_list() {
        let config = GateConfig::new().with_allowed_categories(vec![CategoryId(2)]);
        let gate = gate(config, MockTopicRepository::new(), MockPermissions::new());

        assert!(gate.require_category_allowed(&topic(5, "t", 2)).is_ok());
        assert!(matches!(
            gate.require_category_allowed(&topic(5, "t", 3)),
            Err(SlotboardError::NotFound(_))
        ));

        // Empty allow-list disables the feature.
        let open = AccessGate::new(
            GateConfig::new(),
            MockTopicRepository::new(),
            MockPermissions::new(),
            Arc::new(ShareTokenStore::new()),
        );
        assert!(open.require_category_allowed(&topic(5, "t", 99)).is_ok());
    }

    #[tokio::test]
    async fn test_logged_in_accepts_any_credential() {
        let config = GateConfig::new().with_api_key("sekrit");
        let gate = gate(config, MockTopicRepository::new(), MockPermissions::new());

        assert!(matches!(
            gate.require_logged_in(&Caller::anonymous()),
            Err(SlotboardError::Unauthorized(_))
        ));
        assert!(gate.require_logged_in(&Caller::user(UserId(7))).is_ok());

        let keyed = Caller {
            api_key: Some("sekrit".to_string()),
            ..Caller::anonymous()
        };
        assert!(gate.require_logged_in(&keyed).is_ok());

        let wrong_key = Caller {
            api_key: Some("nope".to_string()),
            ..Caller::anonymous()
        };
        assert!(gate.require_logged_in(&wrong_key).is_err());

        let share = Caller {
            share_secret: Some("whatever".to_string()),
            ..Caller::anonymous()
        };
        assert!(gate.require_logged_in(&share).is_ok());
    }

    #[tokio::test]
    async fn test_event_window() {
        let gate = gate(
            GateConfig::new(),
            MockTopicRepository::new(),
            MockPermissions::new(),
        );
        let now = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert!(matches!(
            gate.require_event_in_future_at(&topic(5, "no date", 1), now),
            Err(SlotboardError::NotFound(_))
        ));
        assert!(matches!(
            gate.require_event_in_future_at(&topic(5, "Op 2024-04-01 12:00", 1), now),
            Err(SlotboardError::Forbidden(_))
        ));
        assert!(gate
            .require_event_in_future_at(&topic(5, "Op 2024-06-01 12:00", 1), now)
            .is_ok());
    }

    #[tokio::test]
    async fn test_can_write_with_share_token() {
        let share_tokens = Arc::new(ShareTokenStore::new());
        let nine = MatchId::new();
        let ten = MatchId::new();
        let token = share_tokens.create(TopicId(5), nine);

        let permissions = MockPermissions::new();
        permissions.deny_attend(UserId(7), TopicId(5));
        let gate = AccessGate::new(
            GateConfig::new(),
            MockTopicRepository::new(),
            permissions,
            share_tokens,
        );

        let holder = Caller {
            share_secret: Some(token.secret.clone()),
            ..Caller::anonymous()
        };
        assert!(gate.require_can_write(&holder, TopicId(5), nine).await.is_ok());
        // Same secret, different match: rejected.
        assert!(matches!(
            gate.require_can_write(&holder, TopicId(5), ten).await,
            Err(SlotboardError::Forbidden(_))
        ));

        // Without a token the host's can_attend decides.
        assert!(matches!(
            gate.require_can_write(&Caller::user(UserId(7)), TopicId(5), nine).await,
            Err(SlotboardError::Forbidden(_))
        ));
        assert!(gate
            .require_can_write(&Caller::user(UserId(8)), TopicId(5), nine)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_admin_or_owner_check() {
        let permissions = MockPermissions::new();
        permissions.allow_edit(UserId(1), TopicId(5));
        let gate = gate(
            GateConfig::new().with_api_key("sekrit"),
            MockTopicRepository::new(),
            permissions,
        );

        assert!(gate
            .require_admin_or_owner(&Caller::user(UserId(1)), TopicId(5))
            .await
            .is_ok());
        assert!(matches!(
            gate.require_admin_or_owner(&Caller::user(UserId(2)), TopicId(5)).await,
            Err(SlotboardError::Forbidden(_))
        ));
        assert!(matches!(
            gate.require_admin_or_owner(&Caller::anonymous(), TopicId(5)).await,
            Err(SlotboardError::BadRequest(_))
        ));

        let keyed = Caller {
            api_key: Some("sekrit".to_string()),
            ..Caller::anonymous()
        };
        assert!(gate.require_admin_or_owner(&keyed, TopicId(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_probe_never_fails() {
        let permissions = MockPermissions::new();
        permissions.allow_edit(UserId(1), TopicId(5));
        permissions.fail_next_can_edit();
        let gate = gate(GateConfig::new(), MockTopicRepository::new(), permissions);

        // Provider error degrades to false instead of failing the request.
        assert!(!gate.is_admin_or_owner(&Caller::user(UserId(1)), TopicId(5)).await);
        // Subsequent calls answer normally.
        assert!(gate.is_admin_or_owner(&Caller::user(UserId(1)), TopicId(5)).await);
        assert!(!gate.is_admin_or_owner(&Caller::anonymous(), TopicId(5)).await);
    }

    #[tokio::test]
    async fn test_write_chain_order_category_masks_past_event() {
        let topics = MockTopicRepository::new();
        // Event long past, and in a disallowed category.
        topics.insert(topic(5, "Op 2001-01-01 kickoff", 9));
        let config = GateConfig::new().with_allowed_categories(vec![CategoryId(2)]);
        let gate = gate(config, topics, MockPermissions::new());

        // The category check wins: NotFound, not Forbidden.
        let denied = gate
            .authorize_write(&Caller::user(UserId(7)), TopicId(5), MatchId::new())
            .await;
        assert!(matches!(denied, Err(SlotboardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_write_chain_happy_path() {
        let topics = MockTopicRepository::new();
        topics.insert(topic(5, &far_future_title(), 2));
        let gate = gate(GateConfig::new(), topics, MockPermissions::new());

        assert!(gate
            .authorize_write(&Caller::user(UserId(7)), TopicId(5), MatchId::new())
            .await
            .is_ok());
    }
}
