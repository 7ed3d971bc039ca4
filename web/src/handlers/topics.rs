//! Topic-level endpoints.
//!
//! - `GET /:tid` — list all matches of a topic
//! - `GET /:tid/slotted-user-ids` — list occupant user ids
//! - `GET /:tid/has-permissions` — admin/owner probe for the client UI

use super::matches::MatchView;
use crate::error::WebResult;
use crate::extractors::Credentials;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use slotboard_core::{TopicId, UserId};
use slotboard_roster::{AttendancePermissions, TopicRepository};

/// Response listing a topic's matches.
#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    /// All matches of the topic.
    pub matches: Vec<MatchView>,
    /// Total count.
    pub total: usize,
}

/// Response listing a topic's occupants.
#[derive(Debug, Serialize)]
pub struct SlottedUserIdsResponse {
    /// Every user occupying any slot of the topic, sorted, deduplicated.
    pub user_ids: Vec<UserId>,
}

/// Response of the admin/owner probe.
#[derive(Debug, Serialize)]
pub struct HasPermissionsResponse {
    /// Whether the caller may administer this topic's matches.
    pub result: bool,
}

/// List all matches of a topic.
pub async fn list_matches<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path(tid): Path<u64>,
) -> WebResult<Json<MatchListResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    let matches: Vec<MatchView> = state
        .matches
        .list(topic_id)
        .into_iter()
        .map(MatchView::from)
        .collect();
    let total = matches.len();
    Ok(Json(MatchListResponse { matches, total }))
}

/// List every user occupying a slot anywhere in the topic.
pub async fn slotted_user_ids<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path(tid): Path<u64>,
) -> WebResult<Json<SlottedUserIdsResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    Ok(Json(SlottedUserIdsResponse {
        user_ids: state.engine.list_occupant_user_ids(topic_id),
    }))
}

/// Self-describing probe: may the caller administer this topic?
///
/// Never fails; clients use it to decide whether to render privileged UI.
pub async fn has_permissions<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path(tid): Path<u64>,
) -> Json<HasPermissionsResponse>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let result = state.gate.is_admin_or_owner(&caller, TopicId(tid)).await;
    Json(HasPermissionsResponse { result })
}
