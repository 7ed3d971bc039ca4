//! Match management endpoints.
//!
//! - `POST   /:tid/match` — create a match (admin/owner)
//! - `GET    /:tid/match/:matchid` — read a match
//! - `PUT    /:tid/match/:matchid` — replace a match's structure (admin/owner)
//! - `DELETE /:tid/match/:matchid` — delete a match (admin/owner)
//!
//! `PUT` is a full overwrite: the submitted document is installed as-is,
//! so occupants survive only if the admin's document carries them.
//! Deleting a match revokes its share tokens, so no token outlives the
//! match it grants access to.

use super::Empty;
use crate::error::WebResult;
use crate::extractors::Credentials;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use slotboard_core::{
    roster::RosterNode, Match, MatchId, TopicId,
};
use slotboard_roster::{AttendancePermissions, TopicRepository};
use uuid::Uuid;

/// Request carrying a roster structure document.
#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    /// The roster tree; slot ids must be unique within the match.
    pub structure: Vec<RosterNode>,
}

/// A match as rendered to clients, with derived occupancy counts.
#[derive(Debug, Serialize)]
pub struct MatchView {
    /// Match id.
    pub id: MatchId,
    /// Owning topic.
    pub topic_id: TopicId,
    /// The roster tree, occupants included.
    pub structure: Vec<RosterNode>,
    /// Total number of slots.
    pub slot_count: usize,
    /// Number of occupied slots.
    pub occupied_count: usize,
}

impl From<Match> for MatchView {
    fn from(m: Match) -> Self {
        Self {
            slot_count: m.slot_count(),
            occupied_count: m.occupied_count(),
            id: m.id,
            topic_id: m.topic_id,
            structure: m.structure,
        }
    }
}

/// Create a match under a topic.
pub async fn create_match<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path(tid): Path<u64>,
    Json(request): Json<StructureRequest>,
) -> WebResult<(StatusCode, Json<MatchView>)>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;

    let created = state.matches.create(topic_id, request.structure)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Read one match.
pub async fn get_match<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
) -> WebResult<Json<MatchView>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    let found = state.matches.get(topic_id, MatchId::from_uuid(matchid))?;
    Ok(Json(found.into()))
}

/// Replace a match's structure wholesale.
pub async fn replace_match<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
    Json(request): Json<StructureRequest>,
) -> WebResult<Json<MatchView>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;

    let replaced = state
        .matches
        .replace(topic_id, MatchId::from_uuid(matchid), request.structure)?;
    Ok(Json(replaced.into()))
}

/// Delete a match and revoke its share tokens.
pub async fn delete_match<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
) -> WebResult<Json<Empty>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    let match_id = MatchId::from_uuid(matchid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;

    state.matches.delete(topic_id, match_id)?;
    state.share_tokens.delete_for_match(topic_id, match_id);
    Ok(Json(Empty {}))
}
