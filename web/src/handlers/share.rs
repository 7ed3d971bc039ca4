//! Share-token endpoints.
//!
//! - `GET    /:tid/match/:matchid/share` — list tokens (admin/owner)
//! - `POST   /:tid/match/:matchid/share` — mint a token (admin/owner)
//! - `DELETE /:tid/match/:matchid/share` — revoke all of a match's tokens (admin/owner)
//! - `GET    /:tid/match/:matchid/share/:shareid` — read one token
//!
//! The single-token read is gated only on topic existence: the share URL
//! itself is the capability, and the page behind it has to be able to
//! resolve the secret without a login.

use super::Empty;
use crate::error::WebResult;
use crate::extractors::Credentials;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use slotboard_core::{MatchId, ShareToken, ShareTokenId, TopicId};
use slotboard_roster::{AttendancePermissions, TopicRepository};
use uuid::Uuid;

/// Response listing a match's share tokens.
#[derive(Debug, Serialize)]
pub struct ShareTokenListResponse {
    /// All tokens of the match.
    pub tokens: Vec<ShareToken>,
    /// Total count.
    pub total: usize,
}

/// List a match's share tokens.
pub async fn list_share_tokens<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
) -> WebResult<Json<ShareTokenListResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    let match_id = MatchId::from_uuid(matchid);
    state.gate.authorize_admin_read(&caller, topic_id).await?;
    state.matches.get(topic_id, match_id)?;

    let tokens = state.share_tokens.list(topic_id, match_id);
    let total = tokens.len();
    Ok(Json(ShareTokenListResponse { tokens, total }))
}

/// Mint a share token for a match.
pub async fn create_share_token<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
) -> WebResult<(StatusCode, Json<ShareToken>)>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    let match_id = MatchId::from_uuid(matchid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;
    state.matches.get(topic_id, match_id)?;

    let token = state.share_tokens.create(topic_id, match_id);
    Ok((StatusCode::CREATED, Json(token)))
}

/// Revoke every share token of a match.
pub async fn delete_share_tokens<T, P>(
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
    state.matches.get(topic_id, match_id)?;

    state.share_tokens.delete_for_match(topic_id, match_id);
    Ok(Json(Empty {}))
}

/// Read one share token by id.
pub async fn get_share_token<T, P>(
    State(state): State<AppState<T, P>>,
    Path((tid, matchid, shareid)): Path<(u64, Uuid, Uuid)>,
) -> WebResult<Json<ShareToken>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.require_topic(topic_id).await?;

    let token = state.share_tokens.get(
        topic_id,
        MatchId::from_uuid(matchid),
        ShareTokenId::from_uuid(shareid),
    )?;
    Ok(Json(token))
}
