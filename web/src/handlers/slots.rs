//! Slot endpoints: listing, claiming, releasing, reading occupants.
//!
//! - `GET    /:tid/match/:matchid/slot` — list slots
//! - `GET    /:tid/match/:matchid/slot/:slotid/user` — read occupant
//! - `PUT    /:tid/match/:matchid/slot/:slotid/user` — claim
//! - `DELETE /:tid/match/:matchid/slot/:slotid/user` — release
//!
//! Claim and release run the write chain (topic → category → login →
//! event window → can-write), where a valid share key substitutes for
//! login. Privileged callers — admins/owners, the API key, and share-key
//! holders within their match — may slot users other than themselves,
//! claim reserved slots, and kick occupants.

use super::Empty;
use crate::error::{AppError, WebResult};
use crate::extractors::Credentials;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use slotboard_core::{MatchId, Slot, SlotId, TopicId, UserId};
use slotboard_roster::{AttendancePermissions, Caller, TopicRepository};
use uuid::Uuid;

/// Request body for claiming a slot. `{}` claims for the caller.
#[derive(Debug, Default, Deserialize)]
pub struct ClaimRequest {
    /// User to put in the slot; defaults to the caller's identity.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Response listing a match's slots.
#[derive(Debug, Serialize)]
pub struct SlotListResponse {
    /// All slots, flattened in document order.
    pub slots: Vec<Slot>,
    /// Total count.
    pub total: usize,
}

/// Response carrying one slot's occupant.
#[derive(Debug, Serialize)]
pub struct OccupantResponse {
    /// The occupant, if any.
    pub user_id: Option<UserId>,
}

/// List the slots of a match.
pub async fn list_slots<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid)): Path<(u64, Uuid)>,
) -> WebResult<Json<SlotListResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    let slots = state.engine.slots(topic_id, MatchId::from_uuid(matchid))?;
    let total = slots.len();
    Ok(Json(SlotListResponse { slots, total }))
}

/// Read one slot's occupant.
pub async fn get_occupant<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
) -> WebResult<Json<OccupantResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    let user_id =
        state
            .engine
            .occupant(topic_id, MatchId::from_uuid(matchid), &SlotId::new(slotid))?;
    Ok(Json(OccupantResponse { user_id }))
}

/// Claim a slot.
pub async fn claim_slot<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
    Json(request): Json<ClaimRequest>,
) -> WebResult<Json<Empty>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    let match_id = MatchId::from_uuid(matchid);
    state
        .gate
        .authorize_write(&caller, topic_id, match_id)
        .await?;

    let privileged = is_privileged(&state, &caller, topic_id).await;
    let target = request
        .user_id
        .or(caller.user_id)
        .ok_or_else(|| AppError::bad_request("user id required"))?;

    // Ordinary callers slot themselves; slotting someone else takes a
    // share key or admin rights.
    if !privileged && caller.user_id != Some(target) {
        return Err(AppError::forbidden("you may only slot yourself"));
    }

    state
        .engine
        .claim(topic_id, match_id, &SlotId::new(slotid), target, privileged)?;
    Ok(Json(Empty {}))
}

/// Release a slot.
pub async fn release_slot<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
) -> WebResult<Json<Empty>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    let match_id = MatchId::from_uuid(matchid);
    state
        .gate
        .authorize_write(&caller, topic_id, match_id)
        .await?;

    let privileged = is_privileged(&state, &caller, topic_id).await;
    state.engine.release(
        topic_id,
        match_id,
        &SlotId::new(slotid),
        caller.user_id,
        privileged,
    )?;
    Ok(Json(Empty {}))
}

/// Whether the caller gets the admin bypass on slot operations.
///
/// A share key reaching this point has already been validated by the
/// write chain for this exact match, so holding one is privilege enough.
async fn is_privileged<T, P>(state: &AppState<T, P>, caller: &Caller, topic_id: TopicId) -> bool
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    caller.share_secret.is_some() || state.gate.is_admin_or_owner(caller, topic_id).await
}
