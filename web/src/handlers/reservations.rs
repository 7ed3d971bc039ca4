//! Reservation endpoints.
//!
//! - `PUT    /:tid/match/:matchid/slot/:slotid/reservation` — set (admin/owner)
//! - `DELETE /:tid/match/:matchid/slot/:slotid/reservation` — clear (admin/owner)
//! - `GET    /:tid/match/:matchid/slot/:slotid/reservation` — read

use super::Empty;
use crate::error::WebResult;
use crate::extractors::Credentials;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use slotboard_core::{MatchId, SlotId, TopicId, UserId};
use slotboard_roster::{AttendancePermissions, TopicRepository};
use uuid::Uuid;

/// Request body for setting a reservation.
#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    /// The user to pre-assign the slot to.
    pub user_id: UserId,
}

/// Response carrying one slot's reservation.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// The user the slot is reserved for, if any.
    pub user_id: Option<UserId>,
}

/// Reserve a slot for a user.
pub async fn set_reservation<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
    Json(request): Json<ReserveRequest>,
) -> WebResult<Json<Empty>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;

    state.reservations.reserve(
        topic_id,
        MatchId::from_uuid(matchid),
        &SlotId::new(slotid),
        request.user_id,
    )?;
    Ok(Json(Empty {}))
}

/// Clear a slot's reservation.
pub async fn clear_reservation<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
) -> WebResult<Json<Empty>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_admin_write(&caller, topic_id).await?;

    state
        .reservations
        .unreserve(topic_id, MatchId::from_uuid(matchid), &SlotId::new(slotid))?;
    Ok(Json(Empty {}))
}

/// Read a slot's reservation.
pub async fn get_reservation<T, P>(
    State(state): State<AppState<T, P>>,
    Credentials(caller): Credentials,
    Path((tid, matchid, slotid)): Path<(u64, Uuid, String)>,
) -> WebResult<Json<ReservationResponse>>
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let topic_id = TopicId(tid);
    state.gate.authorize_read(&caller, topic_id).await?;

    let user_id = state.reservations.reservation(
        topic_id,
        MatchId::from_uuid(matchid),
        &SlotId::new(slotid),
    )?;
    Ok(Json(ReservationResponse { user_id }))
}
