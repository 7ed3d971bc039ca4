//! Router configuration.
//!
//! Builds the complete Axum router: the full slotting API nested under the
//! configured root, plus unauthenticated health probes. Unlisted verbs on
//! listed paths fall back to a JSON-bodied 405.

use crate::config::Config;
use crate::handlers::{health, matches, method_not_allowed, reservations, share, slots, topics};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use slotboard_roster::{AttendancePermissions, TopicRepository};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// # Routes
///
/// | Verb | Path | Gate |
/// |---|---|---|
/// | GET | `/:tid` | can-see |
/// | GET | `/:tid/slotted-user-ids` | can-see |
/// | GET | `/:tid/has-permissions` | none (probe) |
/// | POST | `/:tid/match` | admin/owner |
/// | PUT/GET/DELETE | `/:tid/match/:matchid` | admin / can-see / admin |
/// | GET/POST/DELETE | `/:tid/match/:matchid/share` | admin/owner |
/// | GET | `/:tid/match/:matchid/share/:shareid` | topic exists |
/// | GET | `/:tid/match/:matchid/slot` | can-see |
/// | PUT/DELETE/GET | `/:tid/match/:matchid/slot/:slotid/user` | can-write / can-write / can-see |
/// | PUT/DELETE/GET | `/:tid/match/:matchid/slot/:slotid/reservation` | admin / admin / can-see |
pub fn build_router<T, P>(state: AppState<T, P>, config: &Config) -> Router
where
    T: TopicRepository + Clone + 'static,
    P: AttendancePermissions + Clone + 'static,
{
    let api = Router::new()
        // Topic level
        .route(
            "/:tid",
            get(topics::list_matches::<T, P>).fallback(method_not_allowed),
        )
        .route(
            "/:tid/slotted-user-ids",
            get(topics::slotted_user_ids::<T, P>).fallback(method_not_allowed),
        )
        .route(
            "/:tid/has-permissions",
            get(topics::has_permissions::<T, P>).fallback(method_not_allowed),
        )
        // Matches
        .route(
            "/:tid/match",
            post(matches::create_match::<T, P>).fallback(method_not_allowed),
        )
        .route(
            "/:tid/match/:matchid",
            put(matches::replace_match::<T, P>)
                .get(matches::get_match::<T, P>)
                .delete(matches::delete_match::<T, P>)
                .fallback(method_not_allowed),
        )
        // Share tokens
        .route(
            "/:tid/match/:matchid/share",
            get(share::list_share_tokens::<T, P>)
                .post(share::create_share_token::<T, P>)
                .delete(share::delete_share_tokens::<T, P>)
                .fallback(method_not_allowed),
        )
        .route(
            "/:tid/match/:matchid/share/:shareid",
            get(share::get_share_token::<T, P>).fallback(method_not_allowed),
        )
        // Slots
        .route(
            "/:tid/match/:matchid/slot",
            get(slots::list_slots::<T, P>).fallback(method_not_allowed),
        )
        .route(
            "/:tid/match/:matchid/slot/:slotid/user",
            put(slots::claim_slot::<T, P>)
                .delete(slots::release_slot::<T, P>)
                .get(slots::get_occupant::<T, P>)
                .fallback(method_not_allowed),
        )
        // Reservations
        .route(
            "/:tid/match/:matchid/slot/:slotid/reservation",
            put(reservations::set_reservation::<T, P>)
                .delete(reservations::clear_reservation::<T, P>)
                .get(reservations::get_reservation::<T, P>)
                .fallback(method_not_allowed),
        )
        .with_state(state);

    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // API routes under the configured prefix
        .nest(&config.api_root, api)
        .layer(TraceLayer::new_for_http())
}
