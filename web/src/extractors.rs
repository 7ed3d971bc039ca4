//! Custom Axum extractors.
//!
//! The host platform fronts this service and asserts the caller's
//! credentials via headers:
//!
//! - `x-slotboard-uid`: authenticated user id
//! - `x-slotboard-api-key`: static API key for machine-to-machine calls
//! - `x-slotboard-share-key`: share-token secret scoped to one match
//!
//! All three are optional; the gate decides per chain what is required.

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use slotboard_core::UserId;
use slotboard_roster::Caller;

/// Header carrying the authenticated user id.
pub const UID_HEADER: &str = "x-slotboard-uid";
/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-slotboard-api-key";
/// Header carrying a share-token secret.
pub const SHARE_KEY_HEADER: &str = "x-slotboard-share-key";

/// The request's credentials, assembled from headers.
///
/// # Example
///
/// ```ignore
/// async fn handler(
///     State(state): State<AppState<T, P>>,
///     Credentials(caller): Credentials,
/// ) -> WebResult<Json<Response>> {
///     state.gate.authorize_read(&caller, topic_id).await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Credentials(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = match header(parts, UID_HEADER) {
            None => None,
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map(UserId)
                    .map_err(|_| AppError::bad_request("invalid x-slotboard-uid header"))?,
            ),
        };

        Ok(Self(Caller {
            user_id,
            api_key: header(parts, API_KEY_HEADER),
            share_secret: header(parts, SHARE_KEY_HEADER),
        }))
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}
