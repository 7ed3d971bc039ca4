//! HTTP handlers, one module per resource.
//!
//! Every handler runs its gate chain before touching any store; the
//! chains per verb/path follow the access table in the crate docs.

use crate::error::AppError;
use serde::Serialize;

pub mod health;
pub mod matches;
pub mod reservations;
pub mod share;
pub mod slots;
pub mod topics;

/// The `{}` body successful no-content operations return with status 200.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// Fallback for unlisted verbs on listed paths.
///
/// Keeps the error body JSON-shaped like every other failure.
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
