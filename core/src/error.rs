//! Error types for slotting operations.

use thiserror::Error;

/// Result type alias for slotting operations.
pub type Result<T> = std::result::Result<T, SlotboardError>;

/// Failure taxonomy for the slotting service.
///
/// Every operation in the service fails with one of these categories; the
/// web layer maps them onto HTTP statuses one-to-one. Gate checks
/// short-circuit with the first failure they hit, so the variant a caller
/// observes also encodes *which* check rejected the request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotboardError {
    /// Topic, match, slot, or share token absent; also raised when a topic
    /// is not an event or its category is outside the allow-list.
    #[error("{0}")]
    NotFound(String),

    /// Permission denied, event window passed, or invalid share token.
    #[error("{0}")]
    Forbidden(String),

    /// No credentials presented where some were required.
    #[error("{0}")]
    Unauthorized(String),

    /// A required identifier or field is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Verb not supported on this path.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Slot already occupied, or reserved for another user.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure from a dependency.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SlotboardError {
    /// Create a `NotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a `Forbidden` error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create an `Unauthorized` error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a `BadRequest` error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a `Conflict` error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` if this error is attributable to the caller rather
    /// than to the service or its dependencies.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
