//! Domain identifiers and entities for the slotting service.
//!
//! Topic, category, and user ids are owned by the host forum platform and
//! only read here; match and share-token ids are minted by this system.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a forum topic (host-owned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicId(pub u64);

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a forum user (host-owned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a forum category (host-owned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a match within a topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Creates a new random `MatchId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `MatchId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a share token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareTokenId(Uuid);

impl ShareTokenId {
    /// Creates a new random `ShareTokenId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `ShareTokenId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShareTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShareTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a slot inside a match document.
///
/// Slot ids are author-supplied strings, unique within one match. They are
/// not globally unique: the same id may appear in two different matches.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(String);

impl SlotId {
    /// Create a `SlotId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A forum topic, as read from the host platform.
///
/// Read-only to this system. The title is the sole carrier of the event
/// date (see [`crate::event_date`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Topic id.
    pub id: TopicId,
    /// Topic title; may embed an event date.
    pub title: String,
    /// Category the topic lives in.
    pub category_id: CategoryId,
    /// User who created the topic.
    pub owner_user_id: UserId,
}

/// A capability secret granting write access to one match's slots.
///
/// Created by an admin or topic owner and handed out as a share link.
/// Whoever presents the matching secret can claim and release slots on the
/// match without being logged in. Tokens carry no expiry; they stand until
/// explicitly revoked or until their match is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    /// Token id (public; used in share URLs).
    pub id: ShareTokenId,
    /// Topic the token is scoped to.
    pub topic_id: TopicId,
    /// Match the token is scoped to.
    pub match_id: MatchId,
    /// The opaque secret to present in requests.
    pub secret: String,
}

/// An attendance-change signal from the host platform.
///
/// Consumed once by the auto-unslot service; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceChange {
    /// Topic whose event the user responded to.
    pub topic_id: TopicId,
    /// The responding user.
    pub user_id: UserId,
    /// Probability of attendance reported by the host; `>= 1.0` means the
    /// user is certain to attend and nothing is unslotted.
    pub probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_serialize_transparently() {
        let topic = TopicId(42);
        let json = serde_json::to_string(&topic).unwrap();
        assert_eq!(json, "42");

        let back: TopicId = serde_json::from_str("42").unwrap();
        assert_eq!(back, topic);
    }

    #[test]
    fn test_slot_id_from_str() {
        let slot: SlotId = "alpha-ftl".into();
        assert_eq!(slot.as_str(), "alpha-ftl");
        assert_eq!(slot.to_string(), "alpha-ftl");
    }

    #[test]
    fn test_match_id_display_roundtrip() {
        let id = MatchId::new();
        let parsed = MatchId::from_uuid(id.to_string().parse().unwrap());
        assert_eq!(id, parsed);
    }
}
