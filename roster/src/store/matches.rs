//! The owning table of match documents.

use dashmap::DashMap;
use slotboard_core::{
    roster::{duplicate_slot_id, RosterNode},
    Match, MatchId, Result, SlotboardError, TopicId,
};

/// Concurrent store of match documents, keyed by `(topic, match)`.
///
/// All slot mutation in the service funnels through [`MatchStore::update`],
/// which runs the caller's closure under the entry's write guard. That
/// guard is the atomic check-and-mutate scope required for claim/release
/// linearizability: two concurrent updates of the same match serialize,
/// and each sees the other's completed effect.
#[derive(Debug, Default)]
pub struct MatchStore {
    matches: DashMap<(TopicId, MatchId), Match>,
}

impl MatchStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a match from an admin-submitted structure.
    ///
    /// # Errors
    ///
    /// `BadRequest` if the structure contains duplicate slot ids.
    pub fn create(&self, topic_id: TopicId, structure: Vec<RosterNode>) -> Result<Match> {
        Self::validate(&structure)?;
        let created = Match::new(topic_id, structure);
        self.matches.insert((topic_id, created.id), created.clone());
        tracing::info!(%topic_id, match_id = %created.id, "match created");
        Ok(created)
    }

    /// Fetch a match by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such match exists under the topic.
    pub fn get(&self, topic_id: TopicId, match_id: MatchId) -> Result<Match> {
        self.matches
            .get(&(topic_id, match_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Self::missing(match_id))
    }

    /// Replace a match's structure wholesale.
    ///
    /// This is a full overwrite: occupants and reservations survive only
    /// if the submitted document carries them. An admin replacing the
    /// structure may silently evict users whose slot no longer exists.
    ///
    /// # Errors
    ///
    /// `NotFound` if the match does not exist; `BadRequest` on duplicate
    /// slot ids.
    pub fn replace(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        structure: Vec<RosterNode>,
    ) -> Result<Match> {
        Self::validate(&structure)?;
        let mut entry = self
            .matches
            .get_mut(&(topic_id, match_id))
            .ok_or_else(|| Self::missing(match_id))?;
        entry.value_mut().structure = structure;
        tracing::info!(%topic_id, %match_id, "match replaced");
        Ok(entry.value().clone())
    }

    /// Delete a match.
    ///
    /// # Errors
    ///
    /// `NotFound` if the match does not exist.
    pub fn delete(&self, topic_id: TopicId, match_id: MatchId) -> Result<()> {
        self.matches
            .remove(&(topic_id, match_id))
            .map(|_| tracing::info!(%topic_id, %match_id, "match deleted"))
            .ok_or_else(|| Self::missing(match_id))
    }

    /// All matches of a topic, ordered by match id for stable listings.
    #[must_use]
    pub fn list(&self, topic_id: TopicId) -> Vec<Match> {
        let mut found: Vec<Match> = self
            .matches
            .iter()
            .filter(|entry| entry.key().0 == topic_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|m| *m.id.as_uuid());
        found
    }

    /// Ids of all matches of a topic, ordered like [`MatchStore::list`].
    #[must_use]
    pub fn match_ids(&self, topic_id: TopicId) -> Vec<MatchId> {
        let mut ids: Vec<MatchId> = self
            .matches
            .iter()
            .filter(|entry| entry.key().0 == topic_id)
            .map(|entry| entry.key().1)
            .collect();
        ids.sort_by_key(|id| *id.as_uuid());
        ids
    }

    /// Run `mutate` on a match under its write guard.
    ///
    /// The closure's whole execution is the atomic scope: checks and
    /// mutations inside it cannot interleave with another update of the
    /// same match.
    ///
    /// # Errors
    ///
    /// `NotFound` if the match does not exist.
    pub fn update<R>(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        mutate: impl FnOnce(&mut Match) -> R,
    ) -> Result<R> {
        let mut entry = self
            .matches
            .get_mut(&(topic_id, match_id))
            .ok_or_else(|| Self::missing(match_id))?;
        Ok(mutate(entry.value_mut()))
    }

    fn validate(structure: &[RosterNode]) -> Result<()> {
        match duplicate_slot_id(structure) {
            Some(dup) => Err(SlotboardError::bad_request(format!(
                "duplicate slot id {dup} in structure"
            ))),
            None => Ok(()),
        }
    }

    fn missing(match_id: MatchId) -> SlotboardError {
        SlotboardError::not_found(format!("match {match_id} not found"))
    }
}
