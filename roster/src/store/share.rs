//! Share-token issue and validation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use dashmap::DashMap;
use rand::RngCore;
use slotboard_core::{MatchId, Result, ShareToken, ShareTokenId, SlotboardError, TopicId};

/// Number of random bytes behind each secret (32 base64 characters).
const SECRET_BYTES: usize = 24;

/// Store of per-match capability tokens.
///
/// A token grants claim/release access on exactly one match's slots to
/// whoever presents the matching secret, with no login required. Tokens
/// carry no expiry: one token grants standing write access until it is
/// explicitly revoked or its match is deleted.
#[derive(Debug, Default)]
pub struct ShareTokenStore {
    tokens: DashMap<ShareTokenId, ShareToken>,
}

impl ShareTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new token for a match.
    pub fn create(&self, topic_id: TopicId, match_id: MatchId) -> ShareToken {
        let token = ShareToken {
            id: ShareTokenId::new(),
            topic_id,
            match_id,
            secret: generate_secret(),
        };
        self.tokens.insert(token.id, token.clone());
        tracing::info!(%topic_id, %match_id, token_id = %token.id, "share token created");
        token
    }

    /// Fetch one token by id, scoped to its match.
    ///
    /// # Errors
    ///
    /// `NotFound` if the token does not exist or belongs to a different
    /// `(topic, match)` pair.
    pub fn get(
        &self,
        topic_id: TopicId,
        match_id: MatchId,
        token_id: ShareTokenId,
    ) -> Result<ShareToken> {
        self.tokens
            .get(&token_id)
            .filter(|entry| entry.topic_id == topic_id && entry.match_id == match_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SlotboardError::not_found(format!("share token {token_id} not found")))
    }

    /// All tokens of a match, ordered by token id for stable listings.
    #[must_use]
    pub fn list(&self, topic_id: TopicId, match_id: MatchId) -> Vec<ShareToken> {
        let mut found: Vec<ShareToken> = self
            .tokens
            .iter()
            .filter(|entry| entry.topic_id == topic_id && entry.match_id == match_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|token| *token.id.as_uuid());
        found
    }

    /// Whether `secret` is valid for the given match.
    ///
    /// A secret minted for one match never validates for another, even
    /// under the same topic. Comparison is constant-time per candidate.
    #[must_use]
    pub fn validate(&self, topic_id: TopicId, match_id: MatchId, secret: &str) -> bool {
        let mut valid = false;
        for entry in self.tokens.iter() {
            if entry.topic_id == topic_id && entry.match_id == match_id {
                valid |= constant_time_eq::constant_time_eq(
                    secret.as_bytes(),
                    entry.secret.as_bytes(),
                );
            }
        }
        valid
    }

    /// Revoke every token of a match. Returns how many were removed.
    ///
    /// Also called when the match itself is deleted, so no token outlives
    /// its match.
    pub fn delete_for_match(&self, topic_id: TopicId, match_id: MatchId) -> usize {
        let doomed: Vec<ShareTokenId> = self
            .tokens
            .iter()
            .filter(|entry| entry.topic_id == topic_id && entry.match_id == match_id)
            .map(|entry| *entry.key())
            .collect();
        for id in &doomed {
            self.tokens.remove(id);
        }
        if !doomed.is_empty() {
            tracing::info!(%topic_id, %match_id, removed = doomed.len(), "share tokens revoked");
        }
        doomed.len()
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_scoped_to_one_match() {
        let store = ShareTokenStore::new();
        let nine = MatchId::new();
        let ten = MatchId::new();
        let token = store.create(TopicId(5), nine);

        assert!(store.validate(TopicId(5), nine, &token.secret));
        assert!(!store.validate(TopicId(5), ten, &token.secret));
        assert!(!store.validate(TopicId(6), nine, &token.secret));
        assert!(!store.validate(TopicId(5), nine, "bogus"));
    }

    #[test]
    fn test_get_enforces_scope() {
        let store = ShareTokenStore::new();
        let match_id = MatchId::new();
        let token = store.create(TopicId(5), match_id);

        assert_eq!(store.get(TopicId(5), match_id, token.id).unwrap(), token);
        assert!(store.get(TopicId(5), MatchId::new(), token.id).is_err());
        assert!(store.get(TopicId(6), match_id, token.id).is_err());
    }

    #[test]
    fn test_delete_for_match_removes_only_that_match() {
        let store = ShareTokenStore::new();
        let first = MatchId::new();
        let second = MatchId::new();
        store.create(TopicId(5), first);
        store.create(TopicId(5), first);
        let survivor = store.create(TopicId(5), second);

        assert_eq!(store.delete_for_match(TopicId(5), first), 2);
        assert!(store.list(TopicId(5), first).is_empty());
        assert_eq!(store.list(TopicId(5), second), vec![survivor]);
    }

    #[test]
    fn test_secrets_are_unique_and_url_safe() {
        let store = ShareTokenStore::new();
        let match_id = MatchId::new();
        let a = store.create(TopicId(1), match_id);
        let b = store.create(TopicId(1), match_id);

        assert_ne!(a.secret, b.secret);
        assert!(a
            .secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
