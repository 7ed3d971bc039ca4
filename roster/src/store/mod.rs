//! Owning stores for matches and share tokens.
//!
//! Both stores are concurrent in-memory tables. Match and share-token
//! state is owned exclusively by this service; the host platform never
//! sees it.

pub mod matches;
pub mod share;

pub use matches::MatchStore;
pub use share::ShareTokenStore;
