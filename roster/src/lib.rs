//! # Slotboard Roster
//!
//! The stateful heart of the slotting service: match and share-token
//! stores, the slot assignment engine, reservations, the access-control
//! gate, and the auto-unslot service.
//!
//! Everything the host forum platform owns — topics, identity, group
//! permissions, notification delivery — is reached through the traits in
//! [`providers`]. The [`mocks`] module (default `test-utils` feature)
//! provides in-memory implementations for tests and local development;
//! [`providers::http`] provides the reqwest-backed production wiring.
//!
//! # Concurrency
//!
//! All slot state lives in [`store::MatchStore`]. Claim and release are
//! check-and-mutate operations executed under the store's per-match write
//! guard, which makes them linearizable per slot: of two concurrent claims
//! on the same empty slot, exactly one succeeds.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod engine;
pub mod gate;
pub mod providers;
pub mod reservations;
pub mod store;
pub mod unslot;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use engine::SlotAssignmentEngine;
pub use gate::{AccessGate, Caller, GateConfig};
pub use providers::{AttendancePermissions, NotificationSink, TopicRepository, UnslotNotice};
pub use reservations::ReservationManager;
pub use store::{MatchStore, ShareTokenStore};
pub use unslot::{AutoUnslotService, SlotRemoval, UnslotOutcome};
