//! # Slotboard Core
//!
//! Domain types and pure logic for the Slotboard slotting service.
//!
//! Slotboard manages signup for scheduled group events hosted as forum
//! topics: each topic contains one or more matches, each match carries a
//! hierarchical roster of slots, and users claim or release individual
//! slots. This crate holds everything that can be expressed without I/O:
//!
//! - **Identifiers and entities** ([`types`]): id newtypes, the host-owned
//!   [`Topic`](types::Topic), share tokens, attendance-change signals.
//! - **The roster document** ([`roster`]): the nested group/slot tree that
//!   makes up a [`Match`](roster::Match), with traversal and validation.
//! - **Event date parsing** ([`event_date`]): extracting an event start
//!   instant from a free-text topic title.
//! - **The error taxonomy** ([`error`]): the failure categories every layer
//!   above maps onto HTTP statuses.
//!
//! Mutable state, storage, and the HTTP surface live in the `slotboard-roster`
//! and `slotboard-web` crates.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod error;
pub mod event_date;
pub mod roster;
pub mod types;

// Re-export main types for convenience
pub use error::{Result, SlotboardError};
pub use event_date::EventInfo;
pub use roster::{Match, RosterGroup, RosterNode, Slot};
pub use types::{
    AttendanceChange, CategoryId, MatchId, ShareToken, ShareTokenId, SlotId, Topic, TopicId, UserId,
};
