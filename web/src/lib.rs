//! # Slotboard Web
//!
//! Axum HTTP surface for the Slotboard slotting service.
//!
//! This crate is deliberately thin: it extracts credentials from headers,
//! runs the gate chain the access table prescribes for each verb/path,
//! and delegates to the stores and engine in `slotboard-roster`. Slot
//! state is never touched directly here.
//!
//! # Request flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Extract credentials** from headers ([`extractors::Credentials`])
//! 3. **Authorize** via the gate chain for this verb/path
//! 4. **Delegate** to store/engine operations
//! 5. **Map result** to JSON; failures render `{ "message": … }`

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AppError, WebResult};
pub use routes::build_router;
pub use state::AppState;
