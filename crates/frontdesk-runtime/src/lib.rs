//! # frontdesk-runtime
//!
//! The dialogue-orchestration engine:
//!
//! - **Matcher**: resolves inbound text + session state + configuration to
//!   exactly one action, with deterministic precedence and tie-breaks
//! - **Orchestrator**: the state machine — consumes matcher output,
//!   produces replies and the next session state, runs the AI fallback
//!   chain, and recovers every error into a substantive reply
//! - **Context builder**: bounded history + business metadata → one prompt
//!   for the generative delegate
//! - **Analysis**: lexicon sentiment and frequency-based topic extraction
//! - **Dispatcher**: per-address FIFO serialization, transport delivery,
//!   and the catch-all error boundary
//!
//! ## Crate Position
//!
//! Aggregation layer. Depends on: frontdesk-core, frontdesk-settings,
//! frontdesk-store, frontdesk-llm.

#![deny(unsafe_code)]

pub mod analysis;
pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod hours;
pub mod matcher;
pub mod menu;
pub mod orchestrator;
pub mod store;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use errors::{RuntimeError, TransportError};
pub use matcher::{Match, resolve};
pub use orchestrator::{Orchestrator, TurnResult};
pub use store::{ConversationStore, SqliteConversationStore};
pub use transport::Transport;
