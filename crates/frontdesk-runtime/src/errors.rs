//! Runtime error taxonomy.
//!
//! Everything here is recovered at the orchestration boundary: the contact
//! always receives a substantive reply or a generic apology, never a raw
//! error. Variants exist so the recovery policy can tell the cases apart.

use frontdesk_llm::DelegateError;
use frontdesk_store::StoreError;
use thiserror::Error;

/// Errors inside one orchestration turn.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Malformed or irrelevant inbound event — dropped silently.
    #[error("invalid inbound event: {0}")]
    Validation(&'static str),

    /// The persistence layer failed; the turn degrades instead of dying.
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// The generative delegate failed; enters the fallback chain.
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

/// Outbound delivery failure. Logged, non-fatal; committed session and
/// message state is never rolled back because of one.
#[derive(Debug, Error)]
#[error("transport send failed: {0}")]
pub struct TransportError(pub String);
