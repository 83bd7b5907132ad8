//! The outbound transport seam.
//!
//! Pairing, linking, and low-level delivery live outside this workspace;
//! the engine only needs "send this text to this address" with an outcome.

use async_trait::async_trait;
use frontdesk_core::Address;

use crate::errors::TransportError;

/// Outbound message delivery.
///
/// Delivery is at-least-once from the engine's point of view: a failed
/// send is logged and dropped, never retried against committed state.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one reply.
    async fn deliver(&self, address: &Address, text: &str) -> Result<(), TransportError>;
}
