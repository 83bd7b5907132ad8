//! The `AiDelegate` trait — the seam the orchestrator depends on.

use async_trait::async_trait;
use frontdesk_core::Sentiment;

use crate::errors::DelegateResult;

/// Per-call generation options.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOptions {
    /// Sentiment of the inbound message; negative turns generate with a
    /// lower temperature so the reply stays careful.
    pub sentiment: Sentiment,
}

/// A generative-text service invoked on fallback.
///
/// Implementations must be cheap to share (`Arc`) and must bound their own
/// I/O; the runtime additionally wraps calls in its own timeout so a
/// misbehaving implementation cannot stall per-address processing.
#[async_trait]
pub trait AiDelegate: Send + Sync {
    /// Generate one reply from the assembled context.
    async fn generate(&self, context: &str, opts: GenerateOptions) -> DelegateResult<String>;
}
