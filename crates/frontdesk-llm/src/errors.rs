//! Delegate error types.
//!
//! Every variant is recovered at the orchestration boundary — a delegate
//! failure never reaches the contact raw; it enters the fallback chain.

use thiserror::Error;

/// Errors from the generative-text delegate.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// No API key configured; the delegate is disabled.
    #[error("delegate disabled: no API key configured")]
    Disabled,

    /// Transport-level failure reaching the service.
    #[error("delegate network error: {0}")]
    Network(reqwest::Error),

    /// The bounded request timeout elapsed. Treated identically to any
    /// other delegate failure.
    #[error("delegate call timed out")]
    Timeout,

    /// Non-2xx response status.
    #[error("delegate returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// 2xx response whose body does not match the expected schema.
    #[error("delegate response invalid: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for DelegateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// Crate-local result alias.
pub type DelegateResult<T> = std::result::Result<T, DelegateError>;
