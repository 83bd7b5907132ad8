//! # frontdesk-llm
//!
//! The generative-text delegate boundary:
//!
//! - **[`delegate::AiDelegate`]**: the trait the orchestrator calls on
//!   fallback — one assembled context in, one reply out
//! - **[`chat_completion::ChatCompletionDelegate`]**: OpenAI-compatible
//!   chat-completions HTTP provider with bounded timeout and strict
//!   response validation (non-2xx and schema-invalid bodies are failures)
//! - **[`variation`]**: the occasional stylistic reply tweak, driven by an
//!   injected random source
//!
//! ## Crate Position
//!
//! External-service boundary. Depends on: frontdesk-core,
//! frontdesk-settings. Depended on by: frontdesk-runtime.

#![deny(unsafe_code)]

pub mod chat_completion;
pub mod delegate;
pub mod errors;
pub mod types;
pub mod variation;

pub use chat_completion::{ChatCompletionConfig, ChatCompletionDelegate};
pub use delegate::{AiDelegate, GenerateOptions};
pub use errors::{DelegateError, DelegateResult};
