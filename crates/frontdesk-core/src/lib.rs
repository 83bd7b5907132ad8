//! # frontdesk-core
//!
//! Foundation types and shared vocabulary for the Frontdesk conversation
//! engine:
//!
//! - **Address**: [`address::Address`] — branded identifier for a
//!   conversation participant, opaque to the engine
//! - **Messages**: [`message::MessageRecord`] with [`message::MessageRole`]
//!   and [`message::Sentiment`]
//! - **Session tags**: [`session::SessionState`] — the dialogue state
//!   machine vocabulary, round-tripping unknown tags verbatim
//! - **Business configuration**: [`config::BusinessConfig`], the tagged
//!   [`config::ResponseAction`] variant, intent rules
//! - **Events**: [`event::InboundMessage`] / [`event::OutboundMessage`] at
//!   the transport boundary
//! - **Text**: UTF-8–safe truncation and match normalization helpers
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other frontdesk crates.

#![deny(unsafe_code)]

pub mod address;
pub mod config;
pub mod event;
pub mod logging;
pub mod message;
pub mod session;
pub mod text;

pub use address::Address;
pub use config::{
    BehaviorRules, BusinessConfig, BusinessProfile, IntentRule, MenuOption, MessageTemplates,
    OperatingHours, Product, ResponseAction,
};
pub use event::{InboundMessage, OutboundMessage};
pub use message::{MessageRecord, MessageRole, Sentiment};
pub use session::SessionState;
