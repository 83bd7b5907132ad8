//! Lightweight per-message classification: sentiment and topics.

pub mod sentiment;
pub mod topics;

pub use sentiment::analyze_sentiment;
pub use topics::extract_topics;
