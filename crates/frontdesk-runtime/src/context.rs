//! Context assembly for the generative delegate.
//!
//! Bounded history plus business metadata, rendered as one text block.
//! History arrives most-recent-first from the store and is reversed here
//! so the delegate reads it chronologically.

use frontdesk_core::config::BusinessConfig;
use frontdesk_core::text::truncate_with_suffix;
use frontdesk_core::{MessageRecord, Sentiment};

/// Marker rendered when the business has no available products.
pub const NO_PRODUCTS_MARKER: &str = "No products configured.";

/// Marker rendered when the address has no prior history.
pub const NO_HISTORY_MARKER: &str = "No prior history.";

/// Longest rendered history line body before truncation.
const HISTORY_LINE_MAX_BYTES: usize = 280;

/// Everything the prompt is assembled from.
pub struct ContextInput<'a> {
    /// Active business configuration.
    pub config: &'a BusinessConfig,
    /// Recent history, most recent first (as fetched).
    pub history: &'a [MessageRecord],
    /// Extracted conversation topics.
    pub topics: &'a [String],
    /// Sentiment of the inbound message.
    pub sentiment: Sentiment,
    /// The inbound message itself (not yet part of history).
    pub user_message: &'a str,
}

/// Assemble the delegate prompt.
pub fn build_context(input: &ContextInput<'_>) -> String {
    let config = input.config;
    let mut out = format!(
        "You are the virtual assistant for {} ({}). Keep replies short and \
         friendly (1-2 sentences), use at most one emoji, and say so plainly \
         when you don't know something.\n\n",
        config.business_name, config.business_type
    );

    out.push_str("Products:\n");
    let available: Vec<_> = config.products.iter().filter(|p| p.available).collect();
    if available.is_empty() {
        out.push_str(NO_PRODUCTS_MARKER);
        out.push('\n');
    } else {
        for product in available {
            out.push_str(&format!(
                "- {} ({}): {:.2} — {}\n",
                product.name, product.category, product.price, product.description
            ));
        }
    }

    if input.topics.is_empty() {
        out.push_str("\nRecent topics: none\n");
    } else {
        out.push_str(&format!("\nRecent topics: {}\n", input.topics.join(", ")));
    }

    match input.sentiment {
        Sentiment::Negative => {
            out.push_str("The contact seems upset. Be empathetic and careful.\n");
        }
        Sentiment::Positive => {
            out.push_str("The contact is in a good mood. Feel free to be lighter.\n");
        }
        Sentiment::Neutral => {}
    }

    out.push_str("\nConversation so far:\n");
    if input.history.is_empty() {
        out.push_str(NO_HISTORY_MARKER);
        out.push('\n');
    } else {
        // Fetched most-recent-first; render chronologically.
        for record in input.history.iter().rev() {
            out.push_str(&format!(
                "{}: {}\n",
                record.role.as_str(),
                truncate_with_suffix(&record.content, HISTORY_LINE_MAX_BYTES, "...")
            ));
        }
    }

    out.push_str(&format!("\nuser: {}\nassistant:", input.user_message.trim()));
    out
}
