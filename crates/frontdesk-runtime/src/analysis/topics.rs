//! Frequency-based topic extraction.
//!
//! Scans the recent message texts for an address: whitespace tokens,
//! dropping short tokens (≤ 4 chars) and stop words, then the top
//! `limit` by descending count with first-encountered order breaking ties.

use std::collections::HashMap;

/// Tokens carrying no topical signal despite their length.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "before", "being", "could", "doing", "every",
    "hello", "other", "please", "right", "should", "thanks", "their", "there", "these",
    "thing", "things", "those", "today", "where", "which", "while", "would", "yours",
];

/// Extract up to `limit` topics from `texts` (most recent first).
pub fn extract_topics(texts: &[String], limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    // Insertion order, for the first-encountered tie-break.
    let mut order: Vec<String> = Vec::new();

    for text in texts {
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            if token.chars().count() <= 4 || STOP_WORDS.contains(&token.as_str()) {
                continue;
            }
            match counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    let _ = counts.insert(token.clone(), 1);
                    order.push(token);
                }
            }
        }
    }

    // Stable sort keeps first-encountered order within equal counts.
    order.sort_by_key(|token| std::cmp::Reverse(counts[token]));
    order.truncate(limit);
    order
}
