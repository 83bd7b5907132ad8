//! Stylistic reply variation.
//!
//! Applies an occasional small tweak to delegate replies so repeated
//! answers don't read identically. The random source is injected so tests
//! pin a seed and assert on the selection, not on exact text.

use rand::Rng;

/// Probability that any variation is applied at all.
const VARIATION_CHANCE: f64 = 0.3;

/// Maybe apply one stylistic variation to `text`.
pub fn apply_variation<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    if text.is_empty() || !rng.random_bool(VARIATION_CHANCE) {
        return text.to_owned();
    }
    match rng.random_range(0..4u8) {
        0 => swap_final_period(text, "!"),
        1 => swap_final_period(text, "..."),
        2 => lowercase_first(text),
        _ => {
            if rng.random_bool(0.5) {
                format!("{text} 😊")
            } else {
                text.to_owned()
            }
        }
    }
}

fn swap_final_period(text: &str, replacement: &str) -> String {
    text.strip_suffix('.')
        .map_or_else(|| text.to_owned(), |body| format!("{body}{replacement}"))
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
