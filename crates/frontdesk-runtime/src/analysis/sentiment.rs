//! Lexicon-containment sentiment.
//!
//! Deliberately crude: fixed lexicons, substring containment over the
//! normalized text, neutral default. A text hitting both lexicons resolves
//! to positive.

use frontdesk_core::Sentiment;
use frontdesk_core::text::normalize;

const POSITIVE: &[&str] = &[
    "thanks", "thank you", "great", "awesome", "perfect", "excellent", "love", "nice",
    "wonderful", "happy", "good",
];

const NEGATIVE: &[&str] = &[
    "terrible", "awful", "horrible", "angry", "hate", "problem", "broken", "wrong",
    "complaint", "upset", "bad", "annoyed",
];

/// Classify one message text.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let normalized = normalize(text);
    let positive = POSITIVE.iter().any(|w| normalized.contains(w));
    let negative = NEGATIVE.iter().any(|w| normalized.contains(w));
    match (positive, negative) {
        // Mixed signals resolve to positive.
        (true, _) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        (false, false) => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_hits_classify() {
        assert_eq!(analyze_sentiment("Thanks, that was GREAT"), Sentiment::Positive);
        assert_eq!(analyze_sentiment("this is broken and I'm angry"), Sentiment::Negative);
        assert_eq!(analyze_sentiment("what time do you open"), Sentiment::Neutral);
    }

    #[test]
    fn mixed_text_resolves_positive() {
        assert_eq!(
            analyze_sentiment("had a problem but the fix was great"),
            Sentiment::Positive
        );
    }
}
