//! Emotion detection - expression from raw text
//!
//! Evaluated once per utterance over the raw, unstripped text.
//! Keyword matching is case-insensitive substring matching, so
//! "goodness" counts as "good". First rule to match wins:
//!
//! 1. `?` anywhere → thinking
//! 2. `!` anywhere → happy / angry by exclamation keywords, else surprised
//! 3. keyword families → happy, sad, angry, surprised, thinking
//! 4. neutral

use visage_core::Expression;

/// Positive words that turn an exclamation happy
pub const EXCLAIM_POSITIVE: &[&str] = &[
    "great", "awesome", "excellent", "amazing", "wonderful", "fantastic", "good", "nice", "love",
    "happy", "glad", "joy", "yay", "hurray",
];

/// Negative words that turn an exclamation angry
pub const EXCLAIM_NEGATIVE: &[&str] = &[
    "terrible", "awful", "bad", "hate", "angry", "mad", "furious", "upset", "annoyed",
    "frustrated", "stupid", "idiot", "fool",
];

/// Keyword families checked in order when there is no `?` or `!`
pub const KEYWORD_FAMILIES: &[(Expression, &[&str])] = &[
    (
        Expression::Happy,
        &[
            "happy", "joy", "glad", "delighted", "pleased", "cheerful", "content", "satisfied",
            "thrilled", "excited",
        ],
    ),
    (
        Expression::Sad,
        &[
            "sad", "unhappy", "depressed", "miserable", "gloomy", "disappointed", "upset",
            "heartbroken", "grief", "sorrow",
        ],
    ),
    (
        Expression::Angry,
        &[
            "angry", "mad", "furious", "outraged", "enraged", "irritated", "annoyed",
            "frustrated", "hostile", "resentful",
        ],
    ),
    (
        Expression::Surprised,
        &[
            "surprised", "amazed", "astonished", "shocked", "startled", "stunned", "astounded",
            "dumbfounded", "flabbergasted", "wonder",
        ],
    ),
    (
        Expression::Thinking,
        &[
            "think", "consider", "ponder", "contemplate", "reflect", "meditate", "deliberate",
            "analyze", "evaluate", "assess",
        ],
    ),
];

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Detect the expression suggested by a text
pub fn detect_emotion(text: &str) -> Expression {
    if text.contains('?') {
        return Expression::Thinking;
    }

    let lower = text.to_lowercase();

    if text.contains('!') {
        return if contains_any(&lower, EXCLAIM_POSITIVE) {
            Expression::Happy
        } else if contains_any(&lower, EXCLAIM_NEGATIVE) {
            Expression::Angry
        } else {
            Expression::Surprised
        };
    }

    KEYWORD_FAMILIES
        .iter()
        .find(|(_, words)| contains_any(&lower, words))
        .map(|(expression, _)| *expression)
        .unwrap_or(Expression::Neutral)
}

/// Resolve the expression an utterance plays with
///
/// A neutral request defers to the detected expression; anything else
/// is taken as an explicit choice.
pub fn effective_expression(requested: Expression, text: &str) -> Expression {
    if requested.is_neutral() {
        detect_emotion(text)
    } else {
        requested
    }
}
