//! Reply mood - coarse expression for an assistant reply
//!
//! A lighter classifier than [`detect_emotion`](crate::detect_emotion),
//! used by the chat side to tag a reply before it is spoken.

use visage_core::Expression;

use crate::emotion::contains_any;

const MOOD_RULES: &[(Expression, &[&str])] = &[
    (Expression::Sad, &["error", "sorry", "cannot"]),
    (Expression::Happy, &["great", "happy", "excellent"]),
    (Expression::Thinking, &["hmm", "let me think", "interesting"]),
    (Expression::Surprised, &["wow", "amazing", "incredible"]),
];

/// Classify a reply by case-insensitive keyword search
pub fn classify_reply(message: &str) -> Expression {
    let lower = message.to_lowercase();
    MOOD_RULES
        .iter()
        .find(|(_, words)| contains_any(&lower, words))
        .map(|(expression, _)| *expression)
        .unwrap_or(Expression::Neutral)
}
