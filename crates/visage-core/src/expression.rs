//! Expression - the emotional affect of the head
//!
//! An expression is independent of moment-to-moment mouth shape:
//! - It selects the resting pose shown while idle
//! - It selects the pose shown during pause tokens
//! - It can be requested explicitly, derived from text, or overridden by punctuation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::VisageError;

/// Six-way emotional affect state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    /// Resting face, also the "no preference" request
    #[default]
    Neutral,
    Happy,
    Sad,
    /// Shown for questions
    Thinking,
    /// Shown for exclamations
    Surprised,
    Angry,
}

impl Expression {
    /// All expressions in declaration order
    pub const ALL: [Expression; 6] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Sad,
        Expression::Thinking,
        Expression::Surprised,
        Expression::Angry,
    ];

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Thinking => "thinking",
            Expression::Surprised => "surprised",
            Expression::Angry => "angry",
        }
    }

    /// Parse from a name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Expression::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(name))
    }

    /// Is this the neutral expression?
    ///
    /// A neutral request defers to the expression detected from the text.
    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Expression::Neutral
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expression {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::from_name(s).ok_or_else(|| VisageError::UnknownExpression(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_names_roundtrip() {
        for expression in Expression::ALL {
            assert_eq!(expression.as_str().parse::<Expression>().unwrap(), expression);
        }
    }

    #[test]
    fn test_expression_parse_is_case_insensitive() {
        assert_eq!(Expression::from_name(" Happy "), Some(Expression::Happy));
        assert_eq!(Expression::from_name("ANGRY"), Some(Expression::Angry));
    }

    #[test]
    fn test_unknown_expression() {
        let err = "sleepy".parse::<Expression>().unwrap_err();
        assert!(matches!(err, VisageError::UnknownExpression(name) if name == "sleepy"));
    }

    #[test]
    fn test_default_is_neutral() {
        assert!(Expression::default().is_neutral());
        assert!(!Expression::Thinking.is_neutral());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Expression::Surprised.to_string(), "surprised");
    }
}
