//! Tokens - the atoms of a pose timeline
//!
//! A token is either a phoneme key or a pause marker:
//! - `.` short pause, `..` medium pause, `...` long pause
//! - `?` / `!` emphasis pauses, which also steer the expression
//! - anything else is a phoneme label (`A`, `TH`, `7`, ...)

use std::fmt;
use std::str::FromStr;

use crate::{VisageError, VisageResult};

/// Plain pause length
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pause {
    /// `.`
    Short,
    /// `..`
    Medium,
    /// `...`
    Long,
}

/// Emphasis pause produced by sentence punctuation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// `?`
    Question,
    /// `!`
    Exclamation,
}

/// One unit of a sequenced timeline
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Phoneme label, usually a single uppercase letter or digit
    Phoneme(String),
    /// Silence of a given length
    Pause(Pause),
    /// Question or exclamation pause
    Emphasis(Emphasis),
}

impl Token {
    pub const SHORT_PAUSE: Token = Token::Pause(Pause::Short);
    pub const QUESTION: Token = Token::Emphasis(Emphasis::Question);
    pub const EXCLAMATION: Token = Token::Emphasis(Emphasis::Exclamation);

    /// Phoneme token from a label
    pub fn phoneme(label: impl Into<String>) -> Self {
        Token::Phoneme(label.into())
    }

    /// Parse the textual form of a token
    pub fn parse(text: &str) -> VisageResult<Self> {
        match text {
            "" => Err(VisageError::EmptyToken),
            "." => Ok(Token::Pause(Pause::Short)),
            ".." => Ok(Token::Pause(Pause::Medium)),
            "..." => Ok(Token::Pause(Pause::Long)),
            "?" => Ok(Token::QUESTION),
            "!" => Ok(Token::EXCLAMATION),
            label => Ok(Token::Phoneme(label.to_string())),
        }
    }

    /// Is this a pause marker (plain or emphasis)?
    #[inline]
    pub fn is_pause(&self) -> bool {
        !matches!(self, Token::Phoneme(_))
    }

    /// Is this a single-character vowel phoneme?
    pub fn is_vowel(&self) -> bool {
        match self {
            Token::Phoneme(label) => matches!(label.as_str(), "A" | "E" | "I" | "O" | "U"),
            _ => false,
        }
    }

    /// Phoneme label, if this is a phoneme token
    pub fn label(&self) -> Option<&str> {
        match self {
            Token::Phoneme(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Phoneme(label) => f.write_str(label),
            Token::Pause(Pause::Short) => f.write_str("."),
            Token::Pause(Pause::Medium) => f.write_str(".."),
            Token::Pause(Pause::Long) => f.write_str("..."),
            Token::Emphasis(Emphasis::Question) => f.write_str("?"),
            Token::Emphasis(Emphasis::Exclamation) => f.write_str("!"),
        }
    }
}

impl FromStr for Token {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

/// Textual form of a token list, for logging and assertions
pub fn token_labels(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(Token::to_string).collect()
}
