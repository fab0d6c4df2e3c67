//! Sequencer - text to pose token timeline
//!
//! Per word:
//! 1. Strip one trailing punctuation mark (`. ! ? , ; :`) and remember it
//! 2. Drop every non-alphanumeric character
//! 3. Lexicon hit → the entry's labels, else one token per letter and
//!    `N <digit>` per digit
//! 4. Append the pause group chosen by the remembered mark
//!
//! Sequencing never fails: unmapped characters are dropped, and any
//! label without a pose resolves to `rest` at playback time.

use visage_core::Token;

use crate::lexicon;

/// Trailing punctuation that selects a word's pause group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Period,
    Exclamation,
    Question,
    Comma,
    Semicolon,
    Colon,
}

impl Punctuation {
    /// Recognise a punctuation mark
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Punctuation::Period),
            '!' => Some(Punctuation::Exclamation),
            '?' => Some(Punctuation::Question),
            ',' => Some(Punctuation::Comma),
            ';' => Some(Punctuation::Semicolon),
            ':' => Some(Punctuation::Colon),
            _ => None,
        }
    }

    /// Tokens appended after a word ending in this mark
    pub fn pause_tokens(self) -> &'static [Token] {
        const QUESTION: &[Token] = &[Token::QUESTION, Token::SHORT_PAUSE, Token::SHORT_PAUSE];
        const EXCLAMATION: &[Token] =
            &[Token::EXCLAMATION, Token::SHORT_PAUSE, Token::SHORT_PAUSE];
        const SENTENCE: &[Token] = &[Token::SHORT_PAUSE, Token::SHORT_PAUSE, Token::SHORT_PAUSE];
        const CLAUSE: &[Token] = &[Token::SHORT_PAUSE, Token::SHORT_PAUSE];
        const BREATH: &[Token] = &[Token::SHORT_PAUSE];

        match self {
            Punctuation::Question => QUESTION,
            Punctuation::Exclamation => EXCLAMATION,
            Punctuation::Period => SENTENCE,
            Punctuation::Semicolon | Punctuation::Colon => CLAUSE,
            Punctuation::Comma => BREATH,
        }
    }
}

/// Pause group for an unpunctuated word
const WORD_GAP: &[Token] = &[Token::SHORT_PAUSE];

/// Split a single trailing punctuation mark off a word
pub fn split_trailing_mark(word: &str) -> (&str, Option<Punctuation>) {
    match word.chars().next_back() {
        Some(last) => match Punctuation::from_char(last) {
            Some(mark) => (&word[..word.len() - last.len_utf8()], Some(mark)),
            None => (word, None),
        },
        None => (word, None),
    }
}

/// Keep only ASCII letters and digits
pub fn clean_word(word: &str) -> String {
    word.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Sequence text into an ordered token list
///
/// Deterministic and total. Empty or whitespace-only text yields an
/// empty list.
pub fn sequence(text: &str) -> Vec<Token> {
    let upper = text.to_uppercase();
    let mut tokens = Vec::new();

    for word in upper.split_whitespace() {
        sequence_word(word, &mut tokens);
    }

    tokens
}

fn sequence_word(word: &str, tokens: &mut Vec<Token>) {
    let (body, mark) = split_trailing_mark(word);
    let clean = clean_word(body);

    if let Some(labels) = lexicon::lookup_labels(&clean) {
        tokens.extend(labels.map(Token::phoneme));
    } else {
        for c in clean.chars() {
            if c.is_ascii_digit() {
                // Digits are narrated crudely as `N` followed by the digit itself
                tokens.push(Token::phoneme("N"));
            }
            tokens.push(Token::Phoneme(c.to_string()));
        }
    }

    let pause = match mark {
        Some(mark) => mark.pause_tokens(),
        None => WORD_GAP,
    };
    tokens.extend_from_slice(pause);
}
