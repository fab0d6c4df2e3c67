//! Utterance - one playback session as a step machine
//!
//! The utterance knows nothing about timers. Each call to
//! [`Utterance::step`] shows one token and returns how long to wait
//! before the next call; the scheduler owns the waiting.

use std::time::Duration;

use visage_core::{Emphasis, Expression, PoseKey, ResolvedPose, Token};
use visage_speech::{effective_expression, sequence};

use crate::PlayerConfig;

/// Result of one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A token was shown; step again after this delay
    Continue(Duration),
    /// Tokens exhausted; the resting pose has been applied
    Finished,
}

/// In-flight playback state
#[derive(Clone, Debug)]
pub struct Utterance {
    /// Generation this utterance belongs to
    generation: u64,
    /// Source text
    text: String,
    /// Sequenced tokens
    tokens: Vec<Token>,
    /// Index of the next token to show
    cursor: usize,
    /// Expression the utterance plays with
    effective: Expression,
}

impl Utterance {
    /// Prepare an utterance: resolve its expression and sequence its text
    pub fn new(generation: u64, text: &str, requested: Expression) -> Self {
        Utterance {
            generation,
            text: text.to_string(),
            tokens: sequence(text),
            cursor: 0,
            effective: effective_expression(requested, text),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Expression the utterance plays with
    pub fn effective(&self) -> Expression {
        self.effective
    }

    /// Tokens not yet shown
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Resting pose applied when playback starts and ends
    pub fn baseline(&self) -> ResolvedPose {
        ResolvedPose::resting(self.effective)
    }

    /// Does the token at `index` reassert the base expression?
    fn reasserts_at(&self, index: usize, every: usize) -> bool {
        every > 0 && index > 0 && index + 1 < self.tokens.len() && index % every == 0
    }

    /// Show the next token, emitting exactly one pose
    ///
    /// `active` is the player's current expression: punctuation may
    /// override it, the periodic reset and the end of the utterance
    /// restore it to the effective expression.
    pub fn step(
        &mut self,
        active: &mut Expression,
        config: &PlayerConfig,
        emit: &mut dyn FnMut(ResolvedPose),
    ) -> StepOutcome {
        let Some(token) = self.tokens.get(self.cursor) else {
            *active = self.effective;
            emit(self.baseline());
            return StepOutcome::Finished;
        };

        match token {
            Token::Emphasis(Emphasis::Question) => *active = Expression::Thinking,
            Token::Emphasis(Emphasis::Exclamation) => *active = Expression::Surprised,
            _ if self.reasserts_at(self.cursor, config.reassert_every) => *active = self.effective,
            _ => {}
        }

        let key = match token {
            Token::Phoneme(label) => PoseKey::for_phoneme(label),
            _ => PoseKey::Expression(*active),
        };
        emit(key.resolve());

        let delay = config.timing.delay_for(token);
        self.cursor += 1;
        StepOutcome::Continue(delay)
    }
}
