//! Timing policy - how long each token holds the screen
//!
//! The delay table is the only source of playback time: the total
//! duration of a timeline is the exact sum of its per-token delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use visage_core::{Emphasis, Pause, Token};

/// Per-token delay table, in milliseconds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingPolicy {
    /// `.`
    pub short_pause_ms: u64,
    /// `..`
    pub medium_pause_ms: u64,
    /// `...`
    pub long_pause_ms: u64,
    /// `?` and `!`
    pub emphasis_ms: u64,
    /// Single-character vowel
    pub vowel_ms: u64,
    /// Consonant, digit or any other label
    pub consonant_ms: u64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        TimingPolicy {
            short_pause_ms: 100,
            medium_pause_ms: 200,
            long_pause_ms: 300,
            emphasis_ms: 250,
            vowel_ms: 180,
            consonant_ms: 120,
        }
    }
}

impl TimingPolicy {
    /// Uniformly scale every delay (0.5 = twice as fast)
    ///
    /// Delays never scale below one millisecond.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| ((ms as f64 * factor).round() as u64).max(1);
        TimingPolicy {
            short_pause_ms: scale(self.short_pause_ms),
            medium_pause_ms: scale(self.medium_pause_ms),
            long_pause_ms: scale(self.long_pause_ms),
            emphasis_ms: scale(self.emphasis_ms),
            vowel_ms: scale(self.vowel_ms),
            consonant_ms: scale(self.consonant_ms),
        }
    }

    /// Delay after showing a token
    pub fn delay_for(&self, token: &Token) -> Duration {
        let ms = match token {
            Token::Pause(Pause::Short) => self.short_pause_ms,
            Token::Pause(Pause::Medium) => self.medium_pause_ms,
            Token::Pause(Pause::Long) => self.long_pause_ms,
            Token::Emphasis(Emphasis::Question | Emphasis::Exclamation) => self.emphasis_ms,
            token if token.is_vowel() => self.vowel_ms,
            Token::Phoneme(_) => self.consonant_ms,
        };
        Duration::from_millis(ms)
    }

    /// Pair each token with its delay
    pub fn timeline(&self, tokens: &[Token]) -> Vec<TimedToken> {
        tokens
            .iter()
            .map(|token| TimedToken {
                token: token.clone(),
                duration: self.delay_for(token),
            })
            .collect()
    }

    /// Total playback time of a token list
    pub fn total(&self, tokens: &[Token]) -> Duration {
        tokens.iter().map(|token| self.delay_for(token)).sum()
    }

    /// Smallest delay in the table
    pub fn min_delay_ms(&self) -> u64 {
        [
            self.short_pause_ms,
            self.medium_pause_ms,
            self.long_pause_ms,
            self.emphasis_ms,
            self.vowel_ms,
            self.consonant_ms,
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }
}

/// A token with the time it holds before the next one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedToken {
    pub token: Token,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence;

    #[test]
    fn test_delay_table() {
        let policy = TimingPolicy::default();
        let ms = |text: &str| policy.delay_for(&Token::parse(text).unwrap()).as_millis();
        assert_eq!(ms("."), 100);
        assert_eq!(ms(".."), 200);
        assert_eq!(ms("..."), 300);
        assert_eq!(ms("?"), 250);
        assert_eq!(ms("!"), 250);
        assert_eq!(ms("A"), 180);
        assert_eq!(ms("U"), 180);
        assert_eq!(ms("M"), 120);
        assert_eq!(ms("7"), 120);
        assert_eq!(ms("TH"), 120);
    }

    #[test]
    fn test_total_is_exact_sum() {
        let policy = TimingPolicy::default();
        // H A I ! . .
        let tokens = sequence("Hi!");
        assert_eq!(policy.total(&tokens), Duration::from_millis(120 + 180 + 180 + 250 + 100 + 100));
        let summed: Duration = policy.timeline(&tokens).iter().map(|t| t.duration).sum();
        assert_eq!(summed, policy.total(&tokens));
    }

    #[test]
    fn test_empty_total() {
        assert_eq!(TimingPolicy::default().total(&[]), Duration::ZERO);
    }

    #[test]
    fn test_scaled() {
        let fast = TimingPolicy::default().scaled(0.5);
        assert_eq!(fast.short_pause_ms, 50);
        assert_eq!(fast.vowel_ms, 90);
        assert_eq!(TimingPolicy::default().scaled(0.0).min_delay_ms(), 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy: TimingPolicy = serde_json::from_str(r#"{"vowel_ms": 200}"#).unwrap();
        assert_eq!(policy.vowel_ms, 200);
        assert_eq!(policy.consonant_ms, 120);
    }
}
