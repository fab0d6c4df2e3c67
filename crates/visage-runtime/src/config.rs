//! Player configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use visage_core::{Expression, VisageError, VisageResult};
use visage_speech::TimingPolicy;

/// Utterance player configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Per-token delay table
    pub timing: TimingPolicy,
    /// Reassert the base expression every N tokens (0 = never)
    pub reassert_every: usize,
    /// Expression shown before anything is spoken
    pub initial_expression: Expression,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            timing: TimingPolicy::default(),
            reassert_every: 20,
            initial_expression: Expression::Neutral,
        }
    }
}

impl PlayerConfig {
    /// Twice-as-fast playback, for demos and previews
    pub fn fast() -> Self {
        PlayerConfig {
            timing: TimingPolicy::default().scaled(0.5),
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> VisageResult<Self> {
        let config: PlayerConfig =
            serde_json::from_str(json).map_err(|e| VisageError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> VisageResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject configurations the scheduler cannot run
    pub fn validate(&self) -> VisageResult<()> {
        if self.timing.min_delay_ms() == 0 {
            return Err(VisageError::InvalidConfig(
                "token delays must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.reassert_every, 20);
        assert_eq!(config.timing.vowel_ms, 180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fast_preset() {
        let config = PlayerConfig::fast();
        assert_eq!(config.timing.consonant_ms, 60);
        assert_eq!(config.reassert_every, 20);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PlayerConfig::from_json_str(
            r#"{"initial_expression": "happy", "timing": {"emphasis_ms": 400}}"#,
        )
        .unwrap();
        assert_eq!(config.initial_expression, Expression::Happy);
        assert_eq!(config.timing.emphasis_ms, 400);
        assert_eq!(config.timing.short_pause_ms, 100);
    }

    #[test]
    fn test_zero_delay_rejected() {
        let err = PlayerConfig::from_json_str(r#"{"timing": {"vowel_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, VisageError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = PlayerConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, VisageError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_expression_rejected() {
        assert!(PlayerConfig::from_json_str(r#"{"initial_expression": "sleepy"}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PlayerConfig::load("/nonexistent/visage.json").unwrap_err();
        assert!(matches!(err, VisageError::ConfigIo(_)));
    }
}
