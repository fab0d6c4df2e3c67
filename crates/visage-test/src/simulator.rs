//! Utterance Simulator - deterministic playback on a virtual clock
//!
//! Runs the same step machine the player uses, but advances a plain
//! `Duration` instead of sleeping, and records every pose as a frame.

use std::time::Duration;

use visage_core::{Expression, PoseKey, ResolvedPose, Token};
use visage_runtime::{PlayerConfig, StepOutcome, Utterance};

/// One pose applied at a virtual instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Offset from the start of the simulation
    pub at: Duration,
    /// Generation that produced the frame (0 = before any utterance)
    pub generation: u64,
    pub pose: ResolvedPose,
}

impl Frame {
    pub fn key(&self) -> PoseKey {
        self.pose.key
    }
}

/// Result of simulating one utterance
#[derive(Clone, Debug)]
pub struct Timeline {
    pub text: String,
    pub effective: Expression,
    pub tokens: Vec<Token>,
    pub frames: Vec<Frame>,
}

impl Timeline {
    /// Instant of the last frame
    pub fn duration(&self) -> Duration {
        self.frames.last().map(|f| f.at).unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<PoseKey> {
        self.frames.iter().map(Frame::key).collect()
    }

    /// Frames showing a phoneme (or the rest fallback)
    pub fn phoneme_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| f.pose.key.is_phoneme())
    }

    pub fn final_pose(&self) -> Option<ResolvedPose> {
        self.frames.last().map(|f| f.pose)
    }
}

/// Step `utterance` to completion from `start`, appending frames
///
/// Returns the virtual instant of the final frame.
pub fn play_to_end(
    utterance: &mut Utterance,
    active: &mut Expression,
    config: &PlayerConfig,
    start: Duration,
    frames: &mut Vec<Frame>,
) -> Duration {
    let generation = utterance.generation();
    let mut clock = start;
    loop {
        let at = clock;
        let outcome = utterance.step(active, config, &mut |pose| {
            frames.push(Frame {
                at,
                generation,
                pose,
            })
        });
        match outcome {
            StepOutcome::Continue(delay) => clock += delay,
            StepOutcome::Finished => return clock,
        }
    }
}

/// Simulate speaking `text` from a standing start
pub fn simulate(text: &str, requested: Expression, config: &PlayerConfig) -> Timeline {
    let mut utterance = Utterance::new(1, text, requested);
    let mut active = utterance.effective();
    let mut frames = vec![Frame {
        at: Duration::ZERO,
        generation: 1,
        pose: utterance.baseline(),
    }];
    play_to_end(&mut utterance, &mut active, config, Duration::ZERO, &mut frames);

    Timeline {
        text: text.to_string(),
        effective: utterance.effective(),
        tokens: utterance.tokens().to_vec(),
        frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_hi() {
        let timeline = simulate("Hi!", Expression::Neutral, &PlayerConfig::default());

        assert_eq!(timeline.effective, Expression::Surprised);
        assert_eq!(timeline.tokens.len(), 6);
        // baseline + six tokens + final rest
        assert_eq!(timeline.frames.len(), 8);
        assert_eq!(timeline.duration(), Duration::from_millis(930));
        assert_eq!(timeline.phoneme_frames().count(), 3);
        assert_eq!(
            timeline.final_pose().unwrap().key,
            PoseKey::Expression(Expression::Surprised)
        );
    }

    #[test]
    fn test_frame_instants() {
        let timeline = simulate("ma", Expression::Happy, &PlayerConfig::default());
        let at: Vec<u64> = timeline
            .frames
            .iter()
            .map(|f| f.at.as_millis() as u64)
            .collect();
        // baseline, M, A, pause, final
        assert_eq!(at, vec![0, 0, 120, 300, 400]);
    }

    #[test]
    fn test_simulate_empty() {
        let timeline = simulate("", Expression::Sad, &PlayerConfig::default());
        assert!(timeline.tokens.is_empty());
        assert_eq!(timeline.duration(), Duration::ZERO);
        assert_eq!(
            timeline.keys(),
            vec![
                PoseKey::Expression(Expression::Sad),
                PoseKey::Expression(Expression::Sad),
            ]
        );
    }

    #[test]
    fn test_fast_config_halves_duration() {
        let normal = simulate("the quick brown fox", Expression::Neutral, &PlayerConfig::default());
        let fast = simulate("the quick brown fox", Expression::Neutral, &PlayerConfig::fast());
        assert_eq!(fast.duration() * 2, normal.duration());
    }
}
