//! Invariant checks and end-to-end tests
//!
//! Checks that hold for every playback:
//! - Frames never go back in time
//! - Generations never go back (no interleaving after supersession)
//! - Playback ends on a resting pose, never a phoneme pose
//! - Playback time is exactly the sum of the token delays

use std::time::Duration;

use visage_core::{PoseKey, ResolvedPose, Token};
use visage_runtime::{PlayerConfig, RecordedPose};

use crate::{Frame, SessionReport, Timeline};

/// Violations found by a check
#[derive(Clone, Debug, Default)]
pub struct InvariantReport {
    pub violations: Vec<String>,
}

impl InvariantReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    fn fail(&mut self, violation: String) {
        self.violations.push(violation);
    }
}

fn check_ordering(frames: &[Frame], report: &mut InvariantReport) {
    for (i, pair) in frames.windows(2).enumerate() {
        if pair[1].at < pair[0].at {
            report.fail(format!("frame {} goes back in time", i + 1));
        }
        if pair[1].generation < pair[0].generation {
            report.fail(format!(
                "frame {} from generation {} after generation {}",
                i + 1,
                pair[1].generation,
                pair[0].generation
            ));
        }
    }
}

/// Check a single simulated utterance
pub fn check_timeline(timeline: &Timeline, config: &PlayerConfig) -> InvariantReport {
    let mut report = InvariantReport::default();
    check_ordering(&timeline.frames, &mut report);

    match timeline.final_pose() {
        Some(pose) if pose == ResolvedPose::resting(timeline.effective) => {}
        Some(pose) => report.fail(format!("ends on {} instead of {}", pose.key, timeline.effective)),
        None => report.fail("no frames".to_string()),
    }

    let expected = config.timing.total(&timeline.tokens);
    if timeline.duration() != expected {
        report.fail(format!(
            "duration {:?} differs from delay sum {:?}",
            timeline.duration(),
            expected
        ));
    }

    let phoneme_tokens = timeline
        .tokens
        .iter()
        .filter(|t| matches!(t, Token::Phoneme(_)))
        .count();
    let phoneme_frames = timeline.phoneme_frames().count();
    if phoneme_tokens != phoneme_frames {
        report.fail(format!(
            "{phoneme_tokens} phoneme tokens but {phoneme_frames} phoneme frames"
        ));
    }

    report
}

/// Check a replayed session
pub fn check_session(session: &SessionReport) -> InvariantReport {
    let mut report = InvariantReport::default();
    check_ordering(&session.frames, &mut report);

    if let Some(last) = session.frames.last() {
        if last.key().is_phoneme() {
            report.fail(format!("session ends on phoneme pose {}", last.key()));
        }
    }
    report
}

/// Recorded poses as offsets from the first one
pub fn relative_keys(recorded: &[RecordedPose]) -> Vec<(Duration, PoseKey)> {
    let Some(start) = recorded.first().map(|r| r.at) else {
        return Vec::new();
    };
    recorded
        .iter()
        .map(|r| (r.at.duration_since(start), r.pose.key))
        .collect()
}

/// Frames as offsets and keys, for comparison with [`relative_keys`]
pub fn frame_keys(frames: &[Frame]) -> Vec<(Duration, PoseKey)> {
    frames.iter().map(|f| (f.at, f.key())).collect()
}
