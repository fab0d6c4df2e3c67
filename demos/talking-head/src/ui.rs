//! Terminal rendering of poses

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use visage_core::{PoseGeometry, ResolvedPose, VisageError, VisageResult};
use visage_runtime::PoseSink;

/// Draws the face on a fixed terminal row
pub struct TerminalSink {
    row: u16,
}

impl TerminalSink {
    pub fn new(row: u16) -> Self {
        TerminalSink { row }
    }
}

impl PoseSink for TerminalSink {
    fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()> {
        check_drawable(pose)?;
        let mut out = io::stdout().lock();
        queue!(
            out,
            SavePosition,
            MoveTo(0, self.row),
            Clear(ClearType::CurrentLine),
            Print(render_face(pose)),
            RestorePosition
        )
        .and_then(|_| out.flush())
        .map_err(|e| VisageError::SinkUnavailable(e.to_string()))
    }
}

/// Reject geometry the mouth glyphs cannot be sized from
pub fn check_drawable(pose: &ResolvedPose) -> VisageResult<()> {
    let PoseGeometry {
        mouth_width,
        mouth_height,
        ..
    } = pose.geometry;
    let sized = |v: f32| v.is_finite() && v >= 0.0;
    if !(sized(mouth_width) && sized(mouth_height)) {
        return Err(VisageError::SinkRejected(format!(
            "{}: mouth {mouth_width}x{mouth_height}",
            pose.key
        )));
    }
    Ok(())
}

/// One-line face: eyes, mouth and the pose name
pub fn render_face(pose: &ResolvedPose) -> String {
    format!("   (o o)   {:^16}   [{}]", render_mouth(&pose.geometry), pose.key)
}

/// Mouth glyphs sized from the pose geometry
pub fn render_mouth(geometry: &PoseGeometry) -> String {
    let cols = ((geometry.mouth_width / 5.0).round() as usize).clamp(2, 14);
    let fill = if geometry.shows_tongue() { "▂" } else { " " };

    if geometry.mouth_height <= 12.0 {
        "━".repeat(cols)
    } else if geometry.mouth_height < 30.0 {
        format!("[{}]", fill.repeat(cols))
    } else {
        format!("({})", fill.repeat(cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::{phoneme_pose, Expression, PoseKey};

    fn mouth(label: &str) -> String {
        render_mouth(phoneme_pose(label).unwrap())
    }

    #[test]
    fn test_closed_lips() {
        assert_eq!(mouth("M"), "━".repeat(11));
    }

    #[test]
    fn test_open_vowel_shows_tongue() {
        assert_eq!(mouth("A"), format!("({})", "▂".repeat(10)));
    }

    #[test]
    fn test_lip_on_teeth() {
        assert_eq!(mouth("F"), format!("[{}]", " ".repeat(11)));
    }

    #[test]
    fn test_table_poses_are_drawable() {
        for expression in Expression::ALL {
            assert!(check_drawable(&ResolvedPose::resting(expression)).is_ok());
        }
        for c in "ABEFILMOSTU".chars() {
            assert!(check_drawable(&PoseKey::Phoneme(c).resolve()).is_ok());
        }
    }

    #[test]
    fn test_broken_geometry_rejected() {
        let mut pose = PoseKey::Phoneme('A').resolve();
        pose.geometry.mouth_width = f32::NAN;
        // rejected before anything is written to the terminal
        let err = TerminalSink::new(0).apply_pose(&pose).unwrap_err();
        assert!(matches!(err, VisageError::SinkRejected(_)));

        pose.geometry.mouth_width = 40.0;
        pose.geometry.mouth_height = -1.0;
        assert!(matches!(check_drawable(&pose), Err(VisageError::SinkRejected(_))));
    }

    #[test]
    fn test_face_names_pose() {
        let face = render_face(&ResolvedPose::resting(Expression::Happy));
        assert!(face.ends_with("[happy]"));
        let face = render_face(&PoseKey::Phoneme('O').resolve());
        assert!(face.ends_with("[O]"));
    }
}
