//! Pose sinks - where resolved poses go
//!
//! The engine never reaches into rendering internals. It hands each
//! resolved pose to a [`PoseSink`]; a sink that fails is logged and
//! skipped, never allowed to stop playback.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;
use visage_core::{PoseKey, ResolvedPose, VisageResult};

/// Consumer of resolved poses
///
/// Called with the player's state lock held: implementations must not
/// call back into the player.
pub trait PoseSink: Send + Sync {
    /// Show a pose
    fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()>;
}

impl<S: PoseSink + ?Sized> PoseSink for Arc<S> {
    fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()> {
        (**self).apply_pose(pose)
    }
}

/// Sink backed by an infallible closure
pub struct FnSink<F>(pub F);

impl<F> PoseSink for FnSink<F>
where
    F: Fn(&ResolvedPose) + Send + Sync,
{
    fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()> {
        (self.0)(pose);
        Ok(())
    }
}

/// A pose together with the instant it was applied
#[derive(Clone, Copy, Debug)]
pub struct RecordedPose {
    pub at: Instant,
    pub pose: ResolvedPose,
}

/// Sink that keeps every pose it receives
#[derive(Default)]
pub struct RecordingSink {
    poses: Mutex<Vec<RecordedPose>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn recorded(&self) -> Vec<RecordedPose> {
        self.poses.lock().clone()
    }

    /// Keys of every recorded pose, in order
    pub fn keys(&self) -> Vec<PoseKey> {
        self.poses.lock().iter().map(|r| r.pose.key).collect()
    }

    /// Most recent pose
    pub fn last(&self) -> Option<ResolvedPose> {
        self.poses.lock().last().map(|r| r.pose)
    }

    pub fn len(&self) -> usize {
        self.poses.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.lock().is_empty()
    }

    pub fn clear(&self) {
        self.poses.lock().clear();
    }
}

impl PoseSink for RecordingSink {
    fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()> {
        self.poses.lock().push(RecordedPose {
            at: Instant::now(),
            pose: *pose,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use visage_core::Expression;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.apply_pose(&PoseKey::Phoneme('A').resolve()).unwrap();
        sink.apply_pose(&ResolvedPose::resting(Expression::Happy)).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.keys(),
            vec![PoseKey::Phoneme('A'), PoseKey::Expression(Expression::Happy)]
        );
        assert_eq!(sink.last().unwrap().key, PoseKey::Expression(Expression::Happy));

        sink.clear();
        assert!(sink.last().is_none());
    }

    #[test]
    fn test_fn_sink_and_arc_forwarding() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let sink: Arc<dyn PoseSink> = Arc::new(FnSink(move |_: &ResolvedPose| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let shared = sink.clone();
        shared.apply_pose(&PoseKey::Rest.resolve()).unwrap();
        sink.apply_pose(&PoseKey::Rest.resolve()).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
