//! Utterance player - cancellable timer-driven playback
//!
//! One task per utterance. The task steps the utterance under the state
//! lock and sleeps between steps with the lock released. Every `speak()`
//! and `stop_speaking()` bumps the generation under the same lock, so a
//! step that wakes up after being superseded sees a stale generation and
//! returns without touching the sink.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};
use visage_core::{Expression, ResolvedPose, VisageError, VisageResult};

use crate::{PlayerConfig, PoseSink, StepOutcome, Utterance};

/// Playback counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub utterances_started: u64,
    pub utterances_completed: u64,
    pub utterances_superseded: u64,
    pub utterances_stopped: u64,
    pub steps: u64,
    pub stale_steps: u64,
    pub sink_failures: u64,
}

struct PlayerState {
    generation: u64,
    /// Expression requested by the caller
    base: Expression,
    /// Expression currently shown between phonemes
    active: Expression,
    utterance: Option<Utterance>,
    task: Option<JoinHandle<()>>,
    stats: PlayerStats,
}

struct Shared {
    state: Mutex<PlayerState>,
    sink: Arc<dyn PoseSink>,
    config: PlayerConfig,
}

/// Hand a pose to the sink; failures are counted and logged, never raised
fn emit(sink: &dyn PoseSink, stats: &mut PlayerStats, pose: &ResolvedPose) {
    if let Err(error) = sink.apply_pose(pose) {
        stats.sink_failures += 1;
        warn!(%error, pose = %pose.key, "pose sink failed");
    }
}

impl Shared {
    /// Run one step of `generation`; `None` ends the task
    fn step(&self, generation: u64) -> Option<Duration> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.generation != generation {
            state.stats.stale_steps += 1;
            trace!(generation, current = state.generation, "stale step dropped");
            return None;
        }
        let utterance = state.utterance.as_mut()?;

        let sink = self.sink.as_ref();
        let stats = &mut state.stats;
        let outcome = utterance.step(&mut state.active, &self.config, &mut |pose| {
            emit(sink, stats, &pose)
        });
        state.stats.steps += 1;

        match outcome {
            StepOutcome::Continue(delay) => {
                trace!(generation, cursor = utterance.cursor(), ?delay, "step");
                Some(delay)
            }
            StepOutcome::Finished => {
                debug!(generation, expression = %state.active, "utterance finished");
                state.utterance = None;
                state.task = None;
                state.stats.utterances_completed += 1;
                None
            }
        }
    }
}

async fn run(shared: Arc<Shared>, generation: u64) {
    while let Some(delay) = shared.step(generation) {
        tokio::time::sleep(delay).await;
    }
}

/// Drives a pose sink from text, one utterance at a time
pub struct UtterancePlayer {
    shared: Arc<Shared>,
    handle: Handle,
}

impl UtterancePlayer {
    /// Create a player on the current tokio runtime
    pub fn new<S: PoseSink + 'static>(sink: S, config: PlayerConfig) -> VisageResult<Self> {
        let handle = Handle::try_current().map_err(|e| VisageError::NoRuntime(e.to_string()))?;
        Self::with_handle(sink, config, handle)
    }

    /// Create a player that spawns its playback tasks on `handle`
    ///
    /// The initial expression's resting pose is applied right away.
    pub fn with_handle<S: PoseSink + 'static>(
        sink: S,
        config: PlayerConfig,
        handle: Handle,
    ) -> VisageResult<Self> {
        config.validate()?;

        let initial = config.initial_expression;
        let sink: Arc<dyn PoseSink> = Arc::new(sink);
        let mut stats = PlayerStats::default();
        emit(sink.as_ref(), &mut stats, &ResolvedPose::resting(initial));

        let state = PlayerState {
            generation: 0,
            base: initial,
            active: initial,
            utterance: None,
            task: None,
            stats,
        };

        Ok(UtterancePlayer {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                sink,
                config,
            }),
            handle,
        })
    }

    /// Start speaking `text`, replacing whatever is playing
    ///
    /// A neutral request lets the text choose the expression. Returns
    /// immediately; the first step runs on the player's runtime.
    pub fn speak(&self, text: &str, requested: Expression) {
        let mut state = self.shared.state.lock();

        state.generation += 1;
        let generation = state.generation;
        if let Some(task) = state.task.take() {
            task.abort();
        }
        if state.utterance.take().is_some() {
            state.stats.utterances_superseded += 1;
        }

        let utterance = Utterance::new(generation, text, requested);
        debug!(
            generation,
            tokens = utterance.tokens().len(),
            expression = %utterance.effective(),
            "utterance started"
        );

        state.active = utterance.effective();
        state.stats.utterances_started += 1;
        emit(self.shared.sink.as_ref(), &mut state.stats, &utterance.baseline());
        state.utterance = Some(utterance);

        let task = self.handle.spawn(run(Arc::clone(&self.shared), generation));
        state.task = Some(task);
    }

    /// Cancel playback and rest on the utterance's effective expression
    ///
    /// A `?`/`!` override ends with the utterance it came from.
    pub fn stop_speaking(&self) {
        let mut state = self.shared.state.lock();

        state.generation += 1;
        if let Some(task) = state.task.take() {
            task.abort();
        }
        if let Some(utterance) = state.utterance.take() {
            state.active = utterance.effective();
            state.stats.utterances_stopped += 1;
            info!(generation = state.generation, expression = %state.active, "playback stopped");
        }

        let pose = ResolvedPose::resting(state.active);
        emit(self.shared.sink.as_ref(), &mut state.stats, &pose);
    }

    /// Set the caller's expression
    ///
    /// While idle the new expression is shown at once; while speaking it
    /// takes effect from the next utterance.
    pub fn set_expression(&self, expression: Expression) {
        let mut state = self.shared.state.lock();
        state.base = expression;
        if state.utterance.is_none() {
            state.active = expression;
            emit(
                self.shared.sink.as_ref(),
                &mut state.stats,
                &ResolvedPose::resting(expression),
            );
        }
    }

    /// Expression currently shown between phonemes
    pub fn expression(&self) -> Expression {
        self.shared.state.lock().active
    }

    /// Expression last requested through [`set_expression`](Self::set_expression)
    pub fn base_expression(&self) -> Expression {
        self.shared.state.lock().base
    }

    pub fn is_speaking(&self) -> bool {
        self.shared.state.lock().utterance.is_some()
    }

    /// Current generation; bumped by every speak and stop
    pub fn generation(&self) -> u64 {
        self.shared.state.lock().generation
    }

    pub fn stats(&self) -> PlayerStats {
        self.shared.state.lock().stats.clone()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.shared.config
    }
}

impl Drop for UtterancePlayer {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.generation += 1;
        state.utterance = None;
        if let Some(task) = state.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSink;
    use visage_core::PoseKey;

    fn player_with(config: PlayerConfig) -> (UtterancePlayer, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let player = UtterancePlayer::new(Arc::clone(&sink), config).unwrap();
        (player, sink)
    }

    fn player() -> (UtterancePlayer, Arc<RecordingSink>) {
        player_with(PlayerConfig::default())
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    struct PhonemeRejectingSink {
        inner: RecordingSink,
    }

    impl PoseSink for PhonemeRejectingSink {
        fn apply_pose(&self, pose: &ResolvedPose) -> VisageResult<()> {
            if pose.key.is_phoneme() {
                return Err(VisageError::SinkUnavailable("canvas detached".to_string()));
            }
            self.inner.apply_pose(pose)
        }
    }

    #[test]
    fn test_new_outside_runtime() {
        let result = UtterancePlayer::new(RecordingSink::new(), PlayerConfig::default());
        assert!(matches!(result, Err(VisageError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = PlayerConfig::default();
        config.timing.emphasis_ms = 0;
        let result = UtterancePlayer::new(RecordingSink::new(), config);
        assert!(matches!(result, Err(VisageError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_expression_applied() {
        let config = PlayerConfig {
            initial_expression: Expression::Happy,
            ..PlayerConfig::default()
        };
        let (player, sink) = player_with(config);
        assert_eq!(sink.keys(), vec![PoseKey::Expression(Expression::Happy)]);
        assert_eq!(player.expression(), Expression::Happy);
        assert!(!player.is_speaking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_speak_plays_in_order_then_rests() {
        let (player, sink) = player();
        player.speak("hi", Expression::Sad);
        assert!(player.is_speaking());

        settle().await;

        assert_eq!(
            sink.keys(),
            vec![
                PoseKey::Expression(Expression::Neutral),
                PoseKey::Expression(Expression::Sad),
                PoseKey::Rest,
                PoseKey::Phoneme('A'),
                PoseKey::Phoneme('I'),
                PoseKey::Expression(Expression::Sad),
                PoseKey::Expression(Expression::Sad),
            ]
        );
        assert!(!player.is_speaking());

        let stats = player.stats();
        assert_eq!(stats.utterances_started, 1);
        assert_eq!(stats.utterances_completed, 1);
        assert_eq!(stats.steps, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_time_is_delay_sum() {
        let (player, sink) = player();
        player.speak("Hi!", Expression::Neutral);
        settle().await;

        let recorded = sink.recorded();
        let baseline = recorded[1].at;
        let last = recorded[recorded.len() - 1].at;
        // H A I ! . .
        assert_eq!(last - baseline, Duration::from_millis(120 + 180 + 180 + 250 + 100 + 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_before_first_step() {
        let (player, sink) = player();
        player.speak("AA", Expression::Neutral);
        player.speak("BB", Expression::Neutral);
        settle().await;

        let keys = sink.keys();
        assert!(!keys.contains(&PoseKey::Phoneme('A')));
        assert_eq!(keys.iter().filter(|k| **k == PoseKey::Phoneme('B')).count(), 2);

        let stats = player.stats();
        assert_eq!(stats.utterances_started, 2);
        assert_eq!(stats.utterances_superseded, 1);
        assert_eq!(stats.utterances_completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_mid_utterance() {
        let (player, sink) = player();
        player.speak("mmmmmmmm", Expression::Neutral);
        // M steps at 0, 120 and 240ms
        tokio::time::sleep(Duration::from_millis(250)).await;
        player.speak("bb", Expression::Neutral);
        settle().await;

        let keys = sink.keys();
        let first_b = keys
            .iter()
            .position(|k| *k == PoseKey::Phoneme('B'))
            .unwrap();
        assert_eq!(keys.iter().filter(|k| **k == PoseKey::Phoneme('M')).count(), 3);
        assert!(!keys[first_b..].contains(&PoseKey::Phoneme('M')));
        assert_eq!(sink.last().unwrap().key, PoseKey::Expression(Expression::Neutral));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_speaking() {
        let (player, sink) = player();
        player.speak("hello there friend", Expression::Happy);
        tokio::time::sleep(Duration::from_millis(200)).await;

        player.stop_speaking();
        assert!(!player.is_speaking());
        assert_eq!(sink.last().unwrap().key, PoseKey::Expression(Expression::Happy));

        let len = sink.len();
        settle().await;
        assert_eq!(sink.len(), len);
        assert_eq!(player.stats().utterances_stopped, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_question_restores_expression() {
        let (player, sink) = player();
        player.speak("no? ok", Expression::Happy);
        // past the `?` step at 300ms
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(player.expression(), Expression::Thinking);

        player.stop_speaking();
        assert_eq!(sink.last().unwrap().key, PoseKey::Expression(Expression::Happy));
        assert_eq!(player.expression(), Expression::Happy);

        settle().await;
        assert_eq!(player.expression(), Expression::Happy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_idle_shows_expression() {
        let (player, sink) = player();
        player.stop_speaking();
        assert_eq!(sink.len(), 2);
        assert_eq!(player.stats().utterances_stopped, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_rests_immediately() {
        let (player, sink) = player();
        player.speak("   ", Expression::Happy);
        settle().await;

        assert_eq!(
            sink.keys(),
            vec![
                PoseKey::Expression(Expression::Neutral),
                PoseKey::Expression(Expression::Happy),
                PoseKey::Expression(Expression::Happy),
            ]
        );
        assert_eq!(player.stats().utterances_completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_tolerated() {
        let sink = Arc::new(PhonemeRejectingSink {
            inner: RecordingSink::new(),
        });
        let player = UtterancePlayer::new(Arc::clone(&sink), PlayerConfig::default()).unwrap();
        player.speak("hi", Expression::Neutral);
        settle().await;

        let stats = player.stats();
        // H (rest), A and I are rejected
        assert_eq!(stats.sink_failures, 3);
        assert_eq!(stats.utterances_completed, 1);
        assert_eq!(
            sink.inner.last().unwrap().key,
            PoseKey::Expression(Expression::Neutral)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_expression() {
        let (player, sink) = player();
        player.set_expression(Expression::Angry);
        assert_eq!(sink.last().unwrap().key, PoseKey::Expression(Expression::Angry));
        assert_eq!(player.expression(), Expression::Angry);

        player.speak("mmmm", Expression::Sad);
        let len = sink.len();
        player.set_expression(Expression::Happy);
        assert_eq!(sink.len(), len);
        assert_eq!(player.base_expression(), Expression::Happy);
        assert_eq!(player.expression(), Expression::Sad);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_step_is_dropped() {
        let (player, sink) = player();
        player.speak("abc", Expression::Neutral);
        let stale = player.generation() - 1;
        let len = sink.len();

        assert_eq!(player.shared.step(stale), None);
        assert_eq!(sink.len(), len);
        assert_eq!(player.stats().stale_steps, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_bumps() {
        let (player, _sink) = player();
        assert_eq!(player.generation(), 0);
        player.speak("one", Expression::Neutral);
        player.stop_speaking();
        player.speak("two", Expression::Neutral);
        assert_eq!(player.generation(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_playback() {
        let (player, sink) = player();
        player.speak("a long sentence to speak", Expression::Neutral);
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(player);

        let len = sink.len();
        settle().await;
        assert_eq!(sink.len(), len);
    }
}
