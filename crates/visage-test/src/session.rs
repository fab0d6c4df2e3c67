//! Session Simulator - replay speak/stop schedules on a virtual clock
//!
//! Mirrors the player's supersession rules without a runtime: each
//! speak or stop bumps the generation and discards the in-flight
//! utterance before anything else happens. When a step falls due at the
//! same instant as an event, the event wins.

use std::time::Duration;

use visage_core::{Expression, ResolvedPose};
use visage_runtime::{PlayerConfig, StepOutcome, Utterance};

use crate::Frame;

/// Something the caller does to the player
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Speak { text: String, expression: Expression },
    Stop,
    SetExpression(Expression),
}

/// An event at a virtual instant
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub at: Duration,
    pub event: SessionEvent,
}

impl ScheduledEvent {
    pub fn speak(at_ms: u64, text: &str, expression: Expression) -> Self {
        ScheduledEvent {
            at: Duration::from_millis(at_ms),
            event: SessionEvent::Speak {
                text: text.to_string(),
                expression,
            },
        }
    }

    pub fn stop(at_ms: u64) -> Self {
        ScheduledEvent {
            at: Duration::from_millis(at_ms),
            event: SessionEvent::Stop,
        }
    }

    pub fn set_expression(at_ms: u64, expression: Expression) -> Self {
        ScheduledEvent {
            at: Duration::from_millis(at_ms),
            event: SessionEvent::SetExpression(expression),
        }
    }
}

/// Frames and counters of a finished session
#[derive(Clone, Debug, Default)]
pub struct SessionReport {
    pub frames: Vec<Frame>,
    pub generation: u64,
    pub completed: u64,
    pub superseded: u64,
    pub stopped: u64,
}

pub struct SessionSimulator {
    config: PlayerConfig,
    base: Expression,
    active: Expression,
    /// In-flight utterance and the instant its next step is due
    current: Option<(Utterance, Duration)>,
    clock: Duration,
    report: SessionReport,
}

impl SessionSimulator {
    /// Start idle, showing the configured initial expression
    pub fn new(config: PlayerConfig) -> Self {
        let initial = config.initial_expression;
        let mut report = SessionReport::default();
        report.frames.push(Frame {
            at: Duration::ZERO,
            generation: 0,
            pose: ResolvedPose::resting(initial),
        });
        SessionSimulator {
            config,
            base: initial,
            active: initial,
            current: None,
            clock: Duration::ZERO,
            report,
        }
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    pub fn expression(&self) -> Expression {
        self.active
    }

    /// Run every step due strictly before `until`
    pub fn advance_to(&mut self, until: Duration) {
        while let Some((utterance, due)) = self.current.as_mut() {
            if *due >= until {
                break;
            }
            let at = *due;
            let generation = utterance.generation();
            let frames = &mut self.report.frames;
            let outcome = utterance.step(&mut self.active, &self.config, &mut |pose| {
                frames.push(Frame {
                    at,
                    generation,
                    pose,
                })
            });
            match outcome {
                StepOutcome::Continue(delay) => *due += delay,
                StepOutcome::Finished => {
                    self.current = None;
                    self.report.completed += 1;
                    self.clock = self.clock.max(at);
                }
            }
        }
        if until != Duration::MAX {
            self.clock = self.clock.max(until);
        }
    }

    pub fn speak(&mut self, text: &str, requested: Expression) {
        self.report.generation += 1;
        if self.current.take().is_some() {
            self.report.superseded += 1;
        }
        let utterance = Utterance::new(self.report.generation, text, requested);
        self.active = utterance.effective();
        self.push(utterance.baseline());
        self.current = Some((utterance, self.clock));
    }

    pub fn stop(&mut self) {
        self.report.generation += 1;
        if let Some((utterance, _)) = self.current.take() {
            self.active = utterance.effective();
            self.report.stopped += 1;
        }
        self.push(ResolvedPose::resting(self.active));
    }

    pub fn set_expression(&mut self, expression: Expression) {
        self.base = expression;
        if self.current.is_none() {
            self.active = expression;
            self.push(ResolvedPose::resting(expression));
        }
    }

    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Speak { text, expression } => self.speak(text, *expression),
            SessionEvent::Stop => self.stop(),
            SessionEvent::SetExpression(expression) => self.set_expression(*expression),
        }
    }

    /// Let the current utterance finish and hand back the report
    pub fn finish(mut self) -> SessionReport {
        self.advance_to(Duration::MAX);
        self.report
    }

    fn push(&mut self, pose: ResolvedPose) {
        self.report.frames.push(Frame {
            at: self.clock,
            generation: self.report.generation,
            pose,
        });
    }
}

/// Replay `events` (in time order) and run to completion
pub fn run_session(config: PlayerConfig, mut events: Vec<ScheduledEvent>) -> SessionReport {
    events.sort_by_key(|e| e.at);
    let mut sim = SessionSimulator::new(config);
    for scheduled in &events {
        sim.advance_to(scheduled.at);
        sim.apply(&scheduled.event);
    }
    sim.finish()
}
