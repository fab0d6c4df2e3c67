//! Head driver - props-style control of a player
//!
//! UI frameworks push the whole state (speaking flag, current message,
//! expression) on every change. The driver turns those snapshots into
//! player calls and remembers the last spoken message so a re-render
//! does not restart the same reply.

use std::sync::Arc;

use visage_core::Expression;

use crate::UtterancePlayer;

/// Snapshot of the head's inputs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadProps {
    pub is_speaking: bool,
    pub message: String,
    pub expression: Expression,
}

impl HeadProps {
    pub fn speaking(message: impl Into<String>, expression: Expression) -> Self {
        HeadProps {
            is_speaking: true,
            message: message.into(),
            expression,
        }
    }

    pub fn idle(expression: Expression) -> Self {
        HeadProps {
            is_speaking: false,
            message: String::new(),
            expression,
        }
    }
}

/// What an update did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadAction {
    Spoke,
    Stopped,
    Unchanged,
}

pub struct HeadDriver {
    player: Arc<UtterancePlayer>,
    last_message: Option<String>,
}

impl HeadDriver {
    pub fn new(player: Arc<UtterancePlayer>) -> Self {
        HeadDriver {
            player,
            last_message: None,
        }
    }

    pub fn player(&self) -> &Arc<UtterancePlayer> {
        &self.player
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Apply a full props snapshot
    pub fn update(&mut self, props: &HeadProps) -> HeadAction {
        if !props.is_speaking {
            self.player.stop_speaking();
            self.player.set_expression(props.expression);
            return HeadAction::Stopped;
        }
        self.speak_if_new(&props.message, props.expression)
    }

    /// A message arrived without a speaking flag
    pub fn message_changed(&mut self, message: &str, expression: Expression) -> HeadAction {
        self.speak_if_new(message, expression)
    }

    fn speak_if_new(&mut self, message: &str, expression: Expression) -> HeadAction {
        // Whitespace-only messages are skipped rather than played as an
        // utterance with no tokens
        if message.trim().is_empty() || self.last_message.as_deref() == Some(message) {
            return HeadAction::Unchanged;
        }
        self.last_message = Some(message.to_string());
        self.player.speak(message, expression);
        HeadAction::Spoke
    }
}
