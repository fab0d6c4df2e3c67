//! Chat responses - the notification the player listens to
//!
//! Whatever produces assistant replies publishes a [`ChatResponse`] on a
//! [`ChatResponseHub`]. The hub is an ordinary value owned by the
//! application; there is no process-wide bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use visage_core::Expression;
use visage_speech::classify_reply;

use crate::UtterancePlayer;

/// An assistant reply, optionally tagged with an expression
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
}

impl ChatResponse {
    /// Untagged reply
    pub fn new(message: impl Into<String>) -> Self {
        ChatResponse {
            message: message.into(),
            expression: None,
        }
    }

    /// Reply tagged by the keyword mood classifier
    pub fn classified(message: impl Into<String>) -> Self {
        let message = message.into();
        let expression = Some(classify_reply(&message));
        ChatResponse {
            message,
            expression,
        }
    }

    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = Some(expression);
        self
    }
}

/// Receiver of chat responses
pub trait ChatResponseListener: Send + Sync {
    fn on_chat_response(&self, response: &ChatResponse);
}

impl ChatResponseListener for UtterancePlayer {
    /// Speak non-blank replies; untagged ones use the base expression
    fn on_chat_response(&self, response: &ChatResponse) {
        // A blank reply would only flash the baseline and resting poses
        if response.message.trim().is_empty() {
            return;
        }
        let expression = response.expression.unwrap_or_else(|| self.base_expression());
        self.speak(&response.message, expression);
    }
}

/// Handle returned by [`ChatResponseHub::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of chat-response listeners
#[derive(Default)]
pub struct ChatResponseHub {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn ChatResponseListener>)>>,
}

impl ChatResponseHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn ChatResponseListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Deliver to every listener; returns how many were reached
    ///
    /// Listeners run outside the registry lock and may subscribe or
    /// unsubscribe from within the callback.
    pub fn publish(&self, response: &ChatResponse) -> usize {
        let listeners: Vec<_> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in &listeners {
            listener.on_chat_response(response);
        }
        listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

/// Pump a channel of responses into `hub` until every sender is gone
pub fn forward_responses(
    mut rx: mpsc::Receiver<ChatResponse>,
    hub: Arc<ChatResponseHub>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let reached = hub.publish(&response);
            debug!(reached, chars = response.message.len(), "chat response published");
        }
        debug!("chat response channel closed");
    })
}
