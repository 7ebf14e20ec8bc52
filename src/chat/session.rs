//! Chat widget state: open/closed flag, message history and in-flight sends.
//!
//! Each send is tagged with a monotonically increasing sequence number. A
//! reply is appended only if its send is still the most recent one, so a slow
//! response to a superseded message cannot land after a newer exchange.

use crate::chat::{ChatBackend, ChatMessage, ChatReply, Role};
use crate::persistence::SessionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key under which the open flag is persisted.
pub const SESSION_STATE_KEY: &str = "chatbot-state";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    is_open: bool,
}

/// A send that has been recorded locally and is awaiting its reply.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub seq: u64,
    pub text: String,
    /// Conversation as it stood before this message.
    pub prior: Vec<ChatMessage>,
}

pub struct ChatSession<S: SessionStore> {
    backend: Arc<dyn ChatBackend>,
    store: S,
    is_open: bool,
    is_loading: bool,
    messages: Vec<ChatMessage>,
    latest_seq: u64,
}

impl<S: SessionStore> ChatSession<S> {
    pub fn new(backend: Arc<dyn ChatBackend>, store: S) -> Self {
        Self {
            backend,
            store,
            is_open: false,
            is_loading: false,
            messages: Vec::new(),
            latest_seq: 0,
        }
    }

    /// Restore the open flag from the store. Missing or unreadable state
    /// leaves the widget closed.
    pub fn restore(&mut self) {
        let raw = match self.store.load(SESSION_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load chat session state");
                return;
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => self.is_open = state.is_open,
            Err(e) => tracing::warn!(error = %e, "Ignoring unparsable chat session state"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.persist();
        self.is_open
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.persist();
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Record the user's message and tag the send. Blank input is ignored.
    pub fn begin_send(&mut self, content: &str) -> Option<PendingSend> {
        let text = content.trim();
        if text.is_empty() {
            return None;
        }

        let prior = self.messages.clone();
        self.messages.push(ChatMessage::new(Role::User, text));
        self.latest_seq += 1;
        self.is_loading = true;

        Some(PendingSend {
            seq: self.latest_seq,
            text: text.to_string(),
            prior,
        })
    }

    /// Apply a reply. Returns `false` and drops the reply if a newer send has
    /// started since `pending` was issued.
    pub fn complete_send(&mut self, pending: &PendingSend, reply: ChatReply) -> bool {
        if pending.seq != self.latest_seq {
            tracing::debug!(
                seq = pending.seq,
                latest = self.latest_seq,
                "Dropping stale chat reply"
            );
            return false;
        }

        let mut message = ChatMessage::new(Role::Assistant, reply.response);
        if let Some(ts) = reply.timestamp {
            message.timestamp = Some(ts);
        }
        self.messages.push(message);
        self.is_loading = false;
        true
    }

    /// Send a message and apply the reply.
    pub async fn send_message(&mut self, content: &str) -> bool {
        let Some(pending) = self.begin_send(content) else {
            return false;
        };
        let backend = Arc::clone(&self.backend);
        let reply = backend.send_message(&pending.text, &pending.prior).await;
        self.complete_send(&pending, reply)
    }

    fn persist(&self) {
        let state = PersistedState {
            is_open: self.is_open,
        };
        let result = serde_json::to_string(&state)
            .map_err(crate::error::AppError::from)
            .and_then(|raw| self.store.save(SESSION_STATE_KEY, &raw));

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist chat session state");
        }
    }
}
