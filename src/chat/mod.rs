//! Chat assistant: the upstream proxy, its canned fallbacks, and the widget
//! session state.
//!
//! [`ChatBackend::send_message`] is infallible by signature. Every upstream
//! failure is absorbed into deterministic fallback text so callers never have
//! an error to surface to the end user.

pub mod fallback;
pub mod gemini;
pub mod session;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use gemini::{ChatFailure, GeminiClient};
pub use session::{ChatSession, PendingSend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "model")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

/// What the chat endpoint returns. `timestamp` is only present when the text
/// came from the upstream model rather than a fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatReply {
    pub fn upstream(text: impl Into<String>) -> Self {
        Self {
            response: text.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn fallback(text: &str) -> Self {
        Self {
            response: text.to_string(),
            timestamp: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.timestamp.is_none()
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Answer `user_text` given the earlier conversation. Never fails.
    async fn send_message(&self, user_text: &str, prior_messages: &[ChatMessage]) -> ChatReply;
}
