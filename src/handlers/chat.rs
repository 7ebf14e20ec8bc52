use crate::chat::{fallback, ChatMessage, ChatReply};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Earlier turns. Absent and `null` both mean no history.
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

/// POST /api/chat - Ask the assistant.
///
/// Always 200 with a usable `response`. An unreadable body or a blank message
/// gets the greeting fallback; upstream failures are absorbed by the backend.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatReply> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable chat request, using fallback");
            return Json(ChatReply::fallback(fallback::GREETING));
        }
    };

    if request.message.trim().is_empty() {
        return Json(ChatReply::fallback(fallback::GREETING));
    }

    let history = request.messages.unwrap_or_default();
    let start = std::time::Instant::now();
    let reply = state.chat.send_message(&request.message, &history).await;

    tracing::info!(
        history = history.len(),
        fallback = reply.is_fallback(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Chat request completed"
    );

    Json(reply)
}
