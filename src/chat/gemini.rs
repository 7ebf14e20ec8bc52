//! Client for the Gemini `generateContent` endpoint.

use crate::chat::{fallback, ChatBackend, ChatMessage, ChatReply, Role};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.8;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Earlier turns forwarded upstream; older ones are dropped.
const MAX_HISTORY_MESSAGES: usize = 10;

/// Upstream error bodies are truncated to this many bytes before logging.
const MAX_LOGGED_BODY: usize = 500;

const SYSTEM_PROMPT: &str = "You are the assistant for the \"AI Ecosystem Explorer\" web application, \
a directory that helps people discover and learn about AI tools and web-development tools.

Platform features:
- Hundreds of AI tools and platforms
- Categories: LLMs, Code Generation, Design Tools, Writing, Audio, Video, Data Analytics, Agent Frameworks
- Featured tools: GPT-4, Claude, GitHub Copilot, Midjourney, Canva AI, AutoGPT

Your role:
- Help users understand AI tools and their capabilities
- Compare different AI solutions
- Suggest appropriate tools for specific use cases
- Keep responses helpful, concise and professional
- Be honest about limitations";

#[derive(Error, Debug)]
pub enum ChatFailure {
    #[error("chat API credential not configured")]
    MissingCredential,

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiClient {
    /// `api_base` is the versioned API root, e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(
        api_key: Option<String>,
        api_base: &str,
        model: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ChatFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
        })
    }

    /// One request, no retry.
    pub async fn generate(
        &self,
        user_text: &str,
        prior_messages: &[ChatMessage],
    ) -> Result<String, ChatFailure> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ChatFailure::MissingCredential)?;

        let url = Url::parse_with_params(&self.endpoint, &[("key", api_key)])
            .map_err(|e| ChatFailure::MalformedResponse(format!("invalid endpoint: {}", e)))?;
        let body = build_request_body(user_text, prior_messages);

        let start = std::time::Instant::now();
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat upstream responded"
        );

        if !status.is_success() {
            return Err(ChatFailure::UpstreamStatus {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ChatFailure::MalformedResponse(e.to_string()))?;

        extract_reply_text(&json).ok_or_else(|| {
            ChatFailure::MalformedResponse("missing candidates[0].content.parts[0].text".into())
        })
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn send_message(&self, user_text: &str, prior_messages: &[ChatMessage]) -> ChatReply {
        metrics::counter!("chat_requests_total").increment(1);

        match self.generate(user_text, prior_messages).await {
            Ok(text) => ChatReply::upstream(text),
            Err(failure) => {
                match &failure {
                    ChatFailure::UpstreamStatus { status, body } => {
                        tracing::warn!(status, body = %body, "Chat upstream error, using fallback");
                    }
                    other => tracing::warn!(error = %other, "Chat request failed, using fallback"),
                }
                metrics::counter!("chat_fallbacks_total").increment(1);
                ChatReply::fallback(fallback::for_failure(&failure))
            }
        }
    }
}

/// Request payload: the most recent prior turns, then the system prompt and
/// the user's question as the final user turn.
fn build_request_body(user_text: &str, prior_messages: &[ChatMessage]) -> Value {
    let skip = prior_messages.len().saturating_sub(MAX_HISTORY_MESSAGES);
    let mut contents: Vec<Value> = prior_messages
        .iter()
        .skip(skip)
        .filter(|m| !m.content.trim().is_empty())
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    contents.push(json!({
        "role": "user",
        "parts": [{ "text": format!("{}\n\nUser question: {}", SYSTEM_PROMPT, user_text) }]
    }));

    json!({
        "contents": contents,
        "generationConfig": {
            "temperature": TEMPERATURE,
            "topP": TOP_P,
            "topK": TOP_K,
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
        }
    })
}

/// `candidates[0].content.parts[0].text`, if present and non-blank.
fn extract_reply_text(json: &Value) -> Option<String> {
    json.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        return body.to_string();
    }
    let mut end = MAX_LOGGED_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
