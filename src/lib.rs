//! Toolshelf - catalog service for AI and web-development tools
//!
//! This library exposes the record store, the query engine, the chat proxy
//! and the HTTP handlers, enabling integration tests and embedding in other
//! applications.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod handlers;
pub mod persistence;
pub mod query;
pub mod sitemap;
pub mod state;

// Re-export key types for convenience
pub use catalog::{RecordStore, ToolKind, ToolRecord};
pub use chat::{ChatBackend, ChatMessage, ChatReply, ChatSession, GeminiClient};
pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::router;
pub use query::{query, QuerySpec, SortDirection, SortKey};
pub use state::AppState;
