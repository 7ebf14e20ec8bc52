pub mod catalog;
pub mod chat;
pub mod health;
pub mod sitemap;
pub mod tools;

pub use catalog::{
    categories_handler, category_handler, featured_handler, query_handler, stats_handler,
    tool_detail_handler,
};
pub use chat::chat_handler;
pub use health::{health_handler, ready_handler};
pub use sitemap::sitemap_handler;
pub use tools::tools_file_handler;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Every application route. Middleware and `/metrics` are added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/api/tools", get(tools_file_handler))
        .route(
            "/api/chat",
            post(chat_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route("/api/catalog/tools", get(query_handler))
        .route("/api/catalog/tools/:id", get(tool_detail_handler))
        .route("/api/catalog/categories", get(categories_handler))
        .route("/api/catalog/categories/:slug", get(category_handler))
        .route("/api/catalog/stats", get(stats_handler))
        .route("/api/catalog/featured", get(featured_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}
