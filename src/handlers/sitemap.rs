use crate::sitemap::{build_entries, render_xml};
use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};
use std::sync::Arc;

/// GET /sitemap.xml
pub async fn sitemap_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = build_entries(&state.store, &state.config.site_base_url, chrono::Utc::now());
    let xml = render_xml(&entries);

    tracing::debug!(urls = entries.len(), "Sitemap generated");

    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}
