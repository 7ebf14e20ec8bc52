//! Catalog browsing endpoints backed by the query engine.

use crate::catalog::categories::{category_info, category_slug};
use crate::catalog::dates::{format_date, format_date_long};
use crate::catalog::store::{DEFAULT_FEATURED_LIMIT, DEFAULT_RELATED_LIMIT};
use crate::catalog::{CatalogStats, CategorySummary, ToolRecord};
use crate::error::{AppError, Result};
use crate::query::{query, QuerySpec};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Matches before `limit` was applied.
    pub total: usize,
    pub results: Vec<ToolRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetailResponse {
    pub tool: ToolRecord,
    pub related: Vec<ToolRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_long: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub featured: bool,
    pub use_cases: &'static [&'static str],
    pub trends: &'static [&'static str],
    pub total: usize,
    pub tools: Vec<ToolRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryListParams {
    /// Only curated categories flagged as featured.
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<usize>,
}

/// Run the engine with `limit` held back so the response can report the
/// untruncated match count.
fn run_query(state: &AppState, mut spec: QuerySpec) -> (usize, Vec<ToolRecord>) {
    let limit = spec.limit.take();
    let matches = query(state.store.get_all(), &spec);
    let total = matches.len();

    let results = matches
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    metrics::counter!("catalog_queries_total").increment(1);
    metrics::histogram!("catalog_query_results").record(total as f64);

    (total, results)
}

/// GET /api/catalog/tools - Filter and sort the catalog.
///
/// Parameters: `search`, `category`, `tags` (comma-separated, match-any),
/// `difficulty` / `status` / `pricing` / `apiAccess` / `freeTrialAvailable`
/// (exact, match-all), `sort`, `order`, `limit`.
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<QueryResponse> {
    let spec = QuerySpec::from_params(&params);
    let (total, results) = run_query(&state, spec);

    tracing::debug!(total, returned = results.len(), "Catalog query completed");

    Json(QueryResponse { total, results })
}

/// GET /api/catalog/tools/:id - One record plus related tools.
pub async fn tool_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ToolDetailResponse>> {
    let tool = state
        .store
        .get_by_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("Tool '{}' not found", id)))?;

    let related = state
        .store
        .related(&id, DEFAULT_RELATED_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ToolDetailResponse {
        last_updated_display: tool.updated_at.as_ref().map(format_date),
        last_updated_long: tool.updated_at.as_ref().map(format_date_long),
        tool: tool.clone(),
        related,
    }))
}

/// GET /api/catalog/categories - Browsable categories with live counts.
/// `?featured=true` narrows to featured categories.
pub async fn categories_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryListParams>,
) -> Json<Vec<CategorySummary>> {
    if params.featured {
        Json(state.store.featured_categories())
    } else {
        Json(state.store.category_summaries())
    }
}

/// GET /api/catalog/categories/:slug - Tools in one category.
///
/// Accepts the same search/filter/sort parameters as the tools listing; the
/// category itself comes from the path.
pub async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CategoryResponse>> {
    let name = state
        .store
        .category_for_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

    let mut spec = QuerySpec::from_params(&params);
    spec.category = Some(name.clone());
    let (total, tools) = run_query(&state, spec);
    let info = category_info(&name);

    Ok(Json(CategoryResponse {
        slug: category_slug(&name),
        description: info.map(|i| i.description),
        icon: info.map(|i| i.icon),
        featured: info.is_some_and(|i| i.featured),
        use_cases: info.map(|i| i.use_cases).unwrap_or_default(),
        trends: info.map(|i| i.trends).unwrap_or_default(),
        name,
        total,
        tools,
    }))
}

/// GET /api/catalog/stats - Catalog-wide counters.
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.store.get_stats())
}

/// GET /api/catalog/featured - Most popular tools.
pub async fn featured_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeaturedParams>,
) -> Json<Vec<ToolRecord>> {
    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    Json(state.store.featured(limit).into_iter().cloned().collect())
}
