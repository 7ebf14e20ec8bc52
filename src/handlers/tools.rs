//! Raw tools file endpoint.

use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;
use std::io::ErrorKind;
use std::sync::Arc;

/// GET /api/tools - Serve the updated tools JSON file as-is.
///
/// The file is read on every request so an external updater can replace it
/// without a restart. 404 if it is absent, 500 if it cannot be read or parsed.
pub async fn tools_file_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let path = &state.config.updated_tools_path;

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(
                "Updated tools file not found".to_string(),
            ));
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read updated tools file");
            return Err(AppError::CatalogError(
                "Failed to read tools file".to_string(),
            ));
        }
    };

    let data: Value = serde_json::from_str(&raw).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse updated tools file");
        AppError::CatalogError("Failed to read tools file".to_string())
    })?;

    Ok(Json(data))
}
