//! Catalog loading: turns bundled JSON into normalized [`ToolRecord`]s.
//!
//! The bundled file is a JSON array of tool objects. Both the AI directory
//! shape (`company`, `popularity.trendingScore`, `freeTrialAvailable`) and the
//! web-dev directory shape (`creator`, `popularity.githubStars`, `difficulty`)
//! are accepted. Malformed entries are logged and skipped; a document that is
//! not an array is rejected outright.

use crate::catalog::categories::{self, WEB_DEV_CATEGORIES};
use crate::catalog::dates::parse_timestamp;
use crate::catalog::types::{ToolKind, ToolRecord};
use crate::error::{AppError, Result};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Read and normalize the catalog file at `path`.
pub fn load_catalog_file(path: &Path) -> Result<Vec<ToolRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::CatalogError(format!(
            "Failed to read catalog file {}: {}",
            path.display(),
            e
        ))
    })?;

    let json: Value = serde_json::from_str(&raw).map_err(|e| {
        AppError::CatalogError(format!(
            "Failed to parse catalog file {}: {}",
            path.display(),
            e
        ))
    })?;

    let records = load_catalog(&json)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Catalog loaded"
    );

    Ok(records)
}

/// Normalize a parsed catalog document.
///
/// # Errors
/// `AppError::CatalogError` if `json` is not an array, or if every entry of a
/// non-empty array fails to parse. Individual bad entries and duplicate ids
/// are skipped with a warning (first occurrence wins).
pub fn load_catalog(json: &Value) -> Result<Vec<ToolRecord>> {
    let entries = json.as_array().ok_or_else(|| {
        AppError::CatalogError(format!(
            "Expected catalog to be a JSON array, found {}",
            json_type_name(json)
        ))
    })?;

    let mut records = Vec::with_capacity(entries.len());
    let mut seen_ids: HashSet<String> = HashSet::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        match normalize_record(entry) {
            Ok(record) => {
                if !seen_ids.insert(record.id.clone()) {
                    tracing::warn!(index = idx, id = %record.id, "Skipping duplicate tool id");
                    continue;
                }
                if !categories::is_registered(&record.category) {
                    tracing::warn!(
                        id = %record.id,
                        category = %record.category,
                        "Tool has unregistered category; hidden from category views"
                    );
                }
                records.push(record);
            }
            Err(e) => {
                tracing::warn!(index = idx, error = %e, "Skipping malformed tool record");
            }
        }
    }

    if records.is_empty() && !entries.is_empty() {
        return Err(AppError::CatalogError(
            "All tool records failed to parse".into(),
        ));
    }

    tracing::debug!(
        total = entries.len(),
        parsed = records.len(),
        "Catalog normalization complete"
    );

    Ok(records)
}

/// Transform one JSON object into a ToolRecord.
fn normalize_record(entry: &Value) -> Result<ToolRecord> {
    if !entry.is_object() {
        return Err(AppError::ValidationError(format!(
            "Tool record must be an object, found {}",
            json_type_name(entry)
        )));
    }

    let id = required_str(entry, "id")?;
    let name = required_str(entry, "name")?;
    let category = required_str(entry, "category")?;

    let mut record = ToolRecord::new(id, name, category);

    record.organization =
        first_str(entry, &["organization", "company", "creator", "developer"])
            .unwrap_or_default()
            .to_string();
    record.description = first_str(entry, &["description"])
        .unwrap_or_default()
        .to_string();
    record.tags = normalize_tags(entry.get("tags"));
    record.kind = resolve_kind(entry, &record.category);

    let popularity = entry.get("popularity");
    record.popularity_score = entry
        .get("popularityScore")
        .and_then(Value::as_f64)
        .or_else(|| popularity.and_then(|p| p.get("trendingScore")).and_then(Value::as_f64));
    record.secondary_metric = popularity
        .and_then(|p| p.get("githubStars"))
        .or_else(|| entry.get("githubStars"))
        .and_then(Value::as_f64)
        .or_else(|| entry.get("userCount").and_then(parse_user_count));

    record.last_updated = first_str(entry, &["lastUpdated", "updatedDate"]).map(str::to_string);
    record.updated_at = record.last_updated.as_deref().and_then(parse_timestamp);

    record.difficulty = first_str(entry, &["difficulty"]).map(str::to_string);
    record.status = first_str(entry, &["status"]).map(str::to_string);
    record.pricing = first_str(entry, &["pricing"]).map(str::to_string);
    record.api_access = first_bool(entry, &["apiAccess", "hasAPI"]);
    record.free_trial_available = first_bool(entry, &["freeTrialAvailable", "isFree"]);
    record.website =
        first_str(entry, &["website", "officialWebsite", "officialLink"]).map(str::to_string);

    Ok(record)
}

fn required_str<'a>(entry: &'a Value, field: &str) -> Result<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "Tool missing required '{}' field: {:?}",
                field,
                entry.get(field)
            ))
        })
}

fn first_str<'a>(entry: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .find_map(|field| entry.get(*field).and_then(Value::as_str))
}

fn first_bool(entry: &Value, fields: &[&str]) -> Option<bool> {
    fields
        .iter()
        .find_map(|field| entry.get(*field).and_then(Value::as_bool))
}

/// Lower-case, trim, dedupe and sort tags. Non-string entries are dropped.
fn normalize_tags(tags: Option<&Value>) -> Vec<String> {
    let Some(tags) = tags.and_then(Value::as_array) else {
        return Vec::new();
    };

    tags.iter()
        .filter_map(Value::as_str)
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Explicit `kind` wins; otherwise a category that exists only in the web-dev
/// registry marks the record as a web-dev tool.
fn resolve_kind(entry: &Value, category: &str) -> ToolKind {
    if let Some(kind) = entry.get("kind") {
        if let Ok(kind) = serde_json::from_value::<ToolKind>(kind.clone()) {
            return kind;
        }
    }

    let web_dev_only = WEB_DEV_CATEGORIES.contains(&category)
        && !categories::AI_CATEGORIES.contains(&category);
    if web_dev_only {
        ToolKind::Webdev
    } else {
        ToolKind::Ai
    }
}

/// User counts arrive as numbers or display strings like "100M+". Strings keep
/// only their digits, so "100M+" becomes 100.
fn parse_user_count(value: &Value) -> Option<f64> {
    if let Some(n) = value.as_f64() {
        return Some(n);
    }

    let digits: String = value.as_str()?.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_load_ai_tool_shape() {
        let catalog = json!([{
            "id": "gpt-4",
            "name": "GPT-4",
            "company": "OpenAI",
            "category": "Large Language Models",
            "description": "Multimodal language model.",
            "tags": ["LLM", "chat", "llm"],
            "popularity": { "trendingScore": 98 },
            "userCount": "100M+",
            "pricing": "Pay-per-use",
            "apiAccess": true,
            "freeTrialAvailable": true,
            "lastUpdated": "2024-01-15"
        }]);

        let records = load_catalog(&catalog).unwrap();

        assert_eq!(records.len(), 1);
        let tool = &records[0];
        assert_eq!(tool.organization, "OpenAI");
        assert_eq!(tool.kind, ToolKind::Ai);
        assert_eq!(tool.tags, vec!["chat", "llm"]);
        assert_eq!(tool.popularity_score, Some(98.0));
        assert_eq!(tool.secondary_metric, Some(100.0));
        assert_eq!(tool.api_access, Some(true));
        assert!(tool.updated_at.is_some());
    }

    #[test]
    fn test_load_web_dev_tool_shape() {
        let catalog = json!([{
            "id": "react",
            "name": "React",
            "creator": "Meta",
            "category": "Frontend Frameworks",
            "description": "UI library.",
            "tags": ["javascript", "ui"],
            "popularity": { "trendingScore": 95, "githubStars": 220000 },
            "difficulty": "Intermediate",
            "status": "Stable",
            "lastUpdated": "2024-02-01T10:00:00Z"
        }]);

        let records = load_catalog(&catalog).unwrap();
        let tool = &records[0];

        assert_eq!(tool.organization, "Meta");
        assert_eq!(tool.kind, ToolKind::Webdev);
        assert_eq!(tool.secondary_metric, Some(220000.0));
        assert_eq!(tool.difficulty.as_deref(), Some("Intermediate"));
        assert_eq!(tool.status.as_deref(), Some("Stable"));
    }

    #[test]
    fn test_non_array_document_is_rejected() {
        let result = load_catalog(&json!({ "tools": [] }));

        match result {
            Err(AppError::CatalogError(msg)) => assert!(msg.contains("object")),
            other => panic!("expected CatalogError, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let catalog = json!([
            { "name": "No id", "category": "Code Generation" },
            "not an object",
            { "id": "ok", "name": "Fine", "category": "Code Generation" }
        ]);

        let records = load_catalog(&catalog).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok");
    }

    #[test]
    fn test_all_malformed_is_an_error() {
        let catalog = json!([{ "name": "No id" }, { "id": "no-name" }]);
        assert!(load_catalog(&catalog).is_err());
    }

    #[test]
    fn test_empty_array_is_an_empty_catalog() {
        let records = load_catalog(&json!([])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = json!([
            { "id": "dup", "name": "First", "category": "Code Generation" },
            { "id": "dup", "name": "Second", "category": "Code Generation" }
        ]);

        let records = load_catalog(&catalog).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "First");
    }

    #[test]
    fn test_unregistered_category_is_kept() {
        let catalog = json!([{ "id": "x", "name": "X", "category": "Time Travel" }]);
        let records = load_catalog(&catalog).unwrap();
        assert_eq!(records[0].category, "Time Travel");
    }

    #[test]
    fn test_explicit_kind_overrides_inference() {
        let catalog = json!([{
            "id": "figma",
            "name": "Figma",
            "category": "Design Tools",
            "kind": "webdev"
        }]);

        let records = load_catalog(&catalog).unwrap();
        assert_eq!(records[0].kind, ToolKind::Webdev);
    }

    #[test]
    fn test_invalid_date_parses_to_none() {
        let catalog = json!([{
            "id": "x",
            "name": "X",
            "category": "Code Generation",
            "lastUpdated": "sometime"
        }]);

        let records = load_catalog(&catalog).unwrap();
        assert_eq!(records[0].last_updated.as_deref(), Some("sometime"));
        assert!(records[0].updated_at.is_none());
    }

    #[test]
    fn test_load_catalog_file_reports_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{ not json").unwrap();

        let result = load_catalog_file(file.path());
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }

    #[test]
    fn test_load_catalog_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(AppError::CatalogError(_))));
    }
}
