//! Type definitions for catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which directory a record belongs to. Drives the detail-page URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Ai,
    #[serde(alias = "web-dev", alias = "web_dev")]
    Webdev,
}

impl ToolKind {
    /// Path segment under which detail pages for this kind live.
    pub fn path_prefix(self) -> &'static str {
        match self {
            ToolKind::Ai => "ai-tools",
            ToolKind::Webdev => "webdev-tools",
        }
    }
}

/// A normalized, immutable catalog entry.
///
/// Built by the loader from bundled JSON. `tags` are lower-cased, deduplicated
/// and sorted; `updated_at` is the parsed form of `last_updated` and is `None`
/// when the raw value is missing or not a recognizable timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    pub id: String,
    pub kind: ToolKind,
    pub name: String,
    pub organization: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,
    /// GitHub stars for web-dev tools, user count for AI tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_metric: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ToolRecord {
    /// Minimal record with every optional facet unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ToolKind::default(),
            name: name.into(),
            organization: String::new(),
            category: category.into(),
            description: String::new(),
            tags: Vec::new(),
            popularity_score: None,
            secondary_metric: None,
            last_updated: None,
            updated_at: None,
            difficulty: None,
            status: None,
            pricing: None,
            api_access: None,
            free_trial_available: None,
            website: None,
        }
    }

    /// Look up a facet by its filter key.
    ///
    /// Boolean facets are rendered as `"true"` / `"false"` so every facet can be
    /// compared as a string. Unknown keys return `None`.
    pub fn facet(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "difficulty" => self.difficulty.as_deref().map(Cow::Borrowed),
            "status" => self.status.as_deref().map(Cow::Borrowed),
            "pricing" => self.pricing.as_deref().map(Cow::Borrowed),
            "apiAccess" => self.api_access.map(|v| Cow::Owned(v.to_string())),
            "freeTrialAvailable" => self.free_trial_available.map(|v| Cow::Owned(v.to_string())),
            _ => None,
        }
    }

    /// Popularity with a missing score counted as zero.
    pub fn popularity(&self) -> f64 {
        self.popularity_score.unwrap_or(0.0)
    }

    /// Free-access heuristic: an explicit free-trial flag, or any tag that
    /// mentions "free".
    pub fn is_free(&self) -> bool {
        self.free_trial_available == Some(true)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains("free"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_lookup() {
        let mut tool = ToolRecord::new("vite", "Vite", "Build Tools");
        tool.difficulty = Some("Beginner".to_string());
        tool.api_access = Some(false);

        assert_eq!(tool.facet("difficulty").as_deref(), Some("Beginner"));
        assert_eq!(tool.facet("apiAccess").as_deref(), Some("false"));
        assert_eq!(tool.facet("status"), None);
        assert_eq!(tool.facet("colour"), None);
    }

    #[test]
    fn test_is_free_uses_flag_or_tag() {
        let mut flagged = ToolRecord::new("a", "A", "Code Generation");
        flagged.free_trial_available = Some(true);
        assert!(flagged.is_free());

        let mut tagged = ToolRecord::new("b", "B", "Code Generation");
        tagged.tags = vec!["freemium".to_string()];
        assert!(tagged.is_free());

        let plain = ToolRecord::new("c", "C", "Code Generation");
        assert!(!plain.is_free());
    }

    #[test]
    fn test_kind_path_prefix() {
        assert_eq!(ToolKind::Ai.path_prefix(), "ai-tools");
        assert_eq!(ToolKind::Webdev.path_prefix(), "webdev-tools");
    }
}
