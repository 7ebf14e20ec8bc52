//! Filter and sort configuration for one catalog query.

use std::collections::{BTreeMap, HashMap};

/// Facet keys recognised when building a spec from request parameters.
pub const FACET_KEYS: &[&str] = &[
    "difficulty",
    "status",
    "pricing",
    "apiAccess",
    "freeTrialAvailable",
];

/// Sentinel the directory dropdowns send for "no category".
const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    Popularity,
    /// Most recently updated first.
    Recency,
    /// GitHub stars for web-dev tools, user count for AI tools.
    Secondary,
}

impl SortKey {
    /// Lenient parse. Accepts the directory UI's historical names too.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "popularity" => Some(Self::Popularity),
            "recency" | "lastupdated" | "newest" => Some(Self::Recency),
            "secondary" | "githubstars" | "usercount" => Some(Self::Secondary),
            _ => None,
        }
    }

    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Name => SortDirection::Ascending,
            SortKey::Popularity | SortKey::Recency | SortKey::Secondary => {
                SortDirection::Descending
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Combined filter + sort configuration.
///
/// The default spec filters nothing and sorts by popularity, descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub search_text: Option<String>,
    /// Exact, case-sensitive category match.
    pub category: Option<String>,
    /// Match-any: a record passes if it carries at least one of these tags.
    pub tag_filters: Vec<String>,
    /// Match-all: a record passes only if every pair matches exactly.
    pub facet_filters: BTreeMap<String, String>,
    pub sort_key: SortKey,
    /// `None` uses the sort key's natural direction.
    pub sort_direction: Option<SortDirection>,
    /// Truncate after sorting.
    pub limit: Option<usize>,
}

impl QuerySpec {
    pub fn direction(&self) -> SortDirection {
        self.sort_direction
            .unwrap_or_else(|| self.sort_key.default_direction())
    }

    /// Build a spec from flat request parameters.
    ///
    /// `tags` is comma-separated. Unrecognised sort keys fall back to the
    /// default; unparsable limits are ignored. Keys outside [`FACET_KEYS`] and
    /// the named parameters are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            params
                .get(key)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
        };

        let search_text = get("search").or_else(|| get("q")).map(str::to_string);
        let category = get("category")
            .filter(|c| *c != ALL_CATEGORIES)
            .map(str::to_string);
        let tag_filters = get("tags")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let facet_filters = FACET_KEYS
            .iter()
            .filter_map(|key| get(key).map(|v| (key.to_string(), v.to_string())))
            .collect();
        let sort_key = get("sort")
            .or_else(|| get("sortBy"))
            .and_then(SortKey::parse)
            .unwrap_or_default();
        let sort_direction = get("order")
            .or_else(|| get("sortOrder"))
            .and_then(SortDirection::parse);
        let limit = get("limit").and_then(|l| l.trim().parse().ok());

        Self {
            search_text,
            category,
            tag_filters,
            facet_filters,
            sort_key,
            sort_direction,
            limit,
        }
    }
}
