//! The catalog query engine.
//!
//! A pure function from `(records, spec)` to an ordered view. Filters run in a
//! single pass (text, category, tags, facets) and the survivors are sorted on
//! a freshly allocated vector, so the shared backing slice is never reordered.

use crate::catalog::categories::is_registered;
use crate::catalog::ToolRecord;
use crate::query::spec::{QuerySpec, SortDirection, SortKey};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Filter and sort `records` according to `spec`.
///
/// Never fails: an unknown category, facet key or facet value simply matches
/// nothing.
pub fn query<'a>(records: &'a [ToolRecord], spec: &QuerySpec) -> Vec<&'a ToolRecord> {
    if let Some(category) = spec.category.as_deref() {
        if !is_registered(category) {
            return Vec::new();
        }
    }

    let needle = spec
        .search_text
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_lowercase);

    let wanted_tags: HashSet<String> = spec
        .tag_filters
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut results: Vec<&ToolRecord> = records
        .iter()
        .filter(|r| needle.as_deref().map_or(true, |n| matches_text(r, n)))
        .filter(|r| spec.category.as_deref().map_or(true, |c| r.category == c))
        .filter(|r| wanted_tags.is_empty() || r.tags.iter().any(|t| wanted_tags.contains(t)))
        .filter(|r| matches_facets(r, spec))
        .collect();

    let direction = spec.direction();
    results.sort_by(|a, b| compare(a, b, spec.sort_key, direction));

    if let Some(limit) = spec.limit {
        results.truncate(limit);
    }

    results
}

/// OR across name, description, organization and tags. `needle` is already
/// lower-cased.
fn matches_text(record: &ToolRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record.organization.to_lowercase().contains(needle)
        || record.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_facets(record: &ToolRecord, spec: &QuerySpec) -> bool {
    spec.facet_filters
        .iter()
        .all(|(key, want)| record.facet(key).is_some_and(|have| have == want.as_str()))
}

fn compare(a: &ToolRecord, b: &ToolRecord, key: SortKey, direction: SortDirection) -> Ordering {
    let primary = match key {
        SortKey::Name => direction.apply(compare_names(&a.name, &b.name)),
        SortKey::Popularity => direction.apply(a.popularity().total_cmp(&b.popularity())),
        SortKey::Secondary => direction.apply(
            a.secondary_metric
                .unwrap_or(0.0)
                .total_cmp(&b.secondary_metric.unwrap_or(0.0)),
        ),
        // Undated records trail in both directions.
        SortKey::Recency => match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };

    primary.then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive first, raw bytes second so "alpha" and "Alpha" still have
/// a fixed relative order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
