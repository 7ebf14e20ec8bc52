//! Read-only, in-memory record store.

use crate::catalog::categories::{
    category_info, category_info_by_slug, category_slug, is_registered, CATEGORY_INFO,
};
use crate::catalog::types::ToolRecord;
use crate::query::{query, QuerySpec, SortKey};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

pub const DEFAULT_FEATURED_LIMIT: usize = 6;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Catalog-wide counters.
///
/// `category_count` counts every distinct category string in the data,
/// registered or not, so it can exceed the number of entries returned by
/// [`RecordStore::category_summaries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_count: usize,
    pub category_count: usize,
    pub average_popularity: f64,
    pub free_count: usize,
}

/// A browsable category with its live record count. Curated categories also
/// carry their description and icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub featured: bool,
}

/// The catalog, populated once at startup and never mutated afterwards.
pub struct RecordStore {
    records: Vec<ToolRecord>,
    by_id: HashMap<String, usize>,
    fingerprint: String,
}

impl RecordStore {
    /// Build a store from already-normalized records. Ids are assumed unique;
    /// the loader enforces that.
    pub fn new(records: Vec<ToolRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.id.clone(), idx))
            .collect();
        let fingerprint = compute_fingerprint(&records);

        Self {
            records,
            by_id,
            fingerprint,
        }
    }

    pub fn get_all(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ToolRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct registered categories present in the catalog, ascending.
    pub fn get_categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| is_registered(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn get_stats(&self) -> CatalogStats {
        let total_count = self.records.len();
        let category_count = self
            .records
            .iter()
            .map(|r| r.category.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let average_popularity = if total_count == 0 {
            0.0
        } else {
            self.records.iter().map(ToolRecord::popularity).sum::<f64>() / total_count as f64
        };
        let free_count = self.records.iter().filter(|r| r.is_free()).count();

        CatalogStats {
            total_count,
            category_count,
            average_popularity,
            free_count,
        }
    }

    /// Every browsable category, sorted by name: registered categories in
    /// use plus every curated category, which may have a count of zero.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        let mut counts: BTreeMap<&str, usize> =
            CATEGORY_INFO.iter().map(|info| (info.name, 0)).collect();
        for record in &self.records {
            if is_registered(&record.category) {
                *counts.entry(record.category.as_str()).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|(name, count)| {
                let info = category_info(name);
                CategorySummary {
                    name: name.to_string(),
                    slug: category_slug(name),
                    count,
                    description: info.map(|i| i.description),
                    icon: info.map(|i| i.icon),
                    featured: info.is_some_and(|i| i.featured),
                }
            })
            .collect()
    }

    /// Curated categories flagged as featured, with live counts.
    pub fn featured_categories(&self) -> Vec<CategorySummary> {
        self.category_summaries()
            .into_iter()
            .filter(|summary| summary.featured)
            .collect()
    }

    /// Resolve a category slug to its display name. Curated slugs always
    /// resolve; other registered categories resolve only while in use.
    pub fn category_for_slug(&self, slug: &str) -> Option<String> {
        if let Some(info) = category_info_by_slug(slug) {
            return Some(info.name.to_string());
        }
        self.get_categories()
            .into_iter()
            .find(|name| category_slug(name) == slug)
    }

    /// Records in the category named by `slug`, in load order. `None` when the
    /// slug resolves to no category (see [`Self::category_for_slug`]).
    pub fn by_category_slug(&self, slug: &str) -> Option<(String, Vec<&ToolRecord>)> {
        let name = self.category_for_slug(slug)?;
        let tools = self
            .records
            .iter()
            .filter(|r| r.category == name)
            .collect();
        Some((name, tools))
    }

    /// Top `limit` records by popularity.
    pub fn featured(&self, limit: usize) -> Vec<&ToolRecord> {
        let spec = QuerySpec {
            sort_key: SortKey::Popularity,
            limit: Some(limit),
            ..QuerySpec::default()
        };
        query(&self.records, &spec)
    }

    /// Other records sharing `id`'s category, in load order. Empty when the id
    /// is unknown or its category is unregistered.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&ToolRecord> {
        let Some(tool) = self.get_by_id(id) else {
            return Vec::new();
        };
        if !is_registered(&tool.category) {
            return Vec::new();
        }

        self.records
            .iter()
            .filter(|r| r.category == tool.category && r.id != tool.id)
            .take(limit)
            .collect()
    }

    /// Hex SHA-256 over ids, names and timestamps. Changes whenever the
    /// bundled catalog changes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn compute_fingerprint(records: &[ToolRecord]) -> String {
    let mut hasher = Sha256::new();

    for record in records {
        hasher.update(record.id.as_bytes());
        hasher.update(b"|");
        hasher.update(record.name.as_bytes());
        hasher.update(b"|");
        hasher.update(record.last_updated.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"\n");
    }

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}
