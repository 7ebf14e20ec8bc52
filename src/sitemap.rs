//! sitemaps.org generation for static, category and per-tool pages.

use crate::catalog::RecordStore;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_PAGES: &[(&str, ChangeFrequency, f32)] = &[
    ("", ChangeFrequency::Daily, 1.0),
    ("/ai-tools", ChangeFrequency::Daily, 0.9),
    ("/webdev-tools", ChangeFrequency::Daily, 0.9),
    ("/categories", ChangeFrequency::Weekly, 0.8),
    ("/browse", ChangeFrequency::Weekly, 0.7),
];

/// Every page worth indexing: static pages, then one per browsable category,
/// then one per record keyed by id. `now` stamps pages with no better date.
pub fn build_entries(store: &RecordStore, base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let categories = store.category_summaries();
    let mut entries = Vec::with_capacity(STATIC_PAGES.len() + categories.len() + store.len());

    entries.extend(STATIC_PAGES.iter().map(|(path, freq, priority)| SitemapEntry {
        url: format!("{}{}", base_url, path),
        last_modified: now,
        change_frequency: *freq,
        priority: *priority,
    }));

    entries.extend(categories.iter().map(|category| SitemapEntry {
        url: format!("{}/categories/{}", base_url, category.slug),
        last_modified: now,
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.7,
    }));

    entries.extend(store.get_all().iter().map(|tool| SitemapEntry {
        url: format!("{}/{}/{}", base_url, tool.kind.path_prefix(), tool.id),
        last_modified: tool.updated_at.unwrap_or(now),
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.6,
    }));

    entries
}

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 192);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        // Writing to a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(entry.url.as_str()),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}
