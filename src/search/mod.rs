//! Flat search index over every content type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::{ContentItem, ContentType};

/// Inline/modal search shows at most this many matches
pub const MAX_RESULTS: usize = 8;

/// One searchable projection of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Search index built from the full content collection
pub struct SearchIndex {
    entries: Vec<SearchResult>,
}

impl SearchIndex {
    /// Flatten items across all types into one collection
    pub fn build(items: &[ContentItem]) -> Self {
        let entries = items
            .iter()
            .map(|item| SearchResult {
                slug: item.slug.clone(),
                title: item.title.clone(),
                description: item.description.clone(),
                content_type: item.content_type,
                date: item.date,
            })
            .collect();
        Self { entries }
    }

    /// The raw, unbounded dataset
    pub fn entries(&self) -> &[SearchResult] {
        &self.entries
    }

    /// Case-insensitive substring match against title, description, and
    /// type name, capped at [`MAX_RESULTS`]
    pub fn query(&self, q: &str) -> Vec<SearchResult> {
        let needle = q.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || entry.content_type.as_str().contains(&needle)
            })
            .take(MAX_RESULTS)
            .cloned()
            .collect()
    }
}
