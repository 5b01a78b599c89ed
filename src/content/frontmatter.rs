//! Front-matter parsing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A field that may be written as a single string or a list of strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }
}

/// Front-matter header of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub technical: Option<String>,
    pub tags: Option<StringOrList>,
    /// Items are drafts unless explicitly marked final
    #[serde(rename = "final")]
    pub is_final: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse the front-matter block from a content file.
    /// Returns (front_matter, body).
    ///
    /// A `---` block that fails YAML parsing is logged and the whole file
    /// is treated as body text with default metadata.
    pub fn parse(input: &str) -> (Self, &str) {
        let trimmed = input.trim_start();
        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), input);
        }

        let rest = trimmed[3..].trim_start_matches(['\n', '\r']);

        // An empty header closes immediately; the stripped newlines mean
        // the closing delimiter now sits at the start of `rest`
        if let Some(after) = rest.strip_prefix("---") {
            if after.is_empty() || after.starts_with(['\n', '\r']) {
                return (
                    FrontMatter::default(),
                    after.trim_start_matches(['\n', '\r']),
                );
            }
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing delimiter, the --- was body text
            return (FrontMatter::default(), input);
        };

        let block = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if block.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        match serde_yaml::from_str::<FrontMatter>(block) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Malformed front matter, treating file as body: {}", e);
                (FrontMatter::default(), input)
            }
        }
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// Tags as a plain list, whichever way they were written
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .clone()
            .map(StringOrList::into_vec)
            .unwrap_or_default()
    }
}

/// Parse an ISO-8601 date, accepting a few common variants.
/// Timestamps keep only the date part.
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let content = r#"---
title: Engineering Workspace
date: 2026-01-15
description: Notes on my desk setup
technical: CAD, ergonomics
tags:
  - hardware
  - workflow
final: true
---

This is the body.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Engineering Workspace".to_string()));
        assert_eq!(fm.description, Some("Notes on my desk setup".to_string()));
        assert_eq!(fm.technical, Some("CAD, ergonomics".to_string()));
        assert_eq!(fm.tag_list(), vec!["hardware", "workflow"]);
        assert!(fm.is_final);
        assert_eq!(fm.parse_date(), NaiveDate::from_ymd_opt(2026, 1, 15));
        assert!(body.contains("This is the body."));
    }

    #[test]
    fn test_single_string_tags() {
        let content = "---\ntitle: Post\ntags: notes\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tag_list(), vec!["notes"]);
    }

    #[test]
    fn test_defaults_when_absent() {
        let content = "Just a body, no header.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(!fm.is_final);
        assert!(fm.tag_list().is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_header_block() {
        let content = "---\n---\nBody starts here.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, "Body starts here.\n");
    }

    #[test]
    fn test_blank_line_header_block() {
        let content = "---\n\n---\nBody starts here.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, "Body starts here.\n");
    }

    #[test]
    fn test_unclosed_delimiter_is_body() {
        let content = "---\nthis never closes\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_falls_back_to_body() {
        let content = "---\ntitle: [unclosed\n---\n\nBody text.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(body.contains("title: [unclosed"));
    }

    #[test]
    fn test_datetime_keeps_date_part() {
        let fm = FrontMatter {
            date: Some("2025-11-03 09:30:00".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.parse_date(), NaiveDate::from_ymd_opt(2025, 11, 3));
    }

    #[test]
    fn test_extra_fields_preserved() {
        let content = "---\ntitle: Post\nseries: calculators\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content);
        assert!(fm.extra.contains_key("series"));
    }
}
