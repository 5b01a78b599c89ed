//! Content item model and derived metadata

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Words per minute assumed for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// Fixed top-level categories partitioning the content directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Articles,
    Projects,
    Tutorials,
    Ideas,
    Workflow,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Blog,
        ContentType::Articles,
        ContentType::Projects,
        ContentType::Tutorials,
        ContentType::Ideas,
        ContentType::Workflow,
    ];

    /// Directory name and wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Articles => "articles",
            ContentType::Projects => "projects",
            ContentType::Tutorials => "tutorials",
            ContentType::Ideas => "ideas",
            ContentType::Workflow => "workflow",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known content type
#[derive(Debug, Error)]
#[error("unknown content type: {0}")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(ContentType::Blog),
            "articles" => Ok(ContentType::Articles),
            "projects" => Ok(ContentType::Projects),
            "tutorials" => Ok(ContentType::Tutorials),
            "ideas" => Ok(ContentType::Ideas),
            "workflow" => Ok(ContentType::Workflow),
            other => Err(UnknownContentType(other.to_string())),
        }
    }
}

/// Source file flavors recognized under a type directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Markdown,
    Html,
}

/// One content item, built from a single backing file.
/// Immutable once constructed; rebuilt from disk on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Filename without extension, unique within a type directory
    pub slug: String,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Front-matter title, falling back to the slug
    pub title: String,

    /// Publication date, if the front matter carries one
    pub date: Option<NaiveDate>,

    pub description: Option<String>,

    pub technical: Option<String>,

    pub tags: Vec<String>,

    #[serde(rename = "final")]
    pub is_final: bool,

    /// Rendered HTML (markdown with heading anchors, or raw HTML passthrough)
    pub content: String,

    /// Original body with the front matter stripped
    pub raw_content: String,

    /// First image reference found in the body
    pub first_image: Option<String>,

    /// Estimated minutes to read, always at least 1
    pub reading_time: u32,
}

lazy_static! {
    static ref MD_IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\(\s*([^)\s]+)").unwrap();
    static ref HTML_IMAGE: Regex = Regex::new(r#"<img[^>]*\ssrc\s*=\s*"([^"]+)""#).unwrap();
}

/// First image reference in the body, in source order.
/// The extraction strategy follows the file extension, not the content.
pub fn first_image(body: &str, kind: SourceKind) -> Option<String> {
    let re = match kind {
        SourceKind::Markdown => &*MD_IMAGE,
        SourceKind::Html => &*HTML_IMAGE,
    };
    re.captures(body).map(|caps| caps[1].to_string())
}

/// Estimated minutes to read: ceil(words / 200), never less than 1
pub fn reading_time(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_round_trip() {
        for ty in ContentType::ALL {
            assert_eq!(ty.as_str().parse::<ContentType>().unwrap(), ty);
        }
        assert!("calculators".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_first_image_markdown() {
        let body = "Intro text.\n\n![bench photo](/images/bench.jpg)\n\n![second](/b.png)\n";
        assert_eq!(
            first_image(body, SourceKind::Markdown),
            Some("/images/bench.jpg".to_string())
        );
    }

    #[test]
    fn test_first_image_markdown_with_title() {
        let body = r#"![alt](/images/scope.png "oscilloscope")"#;
        assert_eq!(
            first_image(body, SourceKind::Markdown),
            Some("/images/scope.png".to_string())
        );
    }

    #[test]
    fn test_first_image_html() {
        let body = r#"<p>Hi</p><img class="hero" src="/images/pcb.webp" alt="pcb">"#;
        assert_eq!(
            first_image(body, SourceKind::Html),
            Some("/images/pcb.webp".to_string())
        );
    }

    #[test]
    fn test_first_image_strategy_by_extension() {
        // An HTML img tag in a markdown source is not matched
        let body = r#"<img src="/images/x.png">"#;
        assert_eq!(first_image(body, SourceKind::Markdown), None);
    }

    #[test]
    fn test_first_image_none() {
        assert_eq!(first_image("no pictures here", SourceKind::Markdown), None);
        assert_eq!(first_image("no pictures here", SourceKind::Html), None);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let words_400 = vec!["word"; 400].join(" ");
        assert_eq!(reading_time(&words_400), 2);

        let words_201 = vec!["word"; 201].join(" ");
        assert_eq!(reading_time(&words_201), 2);

        let words_200 = vec!["word"; 200].join(" ");
        assert_eq!(reading_time(&words_200), 1);
    }

    #[test]
    fn test_reading_time_minimum_one() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("short"), 1);
    }
}
