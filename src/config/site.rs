//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "Anonymous".to_string(),
            language: "en".to_string(),

            url: "https://example.com".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: SiteConfig =
            serde_yaml::from_str("title: My Bench\nurl: https://bench.dev\n").unwrap();
        assert_eq!(config.title, "My Bench");
        assert_eq!(config.url, "https://bench.dev");
        assert_eq!(config.content_dir, "content");
    }

    #[test]
    fn test_unknown_keys_flattened() {
        let config: SiteConfig = serde_yaml::from_str("title: X\ntheme: dark\n").unwrap();
        assert!(config.extra.contains_key("theme"));
    }
}
