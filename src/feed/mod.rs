//! RSS 2.0 feed generation
//!
//! The feed merges the dated collections (blog, articles, tutorials) and
//! emits the newest entries as RSS 2.0 XML.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentStore, ContentType};

/// The feed carries at most this many entries
pub const FEED_LIMIT: usize = 20;

/// Collections that appear in the feed
pub const FEED_TYPES: [ContentType; 3] = [
    ContentType::Blog,
    ContentType::Articles,
    ContentType::Tutorials,
];

/// Load the merged feed source collections
pub fn feed_items(store: &ContentStore) -> Result<Vec<ContentItem>> {
    let mut items = Vec::new();
    for ty in FEED_TYPES {
        items.extend(store.list_by_type(ty)?);
    }
    Ok(items)
}

/// Build the RSS 2.0 document. Items without a date order as "now".
pub fn generate(config: &SiteConfig, items: &[ContentItem]) -> String {
    let now = Utc::now();

    let mut dated: Vec<(&ContentItem, DateTime<Utc>)> = items
        .iter()
        .map(|item| (item, pub_date(item.date, now)))
        .collect();
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    let base = config.url.trim_end_matches('/');

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<rss version="2.0">"#);
    xml.push('\n');
    xml.push_str("  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
    xml.push_str(&format!("    <link>{}/</link>\n", base));
    xml.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    xml.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        now.to_rfc2822()
    ));

    for (item, date) in dated.iter().take(FEED_LIMIT) {
        let link = format!("{}/{}/{}", base, item.content_type, item.slug);
        xml.push_str("    <item>\n");
        xml.push_str(&format!("      <title>{}</title>\n", escape_xml(&item.title)));
        xml.push_str(&format!("      <link>{}</link>\n", link));
        xml.push_str(&format!("      <guid>{}</guid>\n", link));
        xml.push_str(&format!("      <pubDate>{}</pubDate>\n", date.to_rfc2822()));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            cdata(item.description.as_deref().unwrap_or(""))
        ));
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");
    xml
}

fn pub_date(date: Option<NaiveDate>, now: DateTime<Utc>) -> DateTime<Utc> {
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .unwrap_or(now)
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section, splitting any `]]>` the text contains
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}
