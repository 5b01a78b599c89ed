//! Table of contents extraction and active-section tracking
//!
//! Works on the rendered HTML of a single item. Only `<h2>`/`<h3>` elements
//! that carry an `id` attribute are addressable anchors; anything else is
//! invisible to the TOC.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref OPEN_TAG: Regex = Regex::new(r"<h([23])([^>]*)>").unwrap();
    static ref ID_ATTR: Regex = Regex::new(r#"(?:^|\s)id\s*=\s*"([^"]+)""#).unwrap();
}

/// One entry of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Extract TOC entries from rendered HTML, in document order.
///
/// Level-3 entries sit flat after their level-2 context; the hierarchy is
/// visual, not structural.
pub fn extract(html: &str) -> Vec<TocItem> {
    let mut toc = Vec::new();

    for caps in OPEN_TAG.captures_iter(html) {
        let (Some(whole), Some(level), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        // Headings without an id are not addressable anchors
        let Some(id) = ID_ATTR
            .captures(attrs.as_str())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        else {
            continue;
        };

        let level: u8 = if level.as_str() == "3" { 3 } else { 2 };

        let close = format!("</h{}>", level);
        let rest = &html[whole.end()..];
        let Some(end) = rest.find(&close) else {
            continue;
        };

        let text = strip_tags(&rest[..end]).trim().to_string();
        toc.push(TocItem { id, text, level });
    }

    toc
}

/// Render the TOC as nested list markup.
/// No headings means no output at all.
pub fn render(items: &[TocItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<ol class="toc">"#);
    for item in items {
        html.push_str(&format!(
            r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}"><span class="toc-text">{}</span></a></li>"##,
            item.level, item.id, item.text
        ));
    }
    html.push_str("</ol>");
    html
}

/// Active-section state for a rendered TOC.
///
/// Fed intersection notifications as headings enter or leave the tracked
/// viewport band; the most recently intersecting heading wins, and a heading
/// leaving the band does not clear the selection.
#[derive(Debug, Default)]
pub struct TocTracker {
    active_id: Option<String>,
}

impl TocTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one intersection notification for a heading id
    pub fn observe(&mut self, id: &str, intersecting: bool) {
        if intersecting {
            self.active_id = Some(id.to_string());
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }
}

fn strip_tags(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_h2_and_h3() {
        let html = r#"<h2 id="intro">Intro</h2><p>text</p><h3 id="sub">Sub</h3>"#;
        let toc = extract(html);
        assert_eq!(
            toc,
            vec![
                TocItem {
                    id: "intro".to_string(),
                    text: "Intro".to_string(),
                    level: 2
                },
                TocItem {
                    id: "sub".to_string(),
                    text: "Sub".to_string(),
                    level: 3
                },
            ]
        );
    }

    #[test]
    fn test_headings_without_id_are_skipped() {
        let html = r#"<h2 id="kept">Kept</h2><h2>Ignored</h2><h3 class="x">Also ignored</h3>"#;
        let toc = extract(html);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "kept");
    }

    #[test]
    fn test_data_id_is_not_an_anchor() {
        let html = r#"<h2 data-id="x">Nope</h2><h2 id="yes" data-id="x">Yes</h2>"#;
        let toc = extract(html);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "yes");
        assert_eq!(toc[0].text, "Yes");
    }

    #[test]
    fn test_other_levels_ignored() {
        let html = r#"<h1 id="top">Top</h1><h4 id="deep">Deep</h4><h2 id="ok">Ok</h2>"#;
        let toc = extract(html);
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "ok");
    }

    #[test]
    fn test_inner_markup_stripped() {
        let html = r#"<h2 id="code">Using <code>map</code></h2>"#;
        let toc = extract(html);
        assert_eq!(toc[0].text, "Using map");
    }

    #[test]
    fn test_render_empty_is_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_render_links_anchors() {
        let items = extract(r#"<h2 id="intro">Intro</h2>"#);
        let html = render(&items);
        assert!(html.contains(r##"href="#intro""##));
        assert!(html.contains("toc-level-2"));
    }

    #[test]
    fn test_tracker_latest_intersection_wins() {
        let mut tracker = TocTracker::new();
        assert_eq!(tracker.active_id(), None);

        tracker.observe("intro", true);
        assert_eq!(tracker.active_id(), Some("intro"));

        tracker.observe("sub", true);
        assert_eq!(tracker.active_id(), Some("sub"));

        // Scrolling a heading out of the band keeps the last active one
        tracker.observe("sub", false);
        assert_eq!(tracker.active_id(), Some("sub"));
    }
}
