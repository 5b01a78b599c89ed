//! Markdown rendering with heading anchors and syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer.
///
/// Every heading gets an `id` derived from its raw text; this id is the
/// anchor contract the table of contents depends on.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();

        // Heading contents are buffered so the opening tag can carry
        // an id derived from the full heading text
        let mut heading_level: Option<HeadingLevel> = None;
        let mut heading_events: Vec<Event> = Vec::new();
        let mut heading_text = String::new();

        let mut in_code = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_lang = None;
                }
                Event::Text(text) if in_code => {
                    code_buf.push_str(&text);
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading_level = Some(level);
                    heading_events.clear();
                    heading_text.clear();
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(level) = heading_level.take() {
                        let id = heading_id(&heading_text);
                        let mut inner = String::new();
                        html::push_html(&mut inner, heading_events.drain(..));
                        let rank = heading_rank(level);
                        events.push(Event::Html(CowStr::from(format!(
                            "<h{rank} id=\"{id}\">{inner}</h{rank}>"
                        ))));
                    }
                }
                other if heading_level.is_some() => {
                    match &other {
                        Event::Text(text) => heading_text.push_str(text),
                        Event::Code(code) => heading_text.push_str(code),
                        Event::SoftBreak => heading_text.push(' '),
                        _ => {}
                    }
                    heading_events.push(other);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a fenced code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme_set.themes.get(&self.theme_name) else {
            return plain_code_block(code, lang);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted)
            }
            Err(_) => plain_code_block(code, lang),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Anchor id for a heading: the raw text lower-cased, with runs of
/// non-word characters collapsed to a single hyphen
pub fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_hyphen && !id.is_empty() {
                id.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                id.push(lc);
            }
        } else {
            pending_hyphen = true;
        }
    }

    id
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Some intro.\n\nAnother paragraph.").unwrap();
        assert!(html.contains("<p>Some intro.</p>"));
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("## Hello World\n\ntext\n\n### Sub Section\n")
            .unwrap();
        assert!(html.contains(r#"<h2 id="hello-world">Hello World</h2>"#));
        assert!(html.contains(r#"<h3 id="sub-section">Sub Section</h3>"#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Using `map` and `filter`\n").unwrap();
        assert!(html.contains(r#"id="using-map-and-filter""#));
        assert!(html.contains("<code>map</code>"));
    }

    #[test]
    fn test_heading_id_rules() {
        assert_eq!(heading_id("Hello World"), "hello-world");
        assert_eq!(heading_id("C++ & Rust!"), "c-rust");
        assert_eq!(heading_id("  Spaces   everywhere  "), "spaces-everywhere");
        assert_eq!(heading_id("snake_case stays"), "snake_case-stays");
        assert_eq!(heading_id("MiXeD CaSe"), "mixed-case");
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
    }
}
