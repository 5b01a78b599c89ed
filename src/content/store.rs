//! Content store - the sole data-access surface over the content tree
//!
//! Layout on disk is `content/<type>/<slug>.{md,html}`. The store is a pure
//! function of the on-disk snapshot; nothing is cached across calls.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::item::{first_image, reading_time};
use super::{ContentItem, ContentType, FrontMatter, MarkdownRenderer, SourceKind};

pub struct ContentStore {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// All items of one type, newest first.
    ///
    /// A missing type directory yields an empty list. Items with equal or
    /// missing dates keep their directory enumeration order.
    pub fn list_by_type(&self, ty: ContentType) -> Result<Vec<ContentItem>> {
        let dir = self.content_dir.join(ty.as_str());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        // One source per slug; a .md file shadows an .html twin
        let mut sources: Vec<(String, PathBuf, SourceKind)> = Vec::new();
        for entry in WalkDir::new(&dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(kind) = source_kind(path) else {
                continue;
            };
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match sources.iter_mut().find(|(s, _, _)| s.as_str() == slug) {
                Some(existing) => {
                    if existing.2 == SourceKind::Html && kind == SourceKind::Markdown {
                        existing.1 = path.to_path_buf();
                        existing.2 = kind;
                    }
                }
                None => sources.push((slug.to_string(), path.to_path_buf(), kind)),
            }
        }

        let mut items = Vec::with_capacity(sources.len());
        for (slug, path, kind) in &sources {
            match self.load_item(ty, slug, path, *kind) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        sort_date_descending(&mut items);

        Ok(items)
    }

    /// A single item, trying `slug.md` before `slug.html`.
    /// Returns `Ok(None)` when neither file exists.
    pub fn get_one(&self, ty: ContentType, slug: &str) -> Result<Option<ContentItem>> {
        let dir = self.content_dir.join(ty.as_str());

        let md = dir.join(format!("{slug}.md"));
        if md.is_file() {
            return Ok(Some(self.load_item(ty, slug, &md, SourceKind::Markdown)?));
        }

        let html = dir.join(format!("{slug}.html"));
        if html.is_file() {
            return Ok(Some(self.load_item(ty, slug, &html, SourceKind::Html)?));
        }

        Ok(None)
    }

    /// Every item across all content types, used by the search indexer
    pub fn all(&self) -> Result<Vec<ContentItem>> {
        let mut items = Vec::new();
        for ty in ContentType::ALL {
            items.extend(self.list_by_type(ty)?);
        }
        Ok(items)
    }

    fn load_item(
        &self,
        ty: ContentType,
        slug: &str,
        path: &Path,
        kind: SourceKind,
    ) -> Result<ContentItem> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw);

        let content = match kind {
            SourceKind::Markdown => self.renderer.render(body)?,
            // HTML sources pass through verbatim once the header is stripped
            SourceKind::Html => body.to_string(),
        };

        Ok(ContentItem {
            slug: slug.to_string(),
            content_type: ty,
            title: fm.title.clone().unwrap_or_else(|| slug.to_string()),
            date: fm.parse_date(),
            description: fm.description.clone(),
            technical: fm.technical.clone(),
            tags: fm.tag_list(),
            is_final: fm.is_final,
            first_image: first_image(body, kind),
            reading_time: reading_time(body),
            content,
            raw_content: body.to_string(),
        })
    }
}

/// Sort dated items newest first while undated items keep the slot
/// enumeration gave them. Ties keep their relative order (stable sort).
fn sort_date_descending(items: &mut [ContentItem]) {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.date.is_some().then_some(i))
        .collect();

    let mut dated: Vec<ContentItem> = slots.iter().map(|&i| items[i].clone()).collect();
    dated.sort_by(|a, b| b.date.cmp(&a.date));

    for (slot, item) in slots.into_iter().zip(dated) {
        items[slot] = item;
    }
}

fn source_kind(path: &Path) -> Option<SourceKind> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") => Some(SourceKind::Markdown),
        Some("html") => Some(SourceKind::Html),
        _ => None,
    }
}
