//! Content module - the file-based content repository and rendering pipeline

mod frontmatter;
pub mod item;
mod markdown;
pub mod related;
mod store;

pub use frontmatter::FrontMatter;
pub use item::{ContentItem, ContentType, SourceKind, UnknownContentType};
pub use markdown::MarkdownRenderer;
pub use store::ContentStore;
