//! Related content selection

use super::ContentItem;

/// At most this many siblings are suggested under an item
pub const RELATED_LIMIT: usize = 3;

/// Siblings of the same type, excluding the current slug.
///
/// `items` is expected in date-descending order from the store; that order
/// is preserved as-is, no relevance scoring.
pub fn related_content<'a>(items: &'a [ContentItem], current_slug: &str) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|item| item.slug != current_slug)
        .take(RELATED_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentType;

    fn item(slug: &str) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            content_type: ContentType::Blog,
            title: slug.to_string(),
            date: None,
            description: None,
            technical: None,
            tags: Vec::new(),
            is_final: false,
            content: String::new(),
            raw_content: String::new(),
            first_image: None,
            reading_time: 1,
        }
    }

    #[test]
    fn test_excludes_current_and_caps_at_three() {
        let items = vec![item("a"), item("b"), item("c"), item("d")];
        let related = related_content(&items, "a");
        let slugs: Vec<_> = related.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_order_preserved_when_current_is_mid_list() {
        let items = vec![item("a"), item("b"), item("c"), item("d"), item("e")];
        let related = related_content(&items, "c");
        let slugs: Vec<_> = related.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_fewer_than_three_siblings() {
        let items = vec![item("a"), item("b")];
        let related = related_content(&items, "a");
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "b");
    }

    #[test]
    fn test_empty_when_alone() {
        let items = vec![item("only")];
        assert!(related_content(&items, "only").is_empty());
    }
}
