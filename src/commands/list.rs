//! List content items

use anyhow::Result;

use crate::content::ContentType;
use crate::Folio;

/// List items of one type, or of every type
pub fn run(folio: &Folio, content_type: Option<&str>) -> Result<()> {
    let store = folio.store();

    let types: Vec<ContentType> = match content_type {
        Some(raw) => vec![raw.parse()?],
        None => ContentType::ALL.to_vec(),
    };

    for ty in types {
        let items = store.list_by_type(ty)?;
        println!("{} ({}):", ty, items.len());
        for item in items {
            let date = item
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "          ".to_string());
            let marker = if item.is_final { " " } else { "*" };
            println!("  {}{} {} ({} min)", marker, date, item.title, item.reading_time);
        }
    }

    Ok(())
}
