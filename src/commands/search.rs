//! Query the search index from the command line

use anyhow::Result;

use crate::search::SearchIndex;
use crate::Folio;

/// Run one search query and print the matches
pub fn run(folio: &Folio, query: &str) -> Result<()> {
    let store = folio.store();
    let index = SearchIndex::build(&store.all()?);
    let results = index.query(query);

    println!("Results ({}):", results.len());
    for result in results {
        println!(
            "  [{}] {} -> /{}/{}",
            result.content_type, result.title, result.content_type, result.slug
        );
    }

    Ok(())
}
