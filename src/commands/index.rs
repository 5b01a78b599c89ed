//! Write the search index to disk

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::search::SearchIndex;
use crate::Folio;

/// Generate search.json from the full content collection
pub fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let store = folio.store();
    let index = SearchIndex::build(&store.all()?);
    let json = serde_json::to_string_pretty(index.entries())?;

    let path: PathBuf = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| folio.base_dir.join("search.json"));
    fs::write(&path, json)?;

    tracing::info!("Generated {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}
