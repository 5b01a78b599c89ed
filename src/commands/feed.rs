//! Write the RSS feed to disk

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{feed, Folio};

/// Generate feed.xml from the dated collections
pub fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let store = folio.store();
    let items = feed::feed_items(&store)?;
    let xml = feed::generate(&folio.config, &items);

    let path: PathBuf = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| folio.base_dir.join("feed.xml"));
    fs::write(&path, xml)?;

    tracing::info!("Generated {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}
