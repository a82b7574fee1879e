//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use megamix_core::catalog::load_base_songs;
use megamix_core::{Catalog, ModPack};

/// Load the base table and every mod-data file, then build the catalog.
pub fn load_catalog(catalog_path: &str, mod_paths: &[String]) -> Result<Catalog> {
    let base = load_base_songs(catalog_path)
        .with_context(|| format!("Failed to load song table {}", catalog_path))?;

    let mut packs = Vec::new();
    for path in mod_paths {
        let loaded = ModPack::load_mod_data(path)
            .with_context(|| format!("Failed to load mod data {}", path))?;
        packs.extend(loaded);
    }

    eprintln!(
        "Loaded {} song records, {} mod packs",
        base.len(),
        packs.len()
    );
    Ok(Catalog::build(&base, &packs))
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    if let Some(output_path) = output {
        std::fs::write(output_path, content)
            .with_context(|| format!("Failed to write {}", output_path))?;
        eprintln!("Written to: {}", output_path);
    } else {
        println!("{}", content);
    }
    Ok(())
}
