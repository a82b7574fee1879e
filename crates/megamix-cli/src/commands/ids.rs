//! Ids command: item and location name to id tables.

use anyhow::Result;
use megamix_core::NameTable;
use serde::Serialize;

use crate::cli_utils;

#[derive(Serialize)]
struct IdTables {
    items: NameTable,
    locations: NameTable,
}

/// Print the flat id tables as JSON
pub fn run(catalog_path: &str, mod_paths: &[String]) -> Result<()> {
    let catalog = cli_utils::load_catalog(catalog_path, mod_paths)?;
    let tables = IdTables {
        items: NameTable::items(&catalog),
        locations: NameTable::locations(&catalog),
    };
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}
