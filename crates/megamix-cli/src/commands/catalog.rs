//! Catalog command: summary of the loaded song catalog.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use megamix_core::CatalogStats;
use serde::Serialize;

use crate::cli_utils;

#[derive(Serialize)]
struct CatalogSummary {
    #[serde(flatten)]
    stats: CatalogStats,
    groups: BTreeMap<String, BTreeSet<String>>,
}

/// Print catalog statistics and item name groups
pub fn run(catalog_path: &str, mod_paths: &[String], json: bool) -> Result<()> {
    let catalog = cli_utils::load_catalog(catalog_path, mod_paths)?;
    let summary = CatalogSummary {
        stats: catalog.stats(),
        groups: catalog.item_name_groups(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let stats = &summary.stats;
    println!("Charts:        {}", stats.charts);
    println!("Songs:         {}", stats.songs);
    println!("Modded charts: {}", stats.modded_charts);
    println!("Cover charts:  {}", stats.cover_charts);
    println!("DLC charts:    {}", stats.dlc_charts);
    println!("Remapped:      {}", stats.remapped_charts);
    match (stats.min_rating, stats.max_rating) {
        (Some(lo), Some(hi)) => println!("Ratings:       {:.1} ~ {:.1}", lo, hi),
        _ => println!("Ratings:       -"),
    }
    println!();
    println!("Item groups:");
    for (group, names) in &summary.groups {
        println!("  {:<12} {}", group, names.len());
    }

    Ok(())
}
