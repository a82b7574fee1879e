//! Generate command: one world per options file.

use anyhow::{Context, Result};
use megamix_core::rng::world_rngs;
use megamix_core::{GenerationOptions, World, generate_world};
use serde::Serialize;
use tracing::info;

use crate::cli_utils;

#[derive(Serialize)]
struct WorldOutput<'a> {
    options_file: &'a str,
    #[serde(flatten)]
    world: World,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    seed: u64,
    worlds: Vec<WorldOutput<'a>>,
}

/// Generate every world; any failure aborts the run without output.
pub fn run(
    catalog_path: &str,
    mod_paths: &[String],
    option_paths: &[String],
    seed: u64,
    output: Option<&str>,
) -> Result<()> {
    let catalog = cli_utils::load_catalog(catalog_path, mod_paths)?;
    eprintln!("Catalog ready: {} charts", catalog.len());

    let options = option_paths
        .iter()
        .map(|path| {
            GenerationOptions::load(path)
                .with_context(|| format!("Failed to load options {}", path))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut worlds = Vec::with_capacity(options.len());
    for ((path, opts), mut rng) in option_paths
        .iter()
        .zip(&options)
        .zip(world_rngs(seed, options.len()))
    {
        let world = generate_world(&catalog, opts, &mut rng)
            .with_context(|| format!("Generation failed for world {}", path))?;
        info!("Generated world for {}", path);
        worlds.push(WorldOutput {
            options_file: path,
            world,
        });
    }

    let content = serde_json::to_string_pretty(&GenerateOutput { seed, worlds })?;
    cli_utils::write_output(output, &content)
}
