use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::GenerationOptions;
use crate::emit::{Emission, emit};
use crate::error::Result;
use crate::pool::{GenerationResult, assemble};

/// A fully generated world: its song partition and what it emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    pub result: GenerationResult,
    pub emission: Emission,
}

/// Validate the options, assemble the pool and emit items for one world.
pub fn generate_world<R: Rng + ?Sized>(
    catalog: &Catalog,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<World> {
    options.validate()?;
    let result = assemble(catalog, options, rng)?;
    let emission = emit(catalog, &result, &options.emit_options(), rng)?;
    info!(
        "World ready: goal {:?}, {} songs, {} leeks",
        result.goal_song,
        result.starting_songs.len() + result.included_songs.len(),
        emission.leek_count
    );
    Ok(World { result, emission })
}
