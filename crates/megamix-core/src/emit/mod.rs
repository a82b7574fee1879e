//! Item pool, location graph and slot data for an assembled world.
//!
//! - `NameTable` - flat item and location name to id tables
//! - `LocationGraph` - Menu root, one gate per pooled song
//! - `SlotData` - the client-facing summary
//! - `Trap` - trap items that replace part of the filler

mod graph;
mod slot_data;
mod tables;
mod trap;

pub use graph::*;
pub use slot_data::*;
pub use tables::*;
pub use trap::*;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::chart::SongEntry;
use crate::config::{GradeNeeded, items};
use crate::error::{Error, Result};
use crate::pool::GenerationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub leek_count_percentage: u32,
    pub leek_win_count_percentage: u32,
    /// Share of the free locations filled with song duplicates
    pub duplicate_song_percentage: u32,
    /// Share of the locations left after duplicates filled with traps
    pub trap_percentage: u32,
    pub traps_enabled: BTreeSet<Trap>,
    pub grade_needed: GradeNeeded,
    pub auto_remove_songs: bool,
    pub death_link: bool,
    pub death_link_amnesty: u32,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            leek_count_percentage: 20,
            leek_win_count_percentage: 80,
            duplicate_song_percentage: 100,
            trap_percentage: 0,
            traps_enabled: Trap::all(),
            grade_needed: GradeNeeded::default(),
            auto_remove_songs: false,
            death_link: false,
            death_link_amnesty: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClassification {
    Progression,
    /// Required for completion but ignored by progression balancing
    ProgressionSkipBalancing,
    Useful,
    Filler,
    Trap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemInstance {
    pub name: String,
    pub code: u64,
    pub classification: ItemClassification,
}

impl ItemInstance {
    fn song(entry: &SongEntry, classification: ItemClassification) -> Self {
        Self {
            name: entry.display_name.clone(),
            code: entry.item_code,
            classification,
        }
    }

    fn trap(trap: Trap) -> Self {
        Self {
            name: trap.name().to_string(),
            code: trap.code(),
            classification: ItemClassification::Trap,
        }
    }
}

/// Everything a world contributes to the multiworld.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emission {
    /// Items placed into the world's locations
    pub items: Vec<ItemInstance>,
    /// Starting songs, granted before play begins
    pub precollected: Vec<ItemInstance>,
    pub location_graph: LocationGraph,
    pub slot_data: SlotData,
    pub leek_count: usize,
    pub leek_win_count: usize,
}

impl Emission {
    pub fn count_of(&self, classification: ItemClassification) -> usize {
        self.items
            .iter()
            .filter(|item| item.classification == classification)
            .count()
    }
}

/// Turn an assembled pool into items, locations and slot data.
///
/// Fails with [`Error::UnknownSong`] if the result names a song the catalog
/// does not hold.
pub fn emit<R: Rng + ?Sized>(
    catalog: &Catalog,
    result: &GenerationResult,
    options: &EmitOptions,
    rng: &mut R,
) -> Result<Emission> {
    let starting = lookup_all(catalog, &result.starting_songs)?;
    let included = lookup_all(catalog, &result.included_songs)?;
    let goal = lookup(catalog, &result.goal_song)?;

    let pool_size = starting.len() + included.len();
    let leek_count = (pool_size * options.leek_count_percentage as usize / 100).max(1);
    let leek_win_count = (leek_count * options.leek_win_count_percentage as usize / 100).max(1);

    let mut placed: Vec<ItemInstance> = Vec::with_capacity(result.location_count);
    placed.extend((0..leek_count).map(|_| ItemInstance {
        name: items::LEEK_NAME.to_string(),
        code: items::LEEK_CODE,
        classification: ItemClassification::ProgressionSkipBalancing,
    }));
    placed.extend(
        included
            .iter()
            .map(|e| ItemInstance::song(e, ItemClassification::Progression)),
    );

    let remainder = result
        .location_count
        .saturating_sub(leek_count + included.len());
    let duplicates = if included.is_empty() {
        0
    } else {
        remainder * options.duplicate_song_percentage as usize / 100
    };
    placed.extend(duplicate_songs(&included, duplicates, rng));

    let enabled_traps: Vec<Trap> = options.traps_enabled.iter().copied().collect();
    let traps = if enabled_traps.is_empty() {
        0
    } else {
        (remainder - duplicates) * options.trap_percentage as usize / 100
    };
    for _ in 0..traps {
        if let Some(&trap) = enabled_traps.choose(rng) {
            placed.push(ItemInstance::trap(trap));
        }
    }

    let filler = remainder - duplicates - traps;
    let (filler_name, filler_code) = items::FILLER_ITEMS[0];
    placed.extend((0..filler).map(|_| ItemInstance {
        name: filler_name.to_string(),
        code: filler_code,
        classification: ItemClassification::Filler,
    }));
    debug!(
        "{} leeks, {} songs, {} duplicates, {} traps, {} filler",
        leek_count,
        included.len(),
        duplicates,
        traps,
        filler
    );

    let precollected = starting
        .iter()
        .map(|e| ItemInstance::song(e, ItemClassification::Progression))
        .collect();

    let gates = starting
        .iter()
        .chain(&included)
        .map(|e| SongGate::for_song(e))
        .collect();
    let location_graph = LocationGraph::new(gates, &goal.display_name, leek_win_count);

    let final_songs: Vec<&SongEntry> = starting
        .iter()
        .chain(&included)
        .copied()
        .chain([goal])
        .collect();
    let slot_data = SlotData {
        victory_location: goal.display_name.clone(),
        victory_id: goal.family_code(),
        final_song_ids: final_songs
            .iter()
            .map(|e| e.song_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        leek_win_count,
        score_grade_needed: options.grade_needed.value(),
        auto_remove: options.auto_remove_songs,
        death_link: options.death_link,
        death_link_amnesty: options.death_link_amnesty,
        mod_data: mod_data(&final_songs),
        mod_remap: mod_remap(catalog, &final_songs),
    };

    info!(
        "Emitted {} items for {} locations, goal needs {} of {} leeks",
        placed.len(),
        location_graph.location_count(),
        leek_win_count,
        leek_count
    );

    Ok(Emission {
        items: placed,
        precollected,
        location_graph,
        slot_data,
        leek_count,
        leek_win_count,
    })
}

fn lookup<'c>(catalog: &'c Catalog, name: &str) -> Result<&'c SongEntry> {
    catalog
        .get(name)
        .ok_or_else(|| Error::UnknownSong(name.to_string()))
}

fn lookup_all<'c>(catalog: &'c Catalog, names: &[String]) -> Result<Vec<&'c SongEntry>> {
    names.iter().map(|name| lookup(catalog, name)).collect()
}

/// `count` extra copies of the included songs: whole passes in pool order,
/// then a shuffled partial pass.
fn duplicate_songs<R: Rng + ?Sized>(
    included: &[&SongEntry],
    count: usize,
    rng: &mut R,
) -> Vec<ItemInstance> {
    if included.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut duplicates = Vec::with_capacity(count);
    for _ in 0..count / included.len() {
        duplicates.extend(
            included
                .iter()
                .map(|e| ItemInstance::song(e, ItemClassification::Useful)),
        );
    }

    let mut partial = included.to_vec();
    partial.shuffle(rng);
    duplicates.extend(
        partial
            .into_iter()
            .take(count % included.len())
            .map(|e| ItemInstance::song(e, ItemClassification::Useful)),
    );
    duplicates
}

fn mod_data(songs: &[&SongEntry]) -> BTreeMap<String, Vec<(String, u32)>> {
    let mut data: BTreeMap<String, Vec<(String, u32)>> = BTreeMap::new();
    for entry in songs.iter().filter(|e| e.is_modded) {
        if let Some(pack) = &entry.pack {
            data.entry(pack.clone())
                .or_default()
                .push((entry.title.clone(), entry.song_id));
        }
    }
    data
}

/// Song id to relocated item code, for final songs whose chart was moved to
/// another slot of its code family.
fn mod_remap(catalog: &Catalog, songs: &[&SongEntry]) -> BTreeMap<u32, u64> {
    songs
        .iter()
        .filter(|e| catalog.is_remapped(&e.display_name))
        .map(|e| (e.song_id, e.item_code))
        .collect()
}
