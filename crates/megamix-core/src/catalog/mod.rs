//! The song catalog.
//!
//! - `Catalog` - every chart of every song, keyed by display name
//! - `RawSongRecord`, `ModPack` - raw inputs and their loaders
//! - `LocationPair` - the two checks each chart provides
//! - title sanitation for display names

mod builder;
mod location;
mod record;
mod title;

pub use location::*;
pub use record::*;
pub use title::*;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::chart::SongEntry;

/// Singer-based item name groups: (group name, singer).
pub const SINGER_GROUPS: [(&str, &str); 6] = [
    ("MikuSongs", "Hatsune Miku"),
    ("RinSongs", "Kagamine Rin"),
    ("LenSongs", "Kagamine Len"),
    ("LukaSongs", "Megurine Luka"),
    ("KAITOSongs", "KAITO"),
    ("MEIKOSongs", "MEIKO"),
];

/// Every chart available to a generation run, keyed by display name.
///
/// Built once per run and read-only afterwards. Iteration order is the
/// display-name order, which keeps every consumer deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    entries: BTreeMap<String, SongEntry>,
    /// Modded charts moved off their natural item code
    remapped: BTreeSet<String>,
}

/// Summary numbers for a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub charts: usize,
    pub songs: usize,
    pub modded_charts: usize,
    pub cover_charts: usize,
    pub dlc_charts: usize,
    pub remapped_charts: usize,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl Catalog {
    pub fn get(&self, display_name: &str) -> Option<&SongEntry> {
        self.entries.get(display_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SongEntry> {
        self.entries.values()
    }

    /// Whether a modded chart took a free slot of its code family because
    /// its own item code was already claimed.
    pub fn is_remapped(&self, display_name: &str) -> bool {
        self.remapped.contains(display_name)
    }

    /// Charts grouped by song id, ids ascending, each group easiest first.
    pub fn songs_by_id(&self) -> BTreeMap<u32, Vec<&SongEntry>> {
        let mut groups: BTreeMap<u32, Vec<&SongEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            groups.entry(entry.song_id).or_default().push(entry);
        }
        for group in groups.values_mut() {
            group.sort_by_key(|e| (e.difficulty_tier, e.item_code));
        }
        groups
    }

    /// Lowest and highest chart rating in the catalog.
    pub fn rating_bounds(&self) -> Option<(f64, f64)> {
        self.entries.values().fold(None, |bounds, entry| {
            let r = entry.rating;
            Some(match bounds {
                None => (r, r),
                Some((lo, hi)) => (f64::min(lo, r), f64::max(hi, r)),
            })
        })
    }

    pub fn location_pair(&self, display_name: &str) -> Option<LocationPair> {
        self.get(display_name).map(LocationPair::derive)
    }

    pub fn stats(&self) -> CatalogStats {
        let bounds = self.rating_bounds();
        CatalogStats {
            charts: self.len(),
            songs: self.songs_by_id().len(),
            modded_charts: self.iter().filter(|e| e.is_modded).count(),
            cover_charts: self.iter().filter(|e| e.is_cover()).count(),
            dlc_charts: self.iter().filter(|e| e.is_dlc).count(),
            remapped_charts: self.remapped.len(),
            min_rating: bounds.map(|(lo, _)| lo),
            max_rating: bounds.map(|(_, hi)| hi),
        }
    }

    /// Named groups of song items, usable wherever a song list is accepted.
    ///
    /// Base/DLC and singer groups only cover base-game charts. `ModdedSongs`
    /// is present only when the catalog holds modded charts.
    pub fn item_name_groups(&self) -> BTreeMap<String, BTreeSet<String>> {
        let base: Vec<&SongEntry> = self.iter().filter(|e| !e.is_modded).collect();
        let names = |pred: &dyn Fn(&SongEntry) -> bool| -> BTreeSet<String> {
            base.iter()
                .filter(|e| pred(**e))
                .map(|e| e.display_name.clone())
                .collect()
        };

        let mut groups = BTreeMap::new();
        groups.insert("BaseSongs".to_string(), names(&|e| !e.is_dlc));
        groups.insert("DLCSongs".to_string(), names(&|e| e.is_dlc));
        for (group, singer) in SINGER_GROUPS {
            groups.insert(group.to_string(), names(&|e| e.singers.contains(singer)));
        }

        let modded: BTreeSet<String> = self
            .iter()
            .filter(|e| e.is_modded)
            .map(|e| e.display_name.clone())
            .collect();
        if !modded.is_empty() {
            groups.insert("ModdedSongs".to_string(), modded);
        }

        groups
    }
}
