use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::chart::{CODES_PER_SONG, SongEntry};
use crate::error::RecordError;

use super::Catalog;
use super::record::{ModPack, RawSongRecord, SongRecord};
use super::title::sanitize_title;

/// Where a record came from, for log messages.
#[derive(Debug, Clone, Copy)]
enum Origin<'a> {
    Base(usize),
    Pack(&'a str, usize),
}

impl std::fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Base(index) => write!(f, "base record #{index}"),
            Origin::Pack(pack, index) => write!(f, "{pack:?} record #{index}"),
        }
    }
}

#[derive(Debug, Default)]
struct BuildCounters {
    skipped: usize,
    superseded: usize,
    renamed: usize,
    remapped: usize,
}

impl Catalog {
    /// Build the catalog from the base song table and any modded packs.
    ///
    /// A base chart whose song id appears anywhere in a modded pack is
    /// dropped: the modded song either covers it or reuses its id, and only
    /// one of them may own the id's item codes. A modded chart whose item code
    /// is already taken moves to the lowest free slot of its code family.
    /// Malformed records are logged and skipped.
    pub fn build(base_songs: &[RawSongRecord], modded_packs: &[ModPack]) -> Self {
        let mut counters = BuildCounters::default();

        let base: Vec<(Origin, SongRecord)> = base_songs
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| validated(Origin::Base(i), raw, &mut counters))
            .collect();

        let modded: Vec<(Origin, &str, SongRecord)> = modded_packs
            .iter()
            .flat_map(|pack| {
                pack.songs
                    .iter()
                    .enumerate()
                    .map(move |(i, raw)| (pack.name.as_str(), i, raw))
            })
            .filter_map(|(pack, i, raw)| {
                let origin = Origin::Pack(pack, i);
                validated(origin, raw, &mut counters).map(|(origin, record)| (origin, pack, record))
            })
            .collect();

        let base_ids: BTreeSet<u32> = base.iter().map(|(_, r)| r.song_id).collect();
        let base_dlc_ids: BTreeSet<u32> = base
            .iter()
            .filter(|(_, r)| r.dlc)
            .map(|(_, r)| r.song_id)
            .collect();
        let modded_ids: BTreeSet<u32> = modded.iter().map(|(_, _, r)| r.song_id).collect();

        let mut catalog = Catalog::default();
        let mut claimed_codes = HashSet::new();

        for (origin, record) in base {
            if modded_ids.contains(&record.song_id) {
                debug!("{} ({}) superseded by a modded song", origin, record.name);
                counters.superseded += 1;
                continue;
            }
            let code = SongEntry::item_code_for(record.song_id, record.tier, false);
            let dlc = record.dlc;
            catalog.insert_record(origin, record, None, dlc, code, &mut claimed_codes, &mut counters);
        }

        for (origin, pack, record) in modded {
            let cover = base_ids.contains(&record.song_id);
            let code = SongEntry::item_code_for(record.song_id, record.tier, cover);
            let dlc = record.dlc || base_dlc_ids.contains(&record.song_id);
            catalog.insert_record(
                origin,
                record,
                Some(pack),
                dlc,
                code,
                &mut claimed_codes,
                &mut counters,
            );
        }

        info!(
            "Built catalog: {} charts ({} modded), {} skipped, {} superseded by covers, {} renamed, {} remapped",
            catalog.len(),
            catalog.iter().filter(|e| e.is_modded).count(),
            counters.skipped,
            counters.superseded,
            counters.renamed,
            counters.remapped
        );

        catalog
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_record(
        &mut self,
        origin: Origin,
        record: SongRecord,
        pack: Option<&str>,
        is_dlc: bool,
        item_code: u64,
        claimed_codes: &mut HashSet<u64>,
        counters: &mut BuildCounters,
    ) {
        let title = sanitize_title(&record.name);
        if title.is_empty() {
            warn!("Skipping {}: {}", origin, RecordError::EmptyTitle);
            counters.skipped += 1;
            return;
        }

        let mut remapped = false;
        let item_code = if !claimed_codes.contains(&item_code) {
            item_code
        } else if let Some(slot) = pack.and_then(|_| free_slot(item_code, claimed_codes)) {
            warn!(
                "{} ({}): item code {} taken, remapped to {}",
                origin, record.name, item_code, slot
            );
            counters.remapped += 1;
            remapped = true;
            slot
        } else {
            warn!(
                "Skipping {} ({}): {}",
                origin,
                record.name,
                RecordError::DuplicateItemCode(item_code)
            );
            counters.skipped += 1;
            return;
        };
        claimed_codes.insert(item_code);

        let wanted = format!("{} [{}]", title, record.tier);
        let display_name = self.unique_name(&wanted);
        if display_name != wanted {
            warn!("{}: {:?} already taken, renamed to {:?}", origin, wanted, display_name);
            counters.renamed += 1;
        }

        let is_modded = pack.is_some();
        let entry = SongEntry {
            song_id: record.song_id,
            display_name: display_name.clone(),
            title,
            singers: if is_modded { BTreeSet::new() } else { record.singers },
            is_dlc,
            is_modded,
            pack: pack.map(str::to_string),
            difficulty_tier: record.tier,
            rating: record.rating,
            item_code,
        };
        if remapped {
            self.remapped.insert(display_name.clone());
        }
        self.entries.insert(display_name, entry);
    }

    fn unique_name(&self, wanted: &str) -> String {
        if !self.entries.contains_key(wanted) {
            return wanted.to_string();
        }
        (2..)
            .map(|n| format!("{wanted} ({n})"))
            .find(|candidate| !self.entries.contains_key(candidate))
            .unwrap_or_else(|| wanted.to_string())
    }
}

/// Lowest chart slot of `code`'s family whose location pair is untouched,
/// keeping the cover bit of `code`.
fn free_slot(code: u64, claimed_codes: &HashSet<u64>) -> Option<u64> {
    let family = code - code % CODES_PER_SONG;
    (family..family + CODES_PER_SONG)
        .step_by(2)
        .find(|first| !claimed_codes.contains(first) && !claimed_codes.contains(&(first + 1)))
        .map(|first| first + code % 2)
}

fn validated<'a>(
    origin: Origin<'a>,
    raw: &RawSongRecord,
    counters: &mut BuildCounters,
) -> Option<(Origin<'a>, SongRecord)> {
    match raw.validate() {
        Ok(record) => Some((origin, record)),
        Err(e) => {
            warn!("Skipping {}: {}", origin, e);
            counters.skipped += 1;
            None
        }
    }
}
