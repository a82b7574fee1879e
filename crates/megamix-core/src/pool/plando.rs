use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use tracing::debug;

use crate::catalog::Catalog;
use crate::chart::SongEntry;

use super::ModScope;

/// Player-authored song lists, as display names.
#[derive(Debug, Clone, Copy)]
pub struct PlandoLists<'a> {
    pub include: &'a BTreeSet<String>,
    pub exclude: &'a BTreeSet<String>,
    /// Order is kept: earlier names claim a song first.
    pub start_inventory: &'a [String],
    pub goal_candidates: &'a BTreeSet<String>,
    pub mod_scope: &'a ModScope,
    /// Share of the song cap the include list may take, in percent. At 100
    /// every resolved include is kept.
    pub include_percentage: u32,
    /// Starting plus additional song count
    pub song_cap: usize,
}

/// Filter output split by the plando lists. The four lists are disjoint
/// and no song appears in more than one of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlandoResolution {
    pub starting: Vec<String>,
    pub included_forced: Vec<String>,
    pub eligible: Vec<String>,
    pub goal: Option<String>,
}

impl PlandoLists<'_> {
    fn lookup<'c>(&self, catalog: &'c Catalog, name: &str, list: &str) -> Option<&'c SongEntry> {
        match catalog.get(name) {
            Some(entry) if self.mod_scope.allows(entry) => Some(entry),
            Some(_) => {
                debug!("Ignoring {} entry {:?}: pack outside mod scope", list, name);
                None
            }
            None => {
                debug!("Ignoring {} entry {:?}: not in catalog", list, name);
                None
            }
        }
    }
}

/// Apply the plando lists to one filter pass.
///
/// Exclusion works per song and beats every other list. A song taken by
/// the start inventory or the include list is not offered again under a
/// different difficulty. Below 100 percent, the include list is sampled
/// down and the rest of it joins `eligible`.
pub fn resolve<R: Rng + ?Sized>(
    catalog: &Catalog,
    lists: &PlandoLists,
    filtered: Vec<String>,
    rng: &mut R,
) -> PlandoResolution {
    let excluded: BTreeSet<u32> = lists
        .exclude
        .iter()
        .filter_map(|name| lists.lookup(catalog, name, "exclude"))
        .map(|e| e.song_id)
        .collect();
    let mut claimed: BTreeSet<u32> = BTreeSet::new();

    let mut claim = |entry: &SongEntry, list: &str| -> bool {
        if excluded.contains(&entry.song_id) {
            debug!("{} entry {:?} is excluded", list, entry.display_name);
            return false;
        }
        claimed.insert(entry.song_id)
    };

    let mut starting = Vec::new();
    for name in lists.start_inventory {
        if let Some(entry) = lists.lookup(catalog, name, "start inventory") {
            if claim(entry, "start inventory") {
                starting.push(entry.display_name.clone());
            }
        }
    }

    let mut included_forced = Vec::new();
    for name in lists.include {
        if let Some(entry) = lists.lookup(catalog, name, "include") {
            if claim(entry, "include") {
                included_forced.push(entry.display_name.clone());
            }
        }
    }

    let mut goal = None;
    if !lists.goal_candidates.is_empty() {
        // A song already claimed may only become the goal through the very
        // chart that claimed it, which then moves to the goal slot.
        let candidates = lists
            .goal_candidates
            .iter()
            .filter(|name| {
                filtered.contains(name) || included_forced.contains(name) || starting.contains(name)
            })
            .filter_map(|name| lists.lookup(catalog, name, "goal"))
            .filter(|entry| !excluded.contains(&entry.song_id))
            .filter(|entry| {
                !claimed.contains(&entry.song_id)
                    || starting.contains(&entry.display_name)
                    || included_forced.contains(&entry.display_name)
            });

        if let Some(entry) = candidates.choose(rng) {
            starting.retain(|n| *n != entry.display_name);
            included_forced.retain(|n| *n != entry.display_name);
            claimed.insert(entry.song_id);
            goal = Some(entry.display_name.clone());
        } else {
            debug!("No goal candidate is available, goal will be drawn from the pool");
        }
    }

    let unclaimed = |name: &String| {
        catalog
            .get(name)
            .is_some_and(|e| !excluded.contains(&e.song_id) && !claimed.contains(&e.song_id))
    };

    let mut returned = Vec::new();
    if lists.include_percentage < 100 {
        let pool_len = filtered.iter().filter(|name| unclaimed(name)).count();
        let pool_size = 1 + lists
            .song_cap
            .min(pool_len + starting.len() + included_forced.len());
        let include_size = pool_size * lists.include_percentage as usize / 100;

        if included_forced.len() > include_size {
            included_forced.shuffle(rng);
            returned = included_forced.split_off(include_size);
            debug!(
                "Keeping {} of {} included songs, the rest go back to the pool",
                include_size,
                include_size + returned.len()
            );
        }
    }

    // Returned songs stay claimed, so the filter's own chart of them is dropped
    let mut eligible: Vec<String> = filtered.into_iter().filter(|name| unclaimed(name)).collect();
    eligible.extend(returned);

    PlandoResolution {
        starting,
        included_forced,
        eligible,
        goal,
    }
}
