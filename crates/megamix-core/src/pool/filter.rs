use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::chart::{DifficultyTier, SongEntry};

/// Modded packs a world may draw songs from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModScopeRepr", into = "ModScopeRepr")]
pub enum ModScope {
    /// Base-game songs only
    #[default]
    BaseOnly,
    AllPacks,
    Packs(BTreeSet<String>),
}

impl ModScope {
    pub fn allows_pack(&self, pack: &str) -> bool {
        match self {
            Self::BaseOnly => false,
            Self::AllPacks => true,
            Self::Packs(packs) => packs.contains(pack),
        }
    }

    /// Base-game charts are always in scope.
    pub fn allows(&self, entry: &SongEntry) -> bool {
        match (&entry.pack, entry.is_modded) {
            (_, false) => true,
            (Some(pack), true) => self.allows_pack(pack),
            (None, true) => false,
        }
    }
}

/// Options-file spelling: `"none"`, `"all"` or a list of pack names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ModScopeRepr {
    Keyword(String),
    Packs(BTreeSet<String>),
}

impl TryFrom<ModScopeRepr> for ModScope {
    type Error = String;

    fn try_from(repr: ModScopeRepr) -> Result<Self, Self::Error> {
        match repr {
            ModScopeRepr::Keyword(k) if k.eq_ignore_ascii_case("none") => Ok(Self::BaseOnly),
            ModScopeRepr::Keyword(k) if k.eq_ignore_ascii_case("all") => Ok(Self::AllPacks),
            ModScopeRepr::Keyword(k) => Err(format!(
                "mod_scope must be \"none\", \"all\" or a list of pack names, got {k:?}"
            )),
            ModScopeRepr::Packs(packs) => Ok(Self::Packs(packs)),
        }
    }
}

impl From<ModScope> for ModScopeRepr {
    fn from(scope: ModScope) -> Self {
        match scope {
            ModScope::BaseOnly => Self::Keyword("none".to_string()),
            ModScope::AllPacks => Self::Keyword("all".to_string()),
            ModScope::Packs(packs) => Self::Packs(packs),
        }
    }
}

/// Criteria for one filtering pass.
#[derive(Debug, Clone, Copy)]
pub struct FilterParams<'a> {
    pub dlc_allowed: bool,
    pub allowed_tiers: &'a [DifficultyTier],
    /// Inclusive star rating bounds
    pub rating_lo: f64,
    pub rating_hi: f64,
    pub disallowed_singers: &'a BTreeSet<String>,
    pub mod_scope: &'a ModScope,
}

impl FilterParams<'_> {
    fn chart_qualifies(&self, entry: &SongEntry) -> bool {
        self.allowed_tiers.contains(&entry.difficulty_tier)
            && self.rating_lo <= entry.rating
            && entry.rating <= self.rating_hi
    }
}

/// Pick one qualifying chart per song.
///
/// Songs are visited by ascending id and their charts easiest first, so the
/// result depends only on the catalog, the parameters and the rng state.
/// A song never contributes more than one chart.
pub fn select<R: Rng + ?Sized>(
    catalog: &Catalog,
    params: &FilterParams,
    rng: &mut R,
) -> Vec<String> {
    let mut selected = Vec::new();

    for (song_id, charts) in catalog.songs_by_id() {
        let charts: Vec<&SongEntry> = charts
            .into_iter()
            .filter(|e| params.mod_scope.allows(e))
            .collect();
        if charts.is_empty() {
            continue;
        }

        if !params.dlc_allowed && charts.iter().any(|e| e.is_dlc) {
            continue;
        }
        if charts
            .iter()
            .any(|e| !e.is_modded && e.has_any_singer(params.disallowed_singers))
        {
            debug!("Song {} dropped by singer filter", song_id);
            continue;
        }

        let qualifying: Vec<&SongEntry> = charts
            .into_iter()
            .filter(|e| params.chart_qualifies(e))
            .collect();
        if let Some(chosen) = qualifying.choose(rng) {
            selected.push(chosen.display_name.clone());
        }
    }

    debug!(
        "Filter {}~{} over {:?}: {} songs",
        params.rating_lo,
        params.rating_hi,
        params.allowed_tiers,
        selected.len()
    );
    selected
}
