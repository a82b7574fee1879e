use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, LOCATIONS_PER_SONG};
use crate::config::{GenerationOptions, pool, rating};
use crate::error::{Error, Result};

use super::filter::{FilterParams, select};
use super::plando::{PlandoLists, PlandoResolution, resolve};

/// Inclusive star rating window used by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingWindow {
    pub lo: f64,
    pub hi: f64,
}

impl RatingWindow {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Widen by one step: the upper bound until it reaches `ceiling`, then
    /// the lower bound until it reaches `floor`.
    ///
    /// Returns false when both bounds are already saturated.
    pub fn relax(&mut self, floor: f64, ceiling: f64) -> bool {
        if self.hi < ceiling {
            self.hi = (self.hi + rating::RELAX_STEP).min(ceiling);
            true
        } else if self.lo > floor {
            self.lo = (self.lo - rating::RELAX_STEP).max(floor);
            true
        } else {
            false
        }
    }
}

impl From<(f64, f64)> for RatingWindow {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::new(lo, hi)
    }
}

/// The song partition of one world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub starting_songs: Vec<String>,
    pub included_songs: Vec<String>,
    pub goal_song: String,
    /// Eligible songs that did not make the pool
    pub leftover_songs: Vec<String>,
    pub location_count: usize,
    /// Window the pool was finally drawn from
    pub rating_window: RatingWindow,
}

impl GenerationResult {
    /// Starting and included songs, in that order.
    pub fn pool(&self) -> impl Iterator<Item = &String> {
        self.starting_songs.iter().chain(&self.included_songs)
    }
}

/// Assemble a world's song pool, relaxing the rating window until enough
/// songs qualify.
///
/// Fails only with [`Error::InsufficientCatalog`], once the window covers
/// the whole catalog and there are still too few songs.
pub fn assemble<R: Rng + ?Sized>(
    catalog: &Catalog,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<GenerationResult> {
    let allowed_tiers = options.allowed_tiers();
    let mut window = RatingWindow::from(options.rating_window());
    let lists = PlandoLists {
        include: &options.include_songs,
        exclude: &options.exclude_songs,
        start_inventory: &options.start_inventory,
        goal_candidates: &options.goal_song,
        mod_scope: &options.mod_scope,
        include_percentage: options.include_songs_percentage,
        song_cap: options.starting_song_count + options.additional_song_count,
    };

    let Some((floor, ceiling)) = catalog.rating_bounds() else {
        return Err(Error::InsufficientCatalog {
            needed: options.starting_song_count + pool::MIN_EXTRA_SONGS,
            available: 0,
            rating_lo: window.lo,
            rating_hi: window.hi,
        });
    };

    loop {
        let params = FilterParams {
            dlc_allowed: options.allow_dlc_songs,
            allowed_tiers: &allowed_tiers,
            rating_lo: window.lo,
            rating_hi: window.hi,
            disallowed_singers: &options.exclude_singers,
            mod_scope: &options.mod_scope,
        };
        let filtered = select(catalog, &params, rng);
        let plando = resolve(catalog, &lists, filtered, rng);

        let needed = options
            .starting_song_count
            .saturating_sub(plando.starting.len())
            + pool::MIN_EXTRA_SONGS;
        let available = plando.eligible.len()
            + plando.included_forced.len()
            + usize::from(plando.goal.is_some());

        if available >= needed {
            debug!(
                "{} songs available ({} needed) within {}~{}",
                available, needed, window.lo, window.hi
            );
            return finalize(plando, options, window, rng);
        }

        if !window.relax(floor, ceiling) {
            return Err(Error::InsufficientCatalog {
                needed,
                available,
                rating_lo: window.lo,
                rating_hi: window.hi,
            });
        }
        debug!(
            "Only {} of {} songs available, relaxed rating window to {}~{}",
            available, needed, window.lo, window.hi
        );
    }
}

fn finalize<R: Rng + ?Sized>(
    plando: PlandoResolution,
    options: &GenerationOptions,
    window: RatingWindow,
    rng: &mut R,
) -> Result<GenerationResult> {
    let PlandoResolution {
        mut starting,
        included_forced: mut included,
        mut eligible,
        goal,
    } = plando;
    let cap = options.additional_song_count;
    let quota = options.starting_song_count;

    eligible.shuffle(rng);

    let goal = if included.len() > cap {
        included.shuffle(rng);
        let goal = goal.or_else(|| included.pop());
        while included.len() > cap {
            let Some(song) = included.pop() else { break };
            if starting.len() < quota {
                starting.push(song);
            } else {
                eligible.insert(0, song);
            }
        }
        goal
    } else if goal.is_some() {
        goal
    } else {
        let pick = rng.gen_range(0..(included.len() + eligible.len()).max(1));
        if pick < included.len() {
            Some(included.remove(pick))
        } else if pick - included.len() < eligible.len() {
            Some(eligible.remove(pick - included.len()))
        } else {
            None
        }
    };

    let Some(goal_song) = goal else {
        return Err(Error::InsufficientCatalog {
            needed: quota + pool::MIN_EXTRA_SONGS,
            available: 0,
            rating_lo: window.lo,
            rating_hi: window.hi,
        });
    };

    while starting.len() < quota {
        match eligible.pop().or_else(|| included.pop()) {
            Some(song) => starting.push(song),
            None => break,
        }
    }

    while included.len() < cap {
        match eligible.pop() {
            Some(song) => included.push(song),
            None => break,
        }
    }

    if included.len() < cap {
        warn!(
            "Pool holds {} additional songs, {} were requested",
            included.len(),
            cap
        );
    }

    let location_count = LOCATIONS_PER_SONG * (starting.len() + included.len());
    info!(
        "Assembled pool: {} starting, {} included, goal {:?}, {} locations",
        starting.len(),
        included.len(),
        goal_song,
        location_count
    );

    Ok(GenerationResult {
        starting_songs: starting,
        included_songs: included,
        goal_song,
        leftover_songs: eligible,
        location_count,
        rating_window: window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RawSongRecord, RawValue};
    use crate::config::RatingMode;
    use crate::rng::create_rng;
    use std::collections::BTreeSet;

    fn record(song_id: u32, rating: f64) -> RawSongRecord {
        RawSongRecord {
            song_id: Some(song_id),
            name: Some(format!("Song {song_id}")),
            singers: vec!["Hatsune Miku".to_string()],
            dlc: Some(RawValue::Bool(false)),
            difficulty: Some("HARD".to_string()),
            difficulty_rating: Some(RawValue::Number(rating)),
        }
    }

    fn manual(lo: f64, hi: f64) -> GenerationOptions {
        GenerationOptions {
            song_difficulty_rating: RatingMode::Manual,
            song_difficulty_rating_min: lo,
            song_difficulty_rating_max: hi,
            starting_song_count: 3,
            additional_song_count: 15,
            ..GenerationOptions::default()
        }
    }

    #[test]
    fn test_relax_upper_bound_first() {
        let mut window = RatingWindow::new(4.0, 5.0);

        assert!(window.relax(1.0, 6.0));
        assert_eq!(window, RatingWindow::new(4.0, 5.5));
        assert!(window.relax(1.0, 6.0));
        assert_eq!(window, RatingWindow::new(4.0, 6.0));
        assert!(window.relax(1.0, 6.0));
        assert_eq!(window, RatingWindow::new(3.5, 6.0));
    }

    #[test]
    fn test_relax_clamps_and_saturates() {
        let mut window = RatingWindow::new(2.0, 5.8);

        assert!(window.relax(1.8, 6.0));
        assert_eq!(window.hi, 6.0);
        assert!(window.relax(1.8, 6.0));
        assert_eq!(window.lo, 1.8);
        assert!(!window.relax(1.8, 6.0));
        assert_eq!(window, RatingWindow::new(1.8, 6.0));
    }

    #[test]
    fn test_assemble_within_window() {
        let records: Vec<RawSongRecord> = (1..=40).map(|id| record(id, 5.0)).collect();
        let catalog = Catalog::build(&records, &[]);

        let result = assemble(&catalog, &manual(4.0, 6.0), &mut create_rng(3)).unwrap();

        assert_eq!(result.starting_songs.len(), 3);
        assert_eq!(result.included_songs.len(), 15);
        assert_eq!(result.leftover_songs.len(), 40 - 19);
        assert_eq!(result.location_count, 36);
        assert_eq!(result.rating_window, RatingWindow::new(4.0, 6.0));
    }

    #[test]
    fn test_assemble_relaxes_upper_bound_before_lower() {
        // 10 easy songs, 10 hard songs, window only covers the easy ones
        let records: Vec<RawSongRecord> = (1..=10)
            .map(|id| record(id, 3.0))
            .chain((11..=20).map(|id| record(id, 7.0)))
            .chain([record(21, 1.0)])
            .collect();
        let catalog = Catalog::build(&records, &[]);

        let result = assemble(&catalog, &manual(3.0, 3.0), &mut create_rng(8)).unwrap();

        // 14 needed: upper bound reaches 7.0 before the lower bound moves
        assert_eq!(result.rating_window, RatingWindow::new(3.0, 7.0));
        let pooled: BTreeSet<&String> = result.pool().chain([&result.goal_song]).collect();
        assert!(!pooled.contains(&"Song 21 [HARD]".to_string()));
    }

    #[test]
    fn test_assemble_fails_when_catalog_too_small() {
        let records: Vec<RawSongRecord> = (1..=10).map(|id| record(id, 5.0)).collect();
        let catalog = Catalog::build(&records, &[]);

        let err = assemble(&catalog, &manual(5.0, 5.0), &mut create_rng(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientCatalog {
                needed: 14,
                available: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_assemble_empty_catalog() {
        let err = assemble(&Catalog::default(), &manual(1.0, 10.0), &mut create_rng(1));
        assert!(matches!(err, Err(Error::InsufficientCatalog { available: 0, .. })));
    }

    #[test]
    fn test_overflowing_includes_fill_starting_then_return_to_eligible() {
        let records: Vec<RawSongRecord> = (1..=30).map(|id| record(id, 5.0)).collect();
        let catalog = Catalog::build(&records, &[]);
        let include: BTreeSet<String> = (1..=20).map(|id| format!("Song {id} [HARD]")).collect();
        let options = GenerationOptions {
            include_songs: include.clone(),
            ..manual(1.0, 10.0)
        };

        let result = assemble(&catalog, &options, &mut create_rng(4)).unwrap();

        let used: BTreeSet<String> = result
            .pool()
            .cloned()
            .chain([result.goal_song.clone()])
            .collect();
        assert_eq!(used.len(), 19);
        assert!(used.is_subset(&include));

        let returned: Vec<&String> = result
            .leftover_songs
            .iter()
            .filter(|s| include.contains(*s))
            .collect();
        assert_eq!(returned.len(), 1);
        assert_eq!(result.leftover_songs.len(), 11);
    }
}
