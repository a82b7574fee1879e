use std::collections::BTreeSet;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rating;
use crate::chart::DifficultyTier;
use crate::emit::{EmitOptions, Trap};
use crate::error::{Error, Result};
use crate::pool::ModScope;

/// Accepted option ranges.
pub mod ranges {
    use std::ops::RangeInclusive;

    pub const STARTING_SONGS: RangeInclusive<usize> = 3..=10;
    pub const ADDITIONAL_SONGS: RangeInclusive<usize> = 15..=500;
    pub const LEEK_PERCENTAGE: RangeInclusive<u32> = 10..=40;
    pub const LEEK_WIN_PERCENTAGE: RangeInclusive<u32> = 50..=100;
    pub const DUPLICATE_PERCENTAGE: RangeInclusive<u32> = 0..=100;
    pub const INCLUDE_PERCENTAGE: RangeInclusive<u32> = 0..=100;
    pub const TRAP_PERCENTAGE: RangeInclusive<u32> = 0..=100;
    pub const DEATH_LINK_AMNESTY: RangeInclusive<u32> = 0..=10;
}

/// Which chart tiers a song must offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyMode {
    #[default]
    Any,
    Easy,
    Normal,
    Hard,
    Extreme,
    #[serde(alias = "exextreme")]
    ExExtreme,
    /// Use `song_difficulty_min..=song_difficulty_max`
    Manual,
}

/// Star rating window presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingMode {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
    /// Use `song_difficulty_rating_min..=song_difficulty_rating_max`
    Manual,
}

impl RatingMode {
    /// Window of a preset; `None` for `Manual`.
    pub fn preset_window(&self) -> Option<(f64, f64)> {
        match self {
            Self::Any => Some((rating::MIN, rating::MAX)),
            Self::Easy => Some((1.0, 4.0)),
            Self::Medium => Some((4.0, 6.0)),
            Self::Hard => Some((6.0, 8.0)),
            Self::Expert => Some((7.0, 9.0)),
            Self::Master => Some((8.0, 10.0)),
            Self::Manual => None,
        }
    }
}

/// Grade a clear must reach before its checks are sent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GradeNeeded {
    #[default]
    Standard = 0,
    Great = 1,
    Excellent = 2,
    Perfect = 3,
}

impl GradeNeeded {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// Player constraints for one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub allow_dlc_songs: bool,
    pub starting_song_count: usize,
    /// Pool size excluding starting songs and the goal song
    pub additional_song_count: usize,
    pub song_difficulty_mode: DifficultyMode,
    pub song_difficulty_min: DifficultyTier,
    pub song_difficulty_max: DifficultyTier,
    pub song_difficulty_rating: RatingMode,
    pub song_difficulty_rating_min: f64,
    pub song_difficulty_rating_max: f64,
    pub grade_needed: GradeNeeded,
    pub leek_count_percentage: u32,
    pub leek_win_count_percentage: u32,
    /// Share of spare locations filled with duplicate songs rather than filler
    pub duplicate_song_percentage: u32,
    /// Share of the remaining spare locations filled with traps
    pub trap_percentage: u32,
    pub traps_enabled: BTreeSet<Trap>,
    pub include_songs: BTreeSet<String>,
    /// Share of the song cap the include list may take; the rest of the
    /// list goes back to the random pool
    pub include_songs_percentage: u32,
    pub exclude_songs: BTreeSet<String>,
    pub exclude_singers: BTreeSet<String>,
    pub start_inventory: Vec<String>,
    /// Candidates for the goal song; empty picks one at random
    pub goal_song: BTreeSet<String>,
    pub mod_scope: ModScope,
    pub auto_remove_songs: bool,
    pub death_link: bool,
    /// Deaths tolerated before one is sent
    pub death_link_amnesty: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            allow_dlc_songs: false,
            starting_song_count: 5,
            additional_song_count: 40,
            song_difficulty_mode: DifficultyMode::Any,
            song_difficulty_min: DifficultyTier::Easy,
            song_difficulty_max: DifficultyTier::ExExtreme,
            song_difficulty_rating: RatingMode::Any,
            song_difficulty_rating_min: 4.0,
            song_difficulty_rating_max: 8.0,
            grade_needed: GradeNeeded::Standard,
            leek_count_percentage: 20,
            leek_win_count_percentage: 80,
            duplicate_song_percentage: 100,
            trap_percentage: 0,
            traps_enabled: Trap::all(),
            include_songs: BTreeSet::new(),
            include_songs_percentage: 100,
            exclude_songs: BTreeSet::new(),
            exclude_singers: BTreeSet::new(),
            start_inventory: Vec::new(),
            goal_song: BTreeSet::new(),
            mod_scope: ModScope::default(),
            auto_remove_songs: false,
            death_link: false,
            death_link_amnesty: 0,
        }
    }
}

impl GenerationOptions {
    /// Load options from a file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let options = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        debug!("Loaded options from {:?}", path);
        Ok(options)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Reject numeric options outside their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        check_range("starting_song_count", self.starting_song_count, ranges::STARTING_SONGS)?;
        check_range(
            "additional_song_count",
            self.additional_song_count,
            ranges::ADDITIONAL_SONGS,
        )?;
        check_range(
            "leek_count_percentage",
            self.leek_count_percentage,
            ranges::LEEK_PERCENTAGE,
        )?;
        check_range(
            "leek_win_count_percentage",
            self.leek_win_count_percentage,
            ranges::LEEK_WIN_PERCENTAGE,
        )?;
        check_range(
            "duplicate_song_percentage",
            self.duplicate_song_percentage,
            ranges::DUPLICATE_PERCENTAGE,
        )?;
        check_range(
            "include_songs_percentage",
            self.include_songs_percentage,
            ranges::INCLUDE_PERCENTAGE,
        )?;
        check_range("trap_percentage", self.trap_percentage, ranges::TRAP_PERCENTAGE)?;
        check_range(
            "death_link_amnesty",
            self.death_link_amnesty,
            ranges::DEATH_LINK_AMNESTY,
        )?;

        if self.song_difficulty_rating == RatingMode::Manual {
            for (name, value) in [
                ("song_difficulty_rating_min", self.song_difficulty_rating_min),
                ("song_difficulty_rating_max", self.song_difficulty_rating_max),
            ] {
                if !(rating::MIN..=rating::MAX).contains(&value) {
                    return Err(Error::InvalidOption(format!(
                        "{name} must be within {}..={}, got {value}",
                        rating::MIN,
                        rating::MAX
                    )));
                }
            }
        }
        Ok(())
    }

    /// Tiers a song may be represented by.
    pub fn allowed_tiers(&self) -> Vec<DifficultyTier> {
        match self.song_difficulty_mode {
            DifficultyMode::Any => {
                DifficultyTier::range(DifficultyTier::Easy, DifficultyTier::ExExtreme)
            }
            DifficultyMode::Easy => vec![DifficultyTier::Easy],
            DifficultyMode::Normal => vec![DifficultyTier::Normal],
            DifficultyMode::Hard => vec![DifficultyTier::Hard],
            DifficultyMode::Extreme => vec![DifficultyTier::Extreme],
            DifficultyMode::ExExtreme => vec![DifficultyTier::ExExtreme],
            DifficultyMode::Manual => {
                DifficultyTier::range(self.song_difficulty_min, self.song_difficulty_max)
            }
        }
    }

    /// Initial star rating window, lower bound first.
    pub fn rating_window(&self) -> (f64, f64) {
        self.song_difficulty_rating.preset_window().unwrap_or_else(|| {
            let (a, b) = (self.song_difficulty_rating_min, self.song_difficulty_rating_max);
            (a.min(b), a.max(b))
        })
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            leek_count_percentage: self.leek_count_percentage,
            leek_win_count_percentage: self.leek_win_count_percentage,
            duplicate_song_percentage: self.duplicate_song_percentage,
            trap_percentage: self.trap_percentage,
            traps_enabled: self.traps_enabled.clone(),
            grade_needed: self.grade_needed,
            auto_remove_songs: self.auto_remove_songs,
            death_link: self.death_link,
            death_link_amnesty: self.death_link_amnesty,
        }
    }
}

fn check_range<T>(name: &str, value: T, range: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidOption(format!(
            "{name} must be within {}..={}, got {value}",
            range.start(),
            range.end()
        )))
    }
}
