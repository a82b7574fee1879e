//! Chart-related types.
//!
//! - `DifficultyTier` - the five chart tiers (EASY .. EXTRA_EXTREME)
//! - `DifficultyRatings` - per-tier star ratings with the packed mod-data encoding
//! - `SongEntry` - one chart of one song, the unit the catalog stores

mod difficulty;
mod ratings;
mod song;

pub use difficulty::*;
pub use ratings::*;
pub use song::*;
