use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::DifficultyTier;

/// Item codes reserved per song id: five tiers, two codes each.
pub const CODES_PER_SONG: u64 = 10;

/// One chart of one song, as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongEntry {
    pub song_id: u32,
    pub display_name: String,
    /// Sanitized title the display name was built from
    pub title: String,
    /// Always empty for modded songs
    pub singers: BTreeSet<String>,
    pub is_dlc: bool,
    pub is_modded: bool,
    /// Origin tag of the pack a modded song came from
    pub pack: Option<String>,
    pub difficulty_tier: DifficultyTier,
    pub rating: f64,
    pub item_code: u64,
}

impl SongEntry {
    /// Item code of a song chart: the song's block of ten, the tier's even
    /// slot, plus one for covers of a base-game song.
    pub fn item_code_for(song_id: u32, tier: DifficultyTier, cover: bool) -> u64 {
        song_id as u64 * CODES_PER_SONG + tier.code_offset() + u64::from(cover)
    }

    /// Covers carry an odd item code.
    pub fn is_cover(&self) -> bool {
        self.item_code % 2 == 1
    }

    /// Start of the code family shared by every chart of this song.
    pub fn family_code(&self) -> u64 {
        (self.item_code / CODES_PER_SONG) * CODES_PER_SONG
    }

    pub fn has_any_singer(&self, singers: &BTreeSet<String>) -> bool {
        !self.singers.is_disjoint(singers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(song_id: u32, tier: DifficultyTier, cover: bool) -> SongEntry {
        SongEntry {
            song_id,
            display_name: format!("Song {song_id} [{tier}]"),
            title: format!("Song {song_id}"),
            singers: BTreeSet::new(),
            is_dlc: false,
            is_modded: cover,
            pack: None,
            difficulty_tier: tier,
            rating: 5.0,
            item_code: SongEntry::item_code_for(song_id, tier, cover),
        }
    }

    #[test]
    fn test_item_code_layout() {
        assert_eq!(SongEntry::item_code_for(1, DifficultyTier::Easy, false), 10);
        assert_eq!(SongEntry::item_code_for(1, DifficultyTier::ExExtreme, false), 18);
        assert_eq!(SongEntry::item_code_for(216, DifficultyTier::Hard, true), 2165);
    }

    #[test]
    fn test_cover_and_family() {
        let base = entry(42, DifficultyTier::Extreme, false);
        let cover = entry(42, DifficultyTier::Extreme, true);

        assert!(!base.is_cover());
        assert!(cover.is_cover());
        assert_eq!(base.family_code(), 420);
        assert_eq!(cover.family_code(), 420);
    }

    #[test]
    fn test_has_any_singer() {
        let mut song = entry(7, DifficultyTier::Hard, false);
        song.singers.insert("MEIKO".to_string());

        let blocked: BTreeSet<String> = ["KAITO".to_string()].into();
        assert!(!song.has_any_singer(&blocked));

        let blocked: BTreeSet<String> = ["MEIKO".to_string()].into();
        assert!(song.has_any_singer(&blocked));
    }
}
