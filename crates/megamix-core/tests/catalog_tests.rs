//! Catalog loading tests
//!
//! Base song tables and mod-data descriptors read from disk.

use std::io::Write;

use megamix_core::DifficultyTier;
use megamix_core::catalog::{Catalog, ModPack, load_base_songs};
use megamix_core::emit::NameTable;
use tempfile::NamedTempFile;

const BASE_SONGS: &str = r#"[
    {"song_id": 1, "name": "Love is War", "singers": ["Hatsune Miku"], "dlc": "false",
     "difficulty": "HARD", "difficultyRating": "6.5"},
    {"song_id": 1, "name": "Love is War", "singers": ["Hatsune Miku"], "dlc": "false",
     "difficulty": "EXTREME", "difficultyRating": "8"},
    {"song_id": 2, "name": "World is Mine", "singers": ["Hatsune Miku"], "dlc": "false",
     "difficulty": "EASY", "difficultyRating": "2"},
    {"song_id": 3, "name": "Tell Your World★", "singers": ["Hatsune Miku"], "dlc": true,
     "difficulty": "NORMAL", "difficultyRating": 4.5},
    {"song_id": 4, "name": "Broken", "singers": [], "dlc": "maybe",
     "difficulty": "HARD", "difficultyRating": "5"},
    "not a record"
]"#;

// 23296 = 0b00000_00000_10110_11000_00000: HARD 6.5, EXTREME 8.5 (covers song 1)
// 4194304 = 0b00100_00000_00000_00000_00000: EASY 4.0
const MOD_DATA: &str = r#"{
    "Cover Pack": [["Love is War (Cover)", 1, 23296]],
    "Originals": [["Brand New Day", 900, 4194304], ["Broken", "x", 1]]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

mod base_table_tests {
    use super::*;

    #[test]
    fn test_load_and_build_base_table() {
        let file = write_temp(BASE_SONGS);
        let records = load_base_songs(file.path()).unwrap();
        // the string element is dropped while loading
        assert_eq!(records.len(), 5);

        let catalog = Catalog::build(&records, &[]);
        // the record with an unreadable dlc flag is dropped while building
        assert_eq!(catalog.len(), 4);

        let sanitized = catalog.get("Tell Your World [NORMAL]").unwrap();
        assert!(sanitized.is_dlc);
        assert_eq!(sanitized.rating, 4.5);
        assert_eq!(sanitized.item_code, 32);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_base_songs("/nonexistent/songs.json").is_err());
    }
}

mod mod_data_tests {
    use super::*;

    #[test]
    fn test_load_mod_data_and_cover_base_song() {
        let base = load_base_songs(write_temp(BASE_SONGS).path()).unwrap();
        let packs = ModPack::load_mod_data(write_temp(MOD_DATA).path()).unwrap();
        assert_eq!(packs.len(), 2);

        let catalog = Catalog::build(&base, &packs);

        assert!(catalog.get("Love is War [HARD]").is_none());
        let cover = catalog.get("Love is War (Cover) [EXTREME]").unwrap();
        assert_eq!(cover.item_code, 17);
        assert_eq!(cover.rating, 8.5);
        assert_eq!(cover.pack.as_deref(), Some("Cover Pack"));

        let original = catalog.get("Brand New Day [EASY]").unwrap();
        assert_eq!(original.difficulty_tier, DifficultyTier::Easy);
        assert_eq!(original.item_code, 9000);
        assert!(original.is_modded && !original.is_cover());
    }

    #[test]
    fn test_tables_cover_every_chart() {
        let base = load_base_songs(write_temp(BASE_SONGS).path()).unwrap();
        let packs = ModPack::load_mod_data(write_temp(MOD_DATA).path()).unwrap();
        let catalog = Catalog::build(&base, &packs);

        let items = NameTable::items(&catalog);
        let locations = NameTable::locations(&catalog);
        assert_eq!(items.len(), catalog.len() + 5);
        assert_eq!(locations.len(), catalog.len() * 2);
        assert_eq!(locations.id("Love is War (Cover) [EXTREME]-0"), Some(16));
    }

    #[test]
    fn test_non_object_mod_data_is_rejected() {
        assert!(ModPack::parse_mod_data("[1, 2, 3]").is_err());
    }
}
