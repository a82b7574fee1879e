//! Raw catalog records and the loaders that produce them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::chart::{DifficultyRatings, DifficultyTier};
use crate::error::{Error, RecordError, Result};

/// Loosely typed scalar as found in song tables.
///
/// The game tables store flags and ratings as strings (`"true"`, `"7.5"`);
/// hand-written tables often use native JSON values instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Self::Number(_) => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One chart of one song as supplied by a song table, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSongRecord {
    #[serde(default)]
    pub song_id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub singers: Vec<String>,
    #[serde(default)]
    pub dlc: Option<RawValue>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default, rename = "difficultyRating")]
    pub difficulty_rating: Option<RawValue>,
}

/// A record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
    pub song_id: u32,
    pub name: String,
    pub singers: BTreeSet<String>,
    pub dlc: bool,
    pub tier: DifficultyTier,
    pub rating: f64,
}

impl RawSongRecord {
    pub fn validate(&self) -> std::result::Result<SongRecord, RecordError> {
        let song_id = self.song_id.ok_or(RecordError::MissingField("song_id"))?;
        if song_id == 0 {
            return Err(RecordError::ReservedSongId);
        }

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(RecordError::MissingField("name"))?;

        let dlc_raw = self.dlc.as_ref().ok_or(RecordError::MissingField("dlc"))?;
        let dlc = dlc_raw
            .as_bool()
            .ok_or_else(|| RecordError::InvalidDlcFlag(dlc_raw.describe()))?;

        let difficulty = self
            .difficulty
            .as_deref()
            .ok_or(RecordError::MissingField("difficulty"))?;
        let tier = DifficultyTier::from_str(difficulty.trim())
            .map_err(|_| RecordError::UnknownDifficulty(difficulty.to_string()))?;

        let rating_raw = self
            .difficulty_rating
            .as_ref()
            .ok_or(RecordError::MissingField("difficultyRating"))?;
        let rating = rating_raw
            .as_f64()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| RecordError::InvalidRating(rating_raw.describe()))?;

        Ok(SongRecord {
            song_id,
            name: name.to_string(),
            singers: self.singers.iter().map(|s| s.trim().to_string()).collect(),
            dlc,
            tier,
            rating,
        })
    }
}

/// A player-supplied song pack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModPack {
    /// Origin tag used for mod scoping
    pub name: String,
    pub songs: Vec<RawSongRecord>,
}

impl ModPack {
    pub fn new(name: impl Into<String>, songs: Vec<RawSongRecord>) -> Self {
        Self {
            name: name.into(),
            songs,
        }
    }

    /// Load packs from a mod-data descriptor file.
    pub fn load_mod_data<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let content = fs::read_to_string(path)?;
        Self::parse_mod_data(&content)
    }

    /// Parse a mod-data descriptor.
    ///
    /// Format: `{"pack name": [["title", song_id, packed_ratings], ...], ...}`
    /// where `packed_ratings` follows [`DifficultyRatings::decode`]. Every
    /// charted tier becomes one record. Malformed songs are skipped.
    pub fn parse_mod_data(content: &str) -> Result<Vec<Self>> {
        let root: Value = serde_json::from_str(content)?;
        let Value::Object(packs) = root else {
            return Err(Error::ModDataParse(
                "expected an object mapping pack names to song lists".to_string(),
            ));
        };

        let mut result = Vec::with_capacity(packs.len());
        for (pack_name, songs) in packs {
            let Value::Array(songs) = songs else {
                warn!("Mod pack {:?} is not a song list, skipping", pack_name);
                continue;
            };

            let mut records = Vec::new();
            for song in &songs {
                match parse_mod_song(song) {
                    Some(expanded) if !expanded.is_empty() => records.extend(expanded),
                    Some(_) => warn!("Mod song {} in {:?} has no charts, skipping", song, pack_name),
                    None => warn!("Malformed mod song {} in {:?}, skipping", song, pack_name),
                }
            }

            debug!("Mod pack {:?}: {} charts", pack_name, records.len());
            result.push(Self::new(pack_name, records));
        }

        Ok(result)
    }
}

/// Expand one `[title, song_id, packed]` triple into per-tier records.
fn parse_mod_song(song: &Value) -> Option<Vec<RawSongRecord>> {
    let fields = song.as_array()?;
    let [title, song_id, packed] = fields.as_slice() else {
        return None;
    };
    let title = title.as_str()?;
    let song_id = u32::try_from(song_id.as_u64()?).ok()?;
    let packed = u32::try_from(packed.as_u64()?).ok()?;

    let records = DifficultyRatings::decode(packed)
        .iter()
        .map(|(tier, rating)| RawSongRecord {
            song_id: Some(song_id),
            name: Some(title.to_string()),
            singers: Vec::new(),
            dlc: Some(RawValue::Bool(false)),
            difficulty: Some(tier.to_string()),
            difficulty_rating: Some(RawValue::Number(rating)),
        })
        .collect();
    Some(records)
}

/// Load the base song table: a JSON array of records.
///
/// Elements that do not even deserialize as a record are logged and skipped
/// here; field-level validation happens in the catalog builder.
pub fn load_base_songs<P: AsRef<Path>>(path: P) -> Result<Vec<RawSongRecord>> {
    let content = fs::read_to_string(path)?;
    parse_base_songs(&content)
}

pub fn parse_base_songs(content: &str) -> Result<Vec<RawSongRecord>> {
    let values: Vec<Value> = serde_json::from_str(content)?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawSongRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping song table entry #{}: {}", index, e),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(song_id: u32, name: &str, difficulty: &str, rating: &str) -> RawSongRecord {
        RawSongRecord {
            song_id: Some(song_id),
            name: Some(name.to_string()),
            singers: vec!["Hatsune Miku".to_string()],
            dlc: Some(RawValue::Text("false".to_string())),
            difficulty: Some(difficulty.to_string()),
            difficulty_rating: Some(RawValue::Text(rating.to_string())),
        }
    }

    #[test]
    fn test_validate_string_typed_record() {
        let record = raw(1, "Love is War", "EXTREME", "7.5").validate().unwrap();
        assert_eq!(record.song_id, 1);
        assert_eq!(record.tier, DifficultyTier::Extreme);
        assert_eq!(record.rating, 7.5);
        assert!(!record.dlc);
        assert!(record.singers.contains("Hatsune Miku"));
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut record = raw(1, "Love is War", "EASY", "2");
        record.dlc = None;
        assert_eq!(record.validate(), Err(RecordError::MissingField("dlc")));

        let record = raw(1, "  ", "EASY", "2");
        assert_eq!(record.validate(), Err(RecordError::MissingField("name")));

        let record = RawSongRecord::default();
        assert_eq!(record.validate(), Err(RecordError::MissingField("song_id")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            raw(0, "Zero", "EASY", "2").validate(),
            Err(RecordError::ReservedSongId)
        );
        assert_eq!(
            raw(3, "Song", "ENCORE", "2").validate(),
            Err(RecordError::UnknownDifficulty("ENCORE".to_string()))
        );
        assert_eq!(
            raw(3, "Song", "HARD", "lots").validate(),
            Err(RecordError::InvalidRating("lots".to_string()))
        );

        let mut record = raw(3, "Song", "HARD", "5");
        record.dlc = Some(RawValue::Text("maybe".to_string()));
        assert_eq!(
            record.validate(),
            Err(RecordError::InvalidDlcFlag("maybe".to_string()))
        );
    }

    #[test]
    fn test_parse_base_songs_skips_undecodable_entries() {
        let content = r#"[
            {"song_id": 1, "name": "Love is War", "singers": ["Hatsune Miku"],
             "dlc": "false", "difficulty": "HARD", "difficultyRating": "5.5"},
            {"song_id": "not a number", "name": "Broken"},
            {"song_id": 2, "name": "World is Mine", "dlc": true,
             "difficulty": "EASY", "difficultyRating": 3}
        ]"#;

        let records = parse_base_songs(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].dlc, Some(RawValue::Bool(true)));
        assert_eq!(records[1].validate().unwrap().rating, 3.0);
    }

    #[test]
    fn test_parse_mod_data_expands_packed_ratings() {
        // EASY 2, HARD 5.5
        let packed = (2 << 20) | ((16 | 5) << 10);
        let content = format!(
            r#"{{"Cool Pack": [["Custom Song", 5001, {packed}], ["Bad", "x", 1]]}}"#
        );

        let packs = ModPack::parse_mod_data(&content).unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].name, "Cool Pack");

        let records: Vec<SongRecord> = packs[0]
            .songs
            .iter()
            .map(|r| r.validate().unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tier, DifficultyTier::Easy);
        assert_eq!(records[0].rating, 2.0);
        assert_eq!(records[1].tier, DifficultyTier::Hard);
        assert_eq!(records[1].rating, 5.5);
        assert!(records.iter().all(|r| r.song_id == 5001 && r.singers.is_empty()));
    }

    #[test]
    fn test_parse_mod_data_rejects_non_object() {
        assert!(matches!(
            ModPack::parse_mod_data("[1, 2, 3]"),
            Err(Error::ModDataParse(_))
        ));
    }
}
