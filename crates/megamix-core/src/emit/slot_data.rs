use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-world data handed to the game client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotData {
    #[serde(rename = "victoryLocation")]
    pub victory_location: String,
    /// Goal item code rounded down to its song's code family
    #[serde(rename = "victoryID")]
    pub victory_id: u64,
    /// Song ids of the starting, included and goal songs, ascending
    #[serde(rename = "finalSongIDs")]
    pub final_song_ids: Vec<u32>,
    #[serde(rename = "leekWinCount")]
    pub leek_win_count: usize,
    #[serde(rename = "scoreGradeNeeded")]
    pub score_grade_needed: u8,
    /// Drop cleared songs from the in-game song list
    #[serde(rename = "autoRemove")]
    pub auto_remove: bool,
    #[serde(rename = "deathLink")]
    pub death_link: bool,
    /// Deaths tolerated before one is sent
    #[serde(rename = "deathLink_Amnesty")]
    pub death_link_amnesty: u32,
    /// Pack name to `[title, song_id]` of its songs in the final set
    #[serde(rename = "modData")]
    pub mod_data: BTreeMap<String, Vec<(String, u32)>>,
    /// Song id to relocated item code for remapped modded songs
    #[serde(rename = "modRemap")]
    pub mod_remap: BTreeMap<u32, u64>,
}
