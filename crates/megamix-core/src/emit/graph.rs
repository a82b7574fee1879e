use serde::Serialize;

use crate::catalog::{LOCATIONS_PER_SONG, LocationPair};
use crate::chart::SongEntry;
use crate::config::items;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub code: u64,
}

/// Two locations reachable once the song item is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongGate {
    pub required_item: String,
    pub locations: [Location; LOCATIONS_PER_SONG],
}

impl SongGate {
    pub fn for_song(entry: &SongEntry) -> Self {
        let pair = LocationPair::derive(entry);
        let [first, second] = LocationPair::names(&entry.display_name);
        let [first_code, second_code] = pair.codes();
        Self {
            required_item: entry.display_name.clone(),
            locations: [
                Location {
                    name: first,
                    code: first_code,
                },
                Location {
                    name: second,
                    code: second_code,
                },
            ],
        }
    }
}

/// Goal condition: holding `count` copies of `item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub goal_song: String,
    pub item: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGraph {
    pub root: String,
    pub gates: Vec<SongGate>,
    pub completion: Completion,
}

impl LocationGraph {
    pub fn new(gates: Vec<SongGate>, goal_song: &str, leek_win_count: usize) -> Self {
        Self {
            root: items::MENU_REGION.to_string(),
            gates,
            completion: Completion {
                goal_song: goal_song.to_string(),
                item: items::LEEK_NAME.to_string(),
                count: leek_win_count,
            },
        }
    }

    pub fn location_count(&self) -> usize {
        self.gates.len() * LOCATIONS_PER_SONG
    }
}
