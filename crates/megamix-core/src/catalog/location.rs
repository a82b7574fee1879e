use serde::{Deserialize, Serialize};

use crate::chart::SongEntry;

/// Number of check locations every song provides.
pub const LOCATIONS_PER_SONG: usize = 2;

/// The two check locations of one catalog entry.
///
/// Even item codes own `code` and `code + 1`. Covers carry the odd code of
/// the base chart they replace and therefore land on the same pair, which is
/// safe because the catalog never holds both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationPair {
    pub first: u64,
    pub second: u64,
}

impl LocationPair {
    pub fn derive(entry: &SongEntry) -> Self {
        Self::from_item_code(entry.item_code)
    }

    pub fn from_item_code(code: u64) -> Self {
        let first = code - code % 2;
        Self {
            first,
            second: first + 1,
        }
    }

    pub fn codes(&self) -> [u64; LOCATIONS_PER_SONG] {
        [self.first, self.second]
    }

    /// Location names for a song item, `"{name}-0"` and `"{name}-1"`.
    pub fn names(display_name: &str) -> [String; LOCATIONS_PER_SONG] {
        [format!("{display_name}-0"), format!("{display_name}-1")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_code_owns_next() {
        let pair = LocationPair::from_item_code(2164);
        assert_eq!(pair.codes(), [2164, 2165]);
    }

    #[test]
    fn test_odd_code_shares_base_pair() {
        assert_eq!(
            LocationPair::from_item_code(2165),
            LocationPair::from_item_code(2164)
        );
    }

    #[test]
    fn test_neighbouring_tiers_do_not_overlap() {
        let hard = LocationPair::from_item_code(24);
        let extreme = LocationPair::from_item_code(26);
        assert!(hard.second < extreme.first);
    }

    #[test]
    fn test_names() {
        assert_eq!(
            LocationPair::names("Teo [HARD]"),
            ["Teo [HARD]-0".to_string(), "Teo [HARD]-1".to_string()]
        );
    }
}
