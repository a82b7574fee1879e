//! Per-tier star ratings and their packed mod-data encoding.
//!
//! Mod packs describe a song's charts with a single integer: five 5-bit
//! groups, one per tier, with EASY in the most significant group and
//! EXTRA_EXTREME in the least significant one. Inside a group the low four
//! bits hold the whole stars and bit 4 adds half a star. A zero group means
//! the song has no chart at that tier.

use serde::{Deserialize, Serialize};

use super::DifficultyTier;

const GROUP_BITS: u32 = 5;
const WHOLE_MASK: u32 = 0b1111;
const HALF_BIT: u32 = 0b1_0000;

/// Highest rating a group can express (15 stars plus a half).
pub const MAX_PACKED_RATING: f64 = 15.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRatings([Option<f64>; DifficultyTier::COUNT]);

impl DifficultyRatings {
    pub fn new(ratings: [Option<f64>; DifficultyTier::COUNT]) -> Self {
        Self(ratings)
    }

    pub fn get(&self, tier: DifficultyTier) -> Option<f64> {
        self.0[tier.index()]
    }

    pub fn set(&mut self, tier: DifficultyTier, rating: Option<f64>) {
        self.0[tier.index()] = rating;
    }

    /// Tiers that carry a chart, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTier, f64)> + '_ {
        self.0.iter().enumerate().filter_map(|(i, rating)| {
            let tier = DifficultyTier::from_u8(i as u8)?;
            rating.map(|r| (tier, r))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Unpack the mod-data integer. Bits above the five groups are ignored.
    pub fn decode(packed: u32) -> Self {
        let mut ratings = [None; DifficultyTier::COUNT];
        for (i, slot) in ratings.iter_mut().enumerate() {
            let shift = GROUP_BITS * (DifficultyTier::COUNT - 1 - i) as u32;
            let group = (packed >> shift) & (WHOLE_MASK | HALF_BIT);
            if group == 0 {
                continue;
            }
            let whole = (group & WHOLE_MASK) as f64;
            let half = if group & HALF_BIT != 0 { 0.5 } else { 0.0 };
            *slot = Some(whole + half);
        }
        Self(ratings)
    }

    /// Pack into the mod-data integer.
    ///
    /// Returns `None` when a rating is not a positive multiple of 0.5 no
    /// larger than [`MAX_PACKED_RATING`].
    pub fn encode(&self) -> Option<u32> {
        let mut packed = 0u32;
        for (i, rating) in self.0.iter().enumerate() {
            let Some(rating) = rating else { continue };
            let halves = rating * 2.0;
            if halves.fract() != 0.0 || *rating <= 0.0 || *rating > MAX_PACKED_RATING {
                return None;
            }
            let halves = halves as u32;
            let group = (halves / 2) | if halves % 2 == 1 { HALF_BIT } else { 0 };
            let shift = GROUP_BITS * (DifficultyTier::COUNT - 1 - i) as u32;
            packed |= group << shift;
        }
        Some(packed)
    }
}
