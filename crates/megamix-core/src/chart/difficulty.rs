use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum DifficultyTier {
    #[serde(rename = "EASY")]
    #[strum(serialize = "EASY")]
    Easy = 0,
    #[serde(rename = "NORMAL")]
    #[strum(serialize = "NORMAL")]
    Normal = 1,
    #[serde(rename = "HARD")]
    #[strum(serialize = "HARD")]
    Hard = 2,
    #[serde(rename = "EXTREME")]
    #[strum(serialize = "EXTREME")]
    Extreme = 3,
    #[serde(rename = "EXTRA_EXTREME", alias = "EXEXTREME")]
    #[strum(to_string = "EXTRA_EXTREME", serialize = "EXEXTREME")]
    ExExtreme = 4,
}

impl DifficultyTier {
    /// Number of tiers a song can chart.
    pub const COUNT: usize = 5;

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Offset of this tier inside a song's block of ten item codes.
    ///
    /// Tiers take the even slots so that `code + 1` is always free for the
    /// second location (and for a cover's odd code).
    pub fn code_offset(&self) -> u64 {
        2 * (*self as u64)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Inclusive range of tiers between two endpoints given in any order.
    pub fn range(a: Self, b: Self) -> Vec<Self> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self::iter().filter(|tier| (lo..=hi).contains(tier)).collect()
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
