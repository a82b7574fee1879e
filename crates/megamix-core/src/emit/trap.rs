use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Trap items that may take the place of filler.
///
/// Codes sit in the free range below the first song code (10).
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
    IntoStaticStr,
    EnumIter,
)]
pub enum Trap {
    #[serde(rename = "Hidden Trap", alias = "hidden")]
    #[strum(serialize = "Hidden Trap")]
    Hidden,
    #[serde(rename = "Sudden Trap", alias = "sudden")]
    #[strum(serialize = "Sudden Trap")]
    Sudden,
    #[serde(rename = "Icon Trap", alias = "icon")]
    #[strum(serialize = "Icon Trap")]
    Icon,
}

impl Trap {
    pub fn code(&self) -> u64 {
        match self {
            Self::Hidden => 4,
            Self::Sudden => 5,
            Self::Icon => 9,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn all() -> BTreeSet<Trap> {
        Self::iter().collect()
    }
}
