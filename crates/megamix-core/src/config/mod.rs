//! Configuration.
//!
//! - `GenerationOptions` - the per-world constraint set, loaded from JSON or TOML
//! - Pool sizing, rating relaxation and fixed item constants

mod options;

pub use options::*;

/// Pool sizing.
pub mod pool {
    /// Songs a seed needs beyond its starting songs: ten interim songs plus
    /// the goal song.
    pub const MIN_EXTRA_SONGS: usize = 11;
}

/// Star rating window handling.
///
/// Relaxation widens the window by half a star per attempt: the upper bound
/// first, the lower bound once the upper one reaches the catalog's maximum.
pub mod rating {
    pub const RELAX_STEP: f64 = 0.5;

    /// Bounds of the rating presets and of manual rating options.
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 10.0;
}

/// Fixed (non-song) items and the location graph root.
pub mod items {
    /// Currency item required in aggregate to unlock the goal song.
    pub const LEEK_NAME: &str = "Leek";
    pub const LEEK_CODE: u64 = 1;

    /// Generic filler items: (name, code).
    pub const FILLER_ITEMS: [(&str, u64); 1] = [("SAFE", 2)];

    pub const MENU_REGION: &str = "Menu";
}
