//! Song pool generation for the Project DIVA Mega Mix+ randomizer.
//!
//! Builds a catalog from base and modded song tables, then assembles and
//! emits one seeded song pool per world.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod emit;
pub mod error;
pub mod pool;
pub mod rng;
pub mod world;

pub use catalog::{Catalog, CatalogStats, ModPack, RawSongRecord};
pub use chart::{DifficultyRatings, DifficultyTier, SongEntry};
pub use config::GenerationOptions;
pub use emit::{Emission, NameTable, SlotData, Trap};
pub use error::{Error, Result};
pub use pool::GenerationResult;
pub use world::{World, generate_world};
