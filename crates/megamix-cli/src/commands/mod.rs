//! CLI command implementations.

pub mod catalog;
pub mod generate;
pub mod ids;
