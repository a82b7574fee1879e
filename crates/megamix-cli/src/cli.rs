//! CLI argument definitions for megamix.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "megamix")]
#[command(about = "Song pool generator for the Mega Mix+ randomizer", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate one world per options file
    Generate {
        /// Base song table (JSON array)
        #[arg(long, value_name = "FILE", env = "MEGAMIX_CATALOG")]
        catalog: String,
        /// Mod-data descriptor, may be repeated
        #[arg(long = "mods", value_name = "FILE")]
        mods: Vec<String>,
        /// World options (JSON or TOML), one world per file
        #[arg(long = "options", value_name = "FILE", required = true)]
        options: Vec<String>,
        /// Master seed
        #[arg(long, env = "MEGAMIX_SEED")]
        seed: u64,
        /// Output file path (JSON, stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show catalog statistics
    Catalog {
        /// Base song table (JSON array)
        #[arg(long, value_name = "FILE", env = "MEGAMIX_CATALOG")]
        catalog: String,
        /// Mod-data descriptor, may be repeated
        #[arg(long = "mods", value_name = "FILE")]
        mods: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print item and location name to id tables
    Ids {
        /// Base song table (JSON array)
        #[arg(long, value_name = "FILE", env = "MEGAMIX_CATALOG")]
        catalog: String,
        /// Mod-data descriptor, may be repeated
        #[arg(long = "mods", value_name = "FILE")]
        mods: Vec<String>,
    },
}
