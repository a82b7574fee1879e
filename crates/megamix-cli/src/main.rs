mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("megamix=info,megamix_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Generate {
            catalog,
            mods,
            options,
            seed,
            output,
        } => commands::generate::run(&catalog, &mods, &options, seed, output.as_deref()),
        Command::Catalog {
            catalog,
            mods,
            json,
        } => commands::catalog::run(&catalog, &mods, json),
        Command::Ids { catalog, mods } => commands::ids::run(&catalog, &mods),
    }
}
