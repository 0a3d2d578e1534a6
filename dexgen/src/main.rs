// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use anywho::{Error, anywho};
use dexplorer::{DexConfig, Snapshot, logging};

use crate::fetch::SnapshotFetcher;

mod fetch;

const DEFAULT_SNAPSHOT_PATH: &str = "assets/pokemon.ron";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = DexConfig::load_or_default()?;
    logging::init(&config.log_filter);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(flag) = args.first() else {
        print_help();
        return Ok(());
    };
    let path = args.get(1).map(PathBuf::from);

    match flag.as_str() {
        "-p" => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
            write_snapshot(&config, path).await
        }
        "-c" => {
            let path = path
                .or_else(DexConfig::default_path)
                .ok_or_else(|| anywho!("no config directory on this platform, pass a path"))?;
            DexConfig::default().save(&path)?;
            println!("Default config written to {}", path.display());
            Ok(())
        }
        "-h" | "--help" => {
            print_help();
            Ok(())
        }
        _ => {
            println!("Invalid flag: {flag}");
            print_help();
            Ok(())
        }
    }
}

async fn write_snapshot(config: &DexConfig, path: PathBuf) -> Result<(), Error> {
    println!("Downloading Pokémon data");

    let fetcher = SnapshotFetcher::new(config.max_concurrent_fetches)?;
    let snapshot = Snapshot::new(fetcher.fetch_all().await?);

    if snapshot.pokemon.is_empty() {
        return Err(anywho!("PokéApi returned no Pokémon, not overwriting {}", path.display()));
    }

    snapshot.save(&path)?;
    println!("{} Pokémon written to {}", snapshot.pokemon.len(), path.display());
    Ok(())
}

fn print_help() {
    println!("Usage: dexgen [FLAG] [PATH]");
    println!();
    println!("FLAGS:");
    println!("  -p    Download every Pokémon into a snapshot (default path: {DEFAULT_SNAPSHOT_PATH})");
    println!("  -c    Write the default config file (default path: the user config dir)");
    println!("  -h    Show this help");
    println!();
    println!("You can only pass one flag at a time.");
}
