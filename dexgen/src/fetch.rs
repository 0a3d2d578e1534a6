// SPDX-License-Identifier: GPL-3.0-only

use std::{sync::Arc, time::Duration};

use anywho::{Error, anywho};
use dexplorer::entities::{FromApi, Pokemon, PokemonSummary, Species};
use futures::StreamExt;
use serde_json::Value;
use rustemon::client::{
    CacheMode, CacheOptions, MokaManager, RustemonClient, RustemonClientBuilder,
};

/// Pulls the whole Pokémon list out of PokéApi through rustemon
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    client: Arc<RustemonClient>,
    concurrency: usize,
}

impl SnapshotFetcher {
    pub fn new(concurrency: usize) -> Result<Self, Error> {
        let client = RustemonClientBuilder::default()
            .with_manager(MokaManager::default())
            .with_mode(CacheMode::NoStore)
            .with_options(CacheOptions {
                shared: true,
                cache_heuristic: 0.1,
                immutable_min_time_to_live: Duration::from_secs(3600),
                ignore_cargo_cult: true,
            })
            .try_build()
            .map_err(|e| anywho!("failed to build the PokéApi client: {e}"))?;

        Ok(Self {
            client: Arc::new(client),
            concurrency: concurrency.max(1),
        })
    }

    /// Every Pokémon that could be fetched, failures are logged and skipped
    pub async fn fetch_all(&self) -> Result<Vec<PokemonSummary>, Error> {
        let all_entries = rustemon::pokemon::pokemon::get_all_entries(&self.client).await?;
        tracing::info!(count = all_entries.len(), "fetching Pokémon");

        let summaries = futures::stream::iter(all_entries)
            .map(|entry| async move {
                let result = self.fetch_summary(&entry.name).await;
                if let Err(e) = &result {
                    tracing::warn!(name = %entry.name, error = %e, "skipping Pokémon");
                }
                result.ok()
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|summary| async move { summary })
            .collect::<Vec<_>>()
            .await;

        Ok(summaries)
    }

    async fn fetch_summary(&self, name: &str) -> Result<PokemonSummary, Error> {
        let pokemon = rustemon::pokemon::pokemon::get_by_name(name, &self.client).await?;

        let species =
            rustemon::pokemon::pokemon_species::get_by_name(&pokemon.species.name, &self.client)
                .await;
        let species = match species {
            Ok(species) => Some(serde_json::to_value(&species)?),
            Err(e) => {
                tracing::debug!(name, error = %e, "species not available");
                None
            }
        };

        summary_from_api(&serde_json::to_value(&pokemon)?, species.as_ref())
    }
}

/// Maps PokéApi documents into a list row the same way the library client does
fn summary_from_api(pokemon: &Value, species: Option<&Value>) -> Result<PokemonSummary, Error> {
    let pokemon = Pokemon::from_api(pokemon)?;
    let species = species.map(Species::from_api).transpose()?;
    Ok(PokemonSummary::from_parts(&pokemon, species.as_ref()))
}
