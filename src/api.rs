// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use futures::{StreamExt, future::join_all};

use crate::{
    DexConfig, Result,
    entities::{
        Ability, Berry, EvolutionChain, FromApi, Item, Location, LocationArea, NamedResource,
        Pokemon, PokemonSummary, ResourceList, Species, TypeInfo,
    },
    query::{QueryCache, QueryKey},
    source::{DexSource, HttpSource, Resource},
    type_effectiveness::Effectiveness,
};

/// Page size used when walking a whole resource list
const LIST_PAGE_LIMIT: usize = 200;

/// Typed PokéApi client. Every call goes through the shared [`QueryCache`].
#[derive(Debug, Clone)]
pub struct DexApi {
    cache: QueryCache,
    max_concurrent_fetches: usize,
}

impl DexApi {
    /// Client talking to the configured PokéApi instance over HTTP
    pub fn new(config: &DexConfig) -> Result<Self> {
        config.validate()?;
        let source = HttpSource::new(config)?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    pub fn with_source(source: Arc<dyn DexSource>, config: &DexConfig) -> Self {
        Self {
            cache: QueryCache::new(source, config.query_options()),
            max_concurrent_fetches: config.max_concurrent_fetches.max(1),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn get<T: FromApi>(&self, resource: Resource, name_or_id: &str) -> Result<T> {
        let value = self
            .cache
            .fetch(&QueryKey::entity(resource, name_or_id))
            .await?;
        T::from_api(&value)
    }

    pub async fn pokemon(&self, name_or_id: &str) -> Result<Pokemon> {
        self.get(Resource::Pokemon, name_or_id).await
    }

    pub async fn species(&self, name_or_id: &str) -> Result<Species> {
        self.get(Resource::PokemonSpecies, name_or_id).await
    }

    pub async fn evolution_chain(&self, id: i64) -> Result<EvolutionChain> {
        self.get(Resource::EvolutionChain, &id.to_string()).await
    }

    pub async fn type_info(&self, name: &str) -> Result<TypeInfo> {
        self.get(Resource::Type, name).await
    }

    pub async fn ability(&self, name: &str) -> Result<Ability> {
        self.get(Resource::Ability, name).await
    }

    /// Fetches several abilities in parallel, keeping the input order
    pub async fn abilities(&self, names: &[String]) -> Vec<Result<Ability>> {
        join_all(names.iter().map(|name| self.ability(name))).await
    }

    pub async fn berry(&self, name_or_id: &str) -> Result<Berry> {
        self.get(Resource::Berry, name_or_id).await
    }

    pub async fn item(&self, name_or_id: &str) -> Result<Item> {
        self.get(Resource::Item, name_or_id).await
    }

    pub async fn location(&self, name_or_id: &str) -> Result<Location> {
        self.get(Resource::Location, name_or_id).await
    }

    pub async fn location_area(&self, name_or_id: &str) -> Result<LocationArea> {
        self.get(Resource::LocationArea, name_or_id).await
    }

    /// One page of a resource list
    pub async fn list(
        &self,
        resource: Resource,
        limit: usize,
        offset: usize,
    ) -> Result<ResourceList> {
        let value = self
            .cache
            .fetch(&QueryKey::list(resource, limit, offset))
            .await?;
        ResourceList::from_api(&value)
    }

    /// Every entry of a resource list; after the first page the rest are fetched concurrently
    pub async fn list_all(&self, resource: Resource) -> Result<Vec<NamedResource>> {
        let first = self.list(resource, LIST_PAGE_LIMIT, 0).await?;
        let mut entries = first.results;

        let offsets: Vec<usize> = (LIST_PAGE_LIMIT..first.count)
            .step_by(LIST_PAGE_LIMIT)
            .collect();

        let pages = futures::stream::iter(offsets)
            .map(|offset| self.list(resource, LIST_PAGE_LIMIT, offset))
            .buffered(self.max_concurrent_fetches)
            .collect::<Vec<_>>()
            .await;

        for page in pages {
            entries.extend(page?.results);
        }

        Ok(entries)
    }

    /// Loads the list rows of every Pokémon (details + species), sorted by id.
    ///
    /// Entries whose details can't be fetched are logged and skipped.
    pub async fn load_all_pokemon(&self) -> Result<Vec<PokemonSummary>> {
        let all_entries = self.list_all(Resource::Pokemon).await?;
        tracing::info!(count = all_entries.len(), "loading Pokémon details");

        let mut pokemon: Vec<PokemonSummary> = futures::stream::iter(all_entries)
            .map(|entry| async move {
                match self.pokemon_summary(&entry.name).await {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        tracing::warn!(
                            name = %entry.name,
                            error = %e,
                            "failed to fetch Pokémon details"
                        );
                        None
                    }
                }
            })
            .buffer_unordered(self.max_concurrent_fetches)
            .filter_map(|summary| async move { summary })
            .collect()
            .await;

        pokemon.sort_by_key(|p| p.id);
        tracing::info!(count = pokemon.len(), "Pokémon loaded");
        Ok(pokemon)
    }

    /// A single list row; a missing species only loses the generation
    pub async fn pokemon_summary(&self, name_or_id: &str) -> Result<PokemonSummary> {
        let pokemon = self.pokemon(name_or_id).await?;
        let species_name = pokemon.species.as_deref().unwrap_or(pokemon.name.as_str());

        let species = match self.species(species_name).await {
            Ok(species) => Some(species),
            Err(e) => {
                tracing::debug!(name = %pokemon.name, error = %e, "species not available");
                None
            }
        };

        Ok(PokemonSummary::from_parts(&pokemon, species.as_ref()))
    }

    /// Fetches the damage relations of each of the Pokémon's types and folds them together
    pub async fn type_effectiveness(&self, pokemon: &Pokemon) -> Result<Effectiveness> {
        let relations = join_all(pokemon.types.iter().map(|t| self.type_info(t.name())))
            .await
            .into_iter()
            .map(|info| info.map(|info| info.damage_relations))
            .collect::<Result<Vec<_>>>()?;

        Ok(Effectiveness::from_relations(&relations))
    }
}
