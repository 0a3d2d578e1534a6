// SPDX-License-Identifier: GPL-3.0-only

//! The HTTP collaborator: everything that actually talks to PokéApi.
//!
//! [`DexSource`] is the seam the query cache sits on; [`HttpSource`] is the
//! production implementation.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::{DexConfig, DexError, Result};

/// PokéApi endpoints the crate knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Pokemon,
    PokemonSpecies,
    Type,
    Ability,
    Berry,
    Item,
    Location,
    LocationArea,
    EvolutionChain,
}

impl Resource {
    /// Path segment of the endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Pokemon => "pokemon",
            Resource::PokemonSpecies => "pokemon-species",
            Resource::Type => "type",
            Resource::Ability => "ability",
            Resource::Berry => "berry",
            Resource::Item => "item",
            Resource::Location => "location",
            Resource::LocationArea => "location-area",
            Resource::EvolutionChain => "evolution-chain",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Read-only access to the PokéApi resources.
///
/// Implementations return the raw JSON document; mapping to typed records
/// happens above this layer.
#[async_trait]
pub trait DexSource: Send + Sync {
    /// `GET {resource}/{name_or_id}`
    async fn resource(&self, resource: Resource, name_or_id: &str) -> Result<Value>;

    /// `GET {resource}?limit=N&offset=M`
    async fn resource_list(&self, resource: Resource, limit: usize, offset: usize)
    -> Result<Value>;
}

/// [`DexSource`] backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(config: &DexConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DexError::Config(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<Value>().await?),
            StatusCode::NOT_FOUND => Err(DexError::NotFound(url.path().to_string())),
            status => Err(DexError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DexSource for HttpSource {
    async fn resource(&self, resource: Resource, name_or_id: &str) -> Result<Value> {
        let key = name_or_id.trim().to_lowercase();
        let url = self.endpoint(&[resource.path(), key.as_str(), ""])?;
        self.get_json(url).await
    }

    async fn resource_list(
        &self,
        resource: Resource,
        limit: usize,
        offset: usize,
    ) -> Result<Value> {
        let mut url = self.endpoint(&[resource.path(), ""])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.get_json(url).await
    }
}
