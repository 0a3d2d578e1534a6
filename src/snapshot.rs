// SPDX-License-Identifier: GPL-3.0-only

//! A pre-fetched copy of the Pokémon list, written by `dexgen`.
//!
//! Loading it lets the list page start with a warm collection instead of
//! walking the whole API first.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DexError, Result, entities::PokemonSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pokemon: Vec<PokemonSummary>,
}

impl Snapshot {
    pub fn new(mut pokemon: Vec<PokemonSummary>) -> Self {
        pokemon.sort_by_key(|p| p.id);
        Self { pokemon }
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DexError::Decode(e.to_string()))
    }

    pub fn from_ron(contents: &str) -> Result<Self> {
        ron::from_str(contents).map_err(|e| DexError::Decode(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!(path = %path.display(), count = self.pokemon.len(), "snapshot written");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }
}
