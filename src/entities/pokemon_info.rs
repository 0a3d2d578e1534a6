// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::{
    entities::{Generation, Pokemon, PokemonType, Species, Stats},
    utils::scale_numbers,
};

/// Simple owned data structure, for displaying the Pokémon in the list page (main page)
///
/// This is the row the filter/sort/paginate pipeline works on.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i64,
    pub name: String,
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub generation: Generation,
    #[serde(default)]
    pub abilities: Vec<String>,
    pub stats: Stats,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub sprite: Option<String>,
}

impl Debug for PokemonSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokemonSummary")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PokemonSummary {
    /// Flattens a Pokémon and (when it could be fetched) its species into a list row
    pub fn from_parts(pokemon: &Pokemon, species: Option<&Species>) -> Self {
        PokemonSummary {
            id: pokemon.id,
            name: pokemon.name.clone(),
            types: pokemon.types.clone(),
            generation: species.map(|s| s.generation).unwrap_or_default(),
            abilities: pokemon.abilities.iter().map(|a| a.name.clone()).collect(),
            stats: pokemon.stats,
            height: pokemon.height,
            weight: pokemon.weight,
            sprite: pokemon.sprites.preferred().map(String::from),
        }
    }

    /// Height in metres (PokéApi reports decimetres)
    pub fn height_m(&self) -> f64 {
        scale_numbers(self.height)
    }

    /// Weight in kilograms (PokéApi reports hectograms)
    pub fn weight_kg(&self) -> f64 {
        scale_numbers(self.weight)
    }
}
