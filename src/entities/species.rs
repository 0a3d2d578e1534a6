// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource, resource::english},
    utils::{id_from_url, normalize_flavor_text},
};

/// Pokémon generation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Generation {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    #[default]
    Unknown,
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.number() {
            Some(_) => write!(f, "Generation {}", self.roman()),
            None => write!(f, "Unknown"),
        }
    }
}

impl Generation {
    /// List of all Pokémon Generations
    pub const ALL: &'static [Self] = &[
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Unknown,
    ];

    /// Parses a generation name (`generation-iv`) to the Generation enum
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "generation-i" => Generation::One,
            "generation-ii" => Generation::Two,
            "generation-iii" => Generation::Three,
            "generation-iv" => Generation::Four,
            "generation-v" => Generation::Five,
            "generation-vi" => Generation::Six,
            "generation-vii" => Generation::Seven,
            "generation-viii" => Generation::Eight,
            "generation-ix" => Generation::Nine,
            _ => Generation::Unknown,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Generation::One => Some(1),
            Generation::Two => Some(2),
            Generation::Three => Some(3),
            Generation::Four => Some(4),
            Generation::Five => Some(5),
            Generation::Six => Some(6),
            Generation::Seven => Some(7),
            Generation::Eight => Some(8),
            Generation::Nine => Some(9),
            Generation::Unknown => None,
        }
    }

    pub fn from_number(number: u8) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.number() == Some(number))
            .unwrap_or_default()
    }

    fn roman(&self) -> &'static str {
        match self {
            Generation::One => "I",
            Generation::Two => "II",
            Generation::Three => "III",
            Generation::Four => "IV",
            Generation::Five => "V",
            Generation::Six => "VI",
            Generation::Seven => "VII",
            Generation::Eight => "VIII",
            Generation::Nine => "IX",
            Generation::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesVariety {
    pub name: String,
    pub is_default: bool,
}

/// Pokémon specie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub id: i64,
    pub name: String,
    pub genus: Option<String>,
    pub habitat: Option<String>,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub evolution_chain_id: Option<i64>,
    pub varieties: Vec<SpeciesVariety>,
    pub generation: Generation,
    pub flavor_text: Option<String>,
    pub is_legendary: bool,
    pub is_mythical: bool,
}

#[derive(Deserialize)]
struct RawSpecies {
    id: i64,
    name: String,
    #[serde(default)]
    genera: Vec<RawGenus>,
    #[serde(default)]
    habitat: Option<NamedResource>,
    #[serde(default)]
    color: Option<NamedResource>,
    #[serde(default)]
    shape: Option<NamedResource>,
    #[serde(default)]
    evolution_chain: Option<RawApiResource>,
    #[serde(default)]
    varieties: Vec<RawVariety>,
    #[serde(default)]
    generation: Option<NamedResource>,
    #[serde(default)]
    flavor_text_entries: Vec<RawFlavorText>,
    #[serde(default)]
    is_legendary: bool,
    #[serde(default)]
    is_mythical: bool,
}

#[derive(Deserialize)]
struct RawGenus {
    genus: String,
    language: NamedResource,
}

#[derive(Deserialize)]
struct RawApiResource {
    url: String,
}

#[derive(Deserialize)]
struct RawVariety {
    #[serde(default)]
    is_default: bool,
    pokemon: NamedResource,
}

#[derive(Deserialize)]
struct RawFlavorText {
    flavor_text: String,
    language: NamedResource,
}

impl FromApi for Species {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawSpecies::deserialize(value)?;

        Ok(Species {
            id: raw.id,
            name: raw.name,
            genus: english(&raw.genera, |g| &g.language).map(|g| g.genus.clone()),
            habitat: raw.habitat.map(|h| h.name),
            color: raw.color.map(|c| c.name),
            shape: raw.shape.map(|s| s.name),
            evolution_chain_id: raw
                .evolution_chain
                .as_ref()
                .and_then(|chain| id_from_url(&chain.url))
                .filter(|id| *id > 0),
            varieties: raw
                .varieties
                .into_iter()
                .map(|v| SpeciesVariety {
                    name: v.pokemon.name,
                    is_default: v.is_default,
                })
                .collect(),
            generation: raw
                .generation
                .map(|g| Generation::from_name(&g.name))
                .unwrap_or_default(),
            flavor_text: english(&raw.flavor_text_entries, |f| &f.language)
                .map(|f| normalize_flavor_text(&f.flavor_text)),
            is_legendary: raw.is_legendary,
            is_mythical: raw.is_mythical,
        })
    }
}
