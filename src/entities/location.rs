// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource},
    utils::capitalize_string,
};

/// Location details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub region: Option<String>,
    pub areas: Vec<NamedResource>,
}

#[derive(Deserialize)]
struct RawLocation {
    id: i64,
    name: String,
    #[serde(default)]
    region: Option<NamedResource>,
    #[serde(default)]
    areas: Vec<NamedResource>,
}

impl FromApi for Location {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawLocation::deserialize(value)?;

        Ok(Location {
            id: raw.id,
            name: raw.name,
            region: raw.region.map(|r| r.name),
            areas: raw.areas,
        })
    }
}

/// Pokémon encounter information for one area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    pub pokemon: String,
    /// `"Version: Method, Method"` entries, one per game version
    pub games_method: Vec<String>,
    pub max_chance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationArea {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub encounters: Vec<Encounter>,
}

#[derive(Deserialize)]
struct RawLocationArea {
    id: i64,
    name: String,
    #[serde(default)]
    location: Option<NamedResource>,
    #[serde(default)]
    pokemon_encounters: Vec<RawPokemonEncounter>,
}

#[derive(Deserialize)]
struct RawPokemonEncounter {
    pokemon: NamedResource,
    #[serde(default)]
    version_details: Vec<RawVersionDetail>,
}

#[derive(Deserialize)]
struct RawVersionDetail {
    version: NamedResource,
    #[serde(default)]
    max_chance: i64,
    #[serde(default)]
    encounter_details: Vec<RawEncounterDetail>,
}

#[derive(Deserialize)]
struct RawEncounterDetail {
    method: NamedResource,
}

impl FromApi for LocationArea {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawLocationArea::deserialize(value)?;

        let encounters = raw
            .pokemon_encounters
            .into_iter()
            .map(|encounter| Encounter {
                pokemon: encounter.pokemon.name,
                max_chance: encounter
                    .version_details
                    .iter()
                    .map(|vd| vd.max_chance)
                    .max()
                    .unwrap_or(0),
                games_method: encounter
                    .version_details
                    .iter()
                    .map(|vd| {
                        // Remove repeated methods, keeping api order
                        let mut methods: Vec<String> = Vec::new();
                        for detail in &vd.encounter_details {
                            let method = capitalize_string(&detail.method.name);
                            if !methods.contains(&method) {
                                methods.push(method);
                            }
                        }

                        format!(
                            "{}: {}",
                            capitalize_string(&vd.version.name),
                            methods.join(", ")
                        )
                    })
                    .collect(),
            })
            .collect();

        Ok(LocationArea {
            id: raw.id,
            name: raw.name,
            location: raw.location.map(|l| l.name),
            encounters,
        })
    }
}
