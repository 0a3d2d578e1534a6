// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource, PokemonType},
};

/// Damage-relation table of a single type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageRelations {
    pub double_damage_from: Vec<PokemonType>,
    pub half_damage_from: Vec<PokemonType>,
    pub no_damage_from: Vec<PokemonType>,
    pub double_damage_to: Vec<PokemonType>,
    pub half_damage_to: Vec<PokemonType>,
    pub no_damage_to: Vec<PokemonType>,
}

/// A type as served by `GET type/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub id: i64,
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Deserialize)]
struct RawType {
    id: i64,
    name: String,
    #[serde(default)]
    damage_relations: RawDamageRelations,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDamageRelations {
    double_damage_from: Vec<NamedResource>,
    half_damage_from: Vec<NamedResource>,
    no_damage_from: Vec<NamedResource>,
    double_damage_to: Vec<NamedResource>,
    half_damage_to: Vec<NamedResource>,
    no_damage_to: Vec<NamedResource>,
}

fn known_types(resources: &[NamedResource]) -> Vec<PokemonType> {
    resources
        .iter()
        .filter_map(|r| PokemonType::from_name(&r.name))
        .collect()
}

impl FromApi for TypeInfo {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawType::deserialize(value)?;
        let relations = &raw.damage_relations;

        Ok(TypeInfo {
            id: raw.id,
            name: raw.name,
            damage_relations: DamageRelations {
                double_damage_from: known_types(&relations.double_damage_from),
                half_damage_from: known_types(&relations.half_damage_from),
                no_damage_from: known_types(&relations.no_damage_from),
                double_damage_to: known_types(&relations.double_damage_to),
                half_damage_to: known_types(&relations.half_damage_to),
                no_damage_to: known_types(&relations.no_damage_to),
            },
        })
    }
}
