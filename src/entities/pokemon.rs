// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource, PokemonType},
};

/// The six base stats, named as PokéApi names them
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StatName {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatName {
    pub const ALL: &'static [Self] = &[
        Self::Hp,
        Self::Attack,
        Self::Defense,
        Self::SpecialAttack,
        Self::SpecialDefense,
        Self::Speed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatName::Hp => "hp",
            StatName::Attack => "attack",
            StatName::Defense => "defense",
            StatName::SpecialAttack => "special-attack",
            StatName::SpecialDefense => "special-defense",
            StatName::Speed => "speed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Pokémon statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub sp_attack: i64,
    pub sp_defense: i64,
    pub speed: i64,
}

impl Stats {
    pub fn get(&self, stat: StatName) -> i64 {
        match stat {
            StatName::Hp => self.hp,
            StatName::Attack => self.attack,
            StatName::Defense => self.defense,
            StatName::SpecialAttack => self.sp_attack,
            StatName::SpecialDefense => self.sp_defense,
            StatName::Speed => self.speed,
        }
    }

    fn set(&mut self, stat: StatName, value: i64) {
        match stat {
            StatName::Hp => self.hp = value,
            StatName::Attack => self.attack = value,
            StatName::Defense => self.defense = value,
            StatName::SpecialAttack => self.sp_attack = value,
            StatName::SpecialDefense => self.sp_defense = value,
            StatName::Speed => self.speed = value,
        }
    }

    /// Returns the total value of all the stats of the Pokémon
    pub fn total(&self) -> i64 {
        self.hp + self.attack + self.defense + self.sp_attack + self.sp_defense + self.speed
    }
}

/// Builds [`Stats`] out of `(name, base value)` pairs, ignoring any stat we don't know about
impl<'a> FromIterator<(&'a str, i64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        let mut stats = Stats::default();
        for (name, value) in iter {
            if let Some(stat) = StatName::from_name(name) {
                stats.set(stat, value);
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonAbility {
    pub name: String,
    pub is_hidden: bool,
}

/// Sprite urls, any of them can be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub official_artwork: Option<String>,
}

impl Sprites {
    /// Best available image, artwork first; `None` means the caller shows its fallback image
    pub fn preferred(&self) -> Option<&str> {
        self.official_artwork
            .as_deref()
            .or(self.front_default.as_deref())
    }
}

/// Core Pokémon data
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    pub height: i64,
    pub weight: i64,
    pub types: Vec<PokemonType>,
    pub abilities: Vec<PokemonAbility>,
    pub stats: Stats,
    pub sprites: Sprites,
    pub species: Option<String>,
}

#[derive(Deserialize)]
struct RawPokemon {
    id: i64,
    name: String,
    #[serde(default)]
    height: Option<i64>,
    #[serde(default)]
    weight: Option<i64>,
    #[serde(default)]
    types: Vec<RawTypeSlot>,
    #[serde(default)]
    abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    stats: Vec<RawStat>,
    #[serde(default)]
    sprites: Option<RawSprites>,
    #[serde(default)]
    species: Option<NamedResource>,
}

#[derive(Deserialize)]
struct RawTypeSlot {
    #[serde(default)]
    slot: i64,
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Deserialize)]
struct RawAbilitySlot {
    #[serde(default)]
    ability: Option<NamedResource>,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Deserialize)]
struct RawStat {
    base_stat: i64,
    stat: NamedResource,
}

#[derive(Deserialize, Default)]
struct RawSprites {
    #[serde(default)]
    front_default: Option<String>,
    #[serde(default)]
    front_shiny: Option<String>,
    #[serde(default)]
    other: Option<Value>,
}

impl FromApi for Pokemon {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawPokemon::deserialize(value)?;

        let mut slots = raw.types;
        slots.sort_by_key(|s| s.slot);

        let sprites = raw.sprites.unwrap_or_default();
        let official_artwork = sprites
            .other
            .as_ref()
            .and_then(|other| other.get("official-artwork"))
            .and_then(|artwork| artwork.get("front_default"))
            .and_then(Value::as_str)
            .map(String::from);

        Ok(Pokemon {
            id: raw.id,
            name: raw.name,
            height: raw.height.unwrap_or_default(),
            weight: raw.weight.unwrap_or_default(),
            types: slots
                .iter()
                .filter_map(|s| PokemonType::from_name(&s.type_.name))
                .collect(),
            abilities: raw
                .abilities
                .into_iter()
                .filter_map(|a| {
                    a.ability.map(|ability| PokemonAbility {
                        name: ability.name,
                        is_hidden: a.is_hidden,
                    })
                })
                .collect(),
            stats: raw
                .stats
                .iter()
                .map(|s| (s.stat.name.as_str(), s.base_stat))
                .collect(),
            sprites: Sprites {
                front_default: sprites.front_default,
                front_shiny: sprites.front_shiny,
                official_artwork,
            },
            species: raw.species.map(|s| s.name),
        })
    }
}
