// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, Generation, NamedResource, resource::english},
};

/// Ability details shown next to a Pokémon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub id: i64,
    pub name: String,
    pub short_effect: Option<String>,
    pub generation: Generation,
}

#[derive(Deserialize)]
struct RawAbility {
    id: i64,
    name: String,
    #[serde(default)]
    effect_entries: Vec<RawEffect>,
    #[serde(default)]
    generation: Option<NamedResource>,
}

#[derive(Deserialize)]
pub(crate) struct RawEffect {
    #[serde(default)]
    pub(crate) effect: String,
    #[serde(default)]
    pub(crate) short_effect: String,
    pub(crate) language: NamedResource,
}

impl FromApi for Ability {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawAbility::deserialize(value)?;

        Ok(Ability {
            id: raw.id,
            name: raw.name,
            short_effect: english(&raw.effect_entries, |e| &e.language)
                .map(|e| e.short_effect.clone())
                .filter(|e| !e.is_empty()),
            generation: raw
                .generation
                .map(|g| Generation::from_name(&g.name))
                .unwrap_or_default(),
        })
    }
}
