// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource},
    utils::capitalize_string,
};

/// One species in a flattened evolution line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionStep {
    pub id: i64,
    pub name: String,
    /// Species this one evolves from, `None` for the base form
    pub evolves_from: Option<String>,
    pub needs_to_evolve: Option<String>,
}

/// An evolution chain flattened depth-first, base form first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionChain {
    pub id: i64,
    pub steps: Vec<EvolutionStep>,
}

#[derive(Deserialize)]
struct RawChain {
    id: i64,
    chain: RawChainLink,
}

#[derive(Deserialize)]
struct RawChainLink {
    species: NamedResource,
    #[serde(default)]
    evolution_details: Vec<RawEvolutionDetail>,
    #[serde(default)]
    evolves_to: Vec<RawChainLink>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawEvolutionDetail {
    min_level: Option<i64>,
    item: Option<NamedResource>,
    held_item: Option<NamedResource>,
    min_happiness: Option<i64>,
    time_of_day: Option<String>,
    location: Option<NamedResource>,
    known_move: Option<NamedResource>,
    relative_physical_stats: Option<i64>,
    trigger: Option<NamedResource>,
}

impl FromApi for EvolutionChain {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawChain::deserialize(value)?;
        let mut steps = Vec::new();
        flatten_chain_link(&raw.chain, None, &mut steps);

        Ok(EvolutionChain { id: raw.id, steps })
    }
}

fn flatten_chain_link(
    chain_link: &RawChainLink,
    evolves_from: Option<&str>,
    steps: &mut Vec<EvolutionStep>,
) {
    steps.push(EvolutionStep {
        id: chain_link.species.id().unwrap_or(0),
        name: chain_link.species.name.clone(),
        evolves_from: evolves_from.map(String::from),
        // base form doesn't need requirements
        needs_to_evolve: evolves_from
            .and_then(|_| evolution_requirement(&chain_link.evolution_details)),
    });

    for evolution in &chain_link.evolves_to {
        flatten_chain_link(evolution, Some(&chain_link.species.name), steps);
    }
}

/// Extracts a readable evolution requirement from the first evolution detail
fn evolution_requirement(evolution_details: &[RawEvolutionDetail]) -> Option<String> {
    let detail = evolution_details.first()?;

    if let Some(min_level) = detail.min_level {
        return Some(format!("Level {min_level}"));
    }

    if let Some(item) = &detail.item {
        return Some(capitalize_string(&item.name));
    }

    if let Some(held_item) = &detail.held_item {
        return Some(format!("Holding {}", capitalize_string(&held_item.name)));
    }

    if let Some(min_happiness) = detail.min_happiness {
        return Some(format!("Happiness {min_happiness}"));
    }

    if let Some(time_of_day) = detail.time_of_day.as_deref().filter(|t| !t.is_empty()) {
        return Some(format!("During {}", capitalize_string(time_of_day)));
    }

    if let Some(location) = &detail.location {
        return Some(format!("At {}", capitalize_string(&location.name)));
    }

    if let Some(known_move) = &detail.known_move {
        return Some(format!("Knowing {}", capitalize_string(&known_move.name)));
    }

    match detail.relative_physical_stats {
        Some(1) => return Some("Attack > Defense".to_string()),
        Some(-1) => return Some("Defense > Attack".to_string()),
        Some(0) => return Some("Attack = Defense".to_string()),
        _ => {}
    }

    detail
        .trigger
        .as_ref()
        .map(|trigger| capitalize_string(&trigger.name))
}
