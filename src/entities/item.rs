// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource, ability::RawEffect, resource::english},
    utils::normalize_flavor_text,
};

/// Item details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub cost: i64,
    pub fling_power: Option<i64>,
    pub category: Option<String>,
    pub attributes: Vec<String>,
    pub effect: Option<String>,
    pub short_effect: Option<String>,
    pub sprite: Option<String>,
}

#[derive(Deserialize)]
struct RawItem {
    id: i64,
    name: String,
    #[serde(default)]
    cost: Option<i64>,
    #[serde(default)]
    fling_power: Option<i64>,
    #[serde(default)]
    category: Option<NamedResource>,
    #[serde(default)]
    attributes: Vec<NamedResource>,
    #[serde(default)]
    effect_entries: Vec<RawEffect>,
    #[serde(default)]
    sprites: Option<RawItemSprites>,
}

#[derive(Deserialize)]
struct RawItemSprites {
    #[serde(default)]
    default: Option<String>,
}

impl FromApi for Item {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawItem::deserialize(value)?;
        let effect = english(&raw.effect_entries, |e| &e.language);

        Ok(Item {
            id: raw.id,
            name: raw.name,
            cost: raw.cost.unwrap_or_default(),
            fling_power: raw.fling_power,
            category: raw.category.map(|c| c.name),
            attributes: raw.attributes.into_iter().map(|a| a.name).collect(),
            effect: effect
                .map(|e| normalize_flavor_text(&e.effect))
                .filter(|e| !e.is_empty()),
            short_effect: effect
                .map(|e| e.short_effect.clone())
                .filter(|e| !e.is_empty()),
            sprite: raw.sprites.and_then(|s| s.default),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn maps_item_with_english_effect() {
        let item = Item::from_api(&json!({
            "id": 1,
            "name": "master-ball",
            "cost": 0,
            "fling_power": null,
            "category": { "name": "standard-balls", "url": "" },
            "attributes": [{ "name": "countable", "url": "" }, { "name": "consumable", "url": "" }],
            "effect_entries": [{
                "effect": "Used in battle\n:   Catches a wild Pokémon without fail.",
                "short_effect": "Catches a wild Pokémon every time.",
                "language": { "name": "en", "url": "" }
            }],
            "sprites": { "default": "https://img/master-ball.png" }
        }))
        .unwrap();

        assert_eq!(item.category.as_deref(), Some("standard-balls"));
        assert_eq!(item.attributes, vec!["countable", "consumable"]);
        assert_eq!(
            item.effect.as_deref(),
            Some("Used in battle : Catches a wild Pokémon without fail.")
        );
        assert!(item.fling_power.is_none());
        assert_eq!(item.sprite.as_deref(), Some("https://img/master-ball.png"));
    }

    #[test]
    fn item_without_sprite_or_effect() {
        let item = Item::from_api(&json!({
            "id": 2050,
            "name": "mystery",
            "sprites": { "default": null }
        }))
        .unwrap();
        assert!(item.sprite.is_none());
        assert!(item.short_effect.is_none());
    }
}
