// SPDX-License-Identifier: GPL-3.0-only

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Result,
    entities::{FromApi, NamedResource},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BerryFlavor {
    pub flavor: String,
    pub potency: i64,
}

/// Berry details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Berry {
    pub id: i64,
    pub name: String,
    pub growth_time: i64,
    pub max_harvest: i64,
    pub size: i64,
    pub smoothness: i64,
    pub soil_dryness: i64,
    pub natural_gift_power: i64,
    pub natural_gift_type: Option<String>,
    pub firmness: Option<String>,
    pub flavors: Vec<BerryFlavor>,
    pub item: Option<String>,
}

impl Berry {
    /// The flavour with the highest potency, ties resolved by api order
    pub fn dominant_flavor(&self) -> Option<&BerryFlavor> {
        self.flavors
            .iter()
            .filter(|f| f.potency > 0)
            .fold(None, |best: Option<&BerryFlavor>, f| match best {
                Some(b) if b.potency >= f.potency => Some(b),
                _ => Some(f),
            })
    }
}

#[derive(Deserialize)]
struct RawBerry {
    id: i64,
    name: String,
    #[serde(default)]
    growth_time: i64,
    #[serde(default)]
    max_harvest: i64,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    smoothness: i64,
    #[serde(default)]
    soil_dryness: i64,
    #[serde(default)]
    natural_gift_power: i64,
    #[serde(default)]
    natural_gift_type: Option<NamedResource>,
    #[serde(default)]
    firmness: Option<NamedResource>,
    #[serde(default)]
    flavors: Vec<RawFlavor>,
    #[serde(default)]
    item: Option<NamedResource>,
}

#[derive(Deserialize)]
struct RawFlavor {
    #[serde(default)]
    potency: i64,
    flavor: NamedResource,
}

impl FromApi for Berry {
    fn from_api(value: &Value) -> Result<Self> {
        let raw = RawBerry::deserialize(value)?;

        Ok(Berry {
            id: raw.id,
            name: raw.name,
            growth_time: raw.growth_time,
            max_harvest: raw.max_harvest,
            size: raw.size,
            smoothness: raw.smoothness,
            soil_dryness: raw.soil_dryness,
            natural_gift_power: raw.natural_gift_power,
            natural_gift_type: raw.natural_gift_type.map(|t| t.name),
            firmness: raw.firmness.map(|f| f.name),
            flavors: raw
                .flavors
                .into_iter()
                .map(|f| BerryFlavor {
                    flavor: f.flavor.name,
                    potency: f.potency,
                })
                .collect(),
            item: raw.item.map(|i| i.name),
        })
    }
}
