// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, utils::id_from_url};

/// Types that can be built from a raw PokéApi JSON document.
///
/// This is the only place where the dynamic shape of the API is checked; everything past it works with typed records.
pub trait FromApi: Sized {
    fn from_api(value: &Value) -> Result<Self>;
}

/// A `{ name, url }` reference as PokéApi embeds them everywhere
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id taken from the resource url, if the url carries one
    pub fn id(&self) -> Option<i64> {
        id_from_url(&self.url)
    }
}

/// One page of `GET {resource}?limit=N&offset=M`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl FromApi for ResourceList {
    fn from_api(value: &Value) -> Result<Self> {
        Ok(ResourceList::deserialize(value)?)
    }
}

/// Localised text entry (`{ <field>, language: { name } }`), used to pick the english variant
pub(crate) fn english<'a, T>(
    entries: &'a [T],
    language: impl Fn(&T) -> &NamedResource,
) -> Option<&'a T> {
    entries.iter().find(|entry| language(entry).name == "en")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_a_list_page() {
        let page = ResourceList::from_api(&json!({
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        }))
        .unwrap();

        assert_eq!(page.count, 1302);
        assert!(page.previous.is_none());
        assert_eq!(page.results[1].name, "ivysaur");
        assert_eq!(page.results[1].id(), Some(2));
    }

    #[test]
    fn list_without_count_is_rejected() {
        assert!(ResourceList::from_api(&json!({ "results": [] })).is_err());
    }
}
