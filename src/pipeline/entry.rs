// SPDX-License-Identifier: GPL-3.0-only

use crate::entities::{Generation, NamedResource, PokemonSummary, PokemonType, Stats};

/// Something the list pipeline can filter and sort.
///
/// Only `id` and `name` are required; rows that lack an attribute simply fail
/// the predicates that need it.
pub trait ListEntry {
    fn id(&self) -> i64;

    fn name(&self) -> &str;

    fn types(&self) -> &[PokemonType] {
        &[]
    }

    fn generation(&self) -> Option<Generation> {
        None
    }

    fn abilities(&self) -> &[String] {
        &[]
    }

    fn stats(&self) -> Option<&Stats> {
        None
    }

    fn height(&self) -> i64 {
        0
    }

    fn weight(&self) -> i64 {
        0
    }
}

impl ListEntry for PokemonSummary {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> &[PokemonType] {
        &self.types
    }

    fn generation(&self) -> Option<Generation> {
        Some(self.generation)
    }

    fn abilities(&self) -> &[String] {
        &self.abilities
    }

    fn stats(&self) -> Option<&Stats> {
        Some(&self.stats)
    }

    fn height(&self) -> i64 {
        self.height
    }

    fn weight(&self) -> i64 {
        self.weight
    }
}

/// Plain list entries (berries, items, locations) only carry a name and the id in their url
impl ListEntry for NamedResource {
    fn id(&self) -> i64 {
        NamedResource::id(self).unwrap_or(0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
