// SPDX-License-Identifier: GPL-3.0-only

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    config::TypeFilteringMode,
    entities::{Generation, PokemonType, StatName},
    pipeline::ListEntry,
};

/// Inclusive `[min, max]` range of a base stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i64,
    pub max: i64,
}

impl StatRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Different filters you can apply to a list.
///
/// Every predicate is independent and an empty one lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub types: BTreeSet<PokemonType>,
    pub generations: BTreeSet<Generation>,
    pub abilities: BTreeSet<String>,
    pub stats: BTreeMap<StatName, StatRange>,
    pub type_mode: TypeFilteringMode,
}

impl FilterCriteria {
    pub fn any_applied(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.types.is_empty()
            || !self.generations.is_empty()
            || !self.abilities.is_empty()
            || !self.stats.is_empty()
    }

    /// `true` when the item passes every active predicate
    pub fn matches<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        self.matches_search(item)
            && self.matches_types(item)
            && self.matches_generations(item)
            && self.matches_abilities(item)
            && self.matches_stats(item)
    }

    fn matches_search<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        let search = self.search.trim();
        search.is_empty() || item.name().to_lowercase().contains(&search.to_lowercase())
    }

    fn matches_types<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        if self.types.is_empty() {
            return true;
        }

        match self.type_mode {
            TypeFilteringMode::Inclusive => item.types().iter().any(|t| self.types.contains(t)),
            TypeFilteringMode::Exclusive => self.types.iter().all(|t| item.types().contains(t)),
        }
    }

    fn matches_generations<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        self.generations.is_empty()
            || item
                .generation()
                .is_some_and(|generation| self.generations.contains(&generation))
    }

    fn matches_abilities<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        self.abilities.is_empty()
            || item
                .abilities()
                .iter()
                .any(|ability| self.abilities.contains(ability))
    }

    fn matches_stats<T: ListEntry + ?Sized>(&self, item: &T) -> bool {
        if self.stats.is_empty() {
            return true;
        }

        match item.stats() {
            Some(stats) => self
                .stats
                .iter()
                .all(|(stat, range)| range.contains(stats.get(*stat))),
            None => false,
        }
    }
}
