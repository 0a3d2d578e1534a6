// SPDX-License-Identifier: GPL-3.0-only

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{entities::StatName, pipeline::ListEntry};

/// Field a list can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Height,
    Weight,
    /// Sum of the six base stats
    Total,
    Stat(StatName),
}

impl SortField {
    pub const ALL: &'static [Self] = &[
        Self::Id,
        Self::Name,
        Self::Height,
        Self::Weight,
        Self::Total,
        Self::Stat(StatName::Hp),
        Self::Stat(StatName::Attack),
        Self::Stat(StatName::Defense),
        Self::Stat(StatName::SpecialAttack),
        Self::Stat(StatName::SpecialDefense),
        Self::Stat(StatName::Speed),
    ];

    /// Value used in the `sortField` url parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Height => "height",
            SortField::Weight => "weight",
            SortField::Total => "total",
            SortField::Stat(stat) => stat.name(),
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_param() == param)
    }

    fn compare<T: ListEntry + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortField::Name => compare_text(a.name(), b.name()),
            _ => self.number(a).cmp(&self.number(b)),
        }
    }

    fn number<T: ListEntry + ?Sized>(&self, item: &T) -> i64 {
        match self {
            SortField::Id | SortField::Name => item.id(),
            SortField::Height => item.height(),
            SortField::Weight => item.weight(),
            SortField::Total => item.stats().map(|s| s.total()).unwrap_or(0),
            SortField::Stat(stat) => item.stats().map(|s| s.get(*stat)).unwrap_or(0),
        }
    }
}

/// Caseless ordering through Unicode lowercasing, there are no locale collation tables here
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Stable sort; ties keep their incoming order
    pub fn sort<T: ListEntry + ?Sized>(&self, items: &mut [&T]) {
        items.sort_by(|a, b| {
            let ordering = self.field.compare(*a, *b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NamedResource, PokemonSummary, Stats};

    fn named(name: &str, id: i64) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/berry/{id}/"),
        }
    }

    #[test]
    fn names_sort_caseless() {
        let items = [named("Zubat", 41), named("abra", 63), named("Ekans", 23)];
        let mut refs: Vec<&NamedResource> = items.iter().collect();

        SortOption::new(SortField::Name, SortDirection::Asc).sort(&mut refs);

        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["abra", "Ekans", "Zubat"]);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let items = [named("b", 2), named("a", 1), named("c", 2)];
        let mut refs: Vec<&NamedResource> = items.iter().collect();

        SortOption::new(SortField::Id, SortDirection::Desc).sort(&mut refs);

        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn sorts_by_a_single_stat_and_total() {
        let make = |id: i64, speed: i64, hp: i64| PokemonSummary {
            id,
            name: format!("p{id}"),
            types: Vec::new(),
            generation: Default::default(),
            abilities: Vec::new(),
            stats: Stats {
                speed,
                hp,
                ..Default::default()
            },
            height: 0,
            weight: 0,
            sprite: None,
        };
        let items = [make(1, 90, 10), make(2, 30, 200), make(3, 60, 20)];

        let mut refs: Vec<&PokemonSummary> = items.iter().collect();
        SortOption::new(SortField::Stat(StatName::Speed), SortDirection::Desc).sort(&mut refs);
        assert_eq!(refs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        SortOption::new(SortField::Total, SortDirection::Asc).sort(&mut refs);
        assert_eq!(refs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn params_round_trip() {
        for field in SortField::ALL {
            assert_eq!(SortField::from_param(field.as_param()), Some(*field));
        }
        assert_eq!(
            SortField::from_param("special-attack"),
            Some(SortField::Stat(StatName::SpecialAttack))
        );
        assert_eq!(SortDirection::from_param("sideways"), None);
    }
}
