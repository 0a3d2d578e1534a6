// SPDX-License-Identifier: GPL-3.0-only

use std::collections::{BTreeMap, BTreeSet};

use dexplorer::{
    TypeFilteringMode,
    entities::{Generation, PokemonSummary, PokemonType, StatName},
    pipeline::{
        FilterCriteria, SortDirection, SortField, SortOption, StatRange, filter_and_sort,
        visible_slice,
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn ids(items: &[&PokemonSummary]) -> Vec<i64> {
    items.iter().map(|p| p.id).collect()
}

/// Straightforward restatement of the filter rules, used to check the pipeline against
fn passes(p: &PokemonSummary, c: &FilterCriteria) -> bool {
    let search = c.search.trim().to_lowercase();
    let search_ok = search.is_empty() || p.name.to_lowercase().contains(&search);
    let types_ok = c.types.is_empty()
        || match c.type_mode {
            TypeFilteringMode::Inclusive => p.types.iter().any(|t| c.types.contains(t)),
            TypeFilteringMode::Exclusive => c.types.iter().all(|t| p.types.contains(t)),
        };
    let generations_ok = c.generations.is_empty() || c.generations.contains(&p.generation);
    let abilities_ok =
        c.abilities.is_empty() || p.abilities.iter().any(|a| c.abilities.contains(a));
    let stats_ok = c.stats.iter().all(|(stat, range)| {
        let value = p.stats.get(*stat);
        range.min <= value && value <= range.max
    });

    search_ok && types_ok && generations_ok && abilities_ok && stats_ok
}

fn no_filters() -> FilterCriteria {
    FilterCriteria::default()
}

fn search(text: &str) -> FilterCriteria {
    FilterCriteria {
        search: text.to_string(),
        ..Default::default()
    }
}

fn types(types: &[PokemonType], type_mode: TypeFilteringMode) -> FilterCriteria {
    FilterCriteria {
        types: types.iter().copied().collect(),
        type_mode,
        ..Default::default()
    }
}

fn generations(generations: &[Generation]) -> FilterCriteria {
    FilterCriteria {
        generations: generations.iter().copied().collect(),
        ..Default::default()
    }
}

fn abilities(abilities: &[&str]) -> FilterCriteria {
    FilterCriteria {
        abilities: abilities.iter().map(|a| a.to_string()).collect(),
        ..Default::default()
    }
}

fn stat(stat: StatName, min: i64, max: i64) -> FilterCriteria {
    FilterCriteria {
        stats: BTreeMap::from([(stat, StatRange::new(min, max))]),
        ..Default::default()
    }
}

fn everything() -> FilterCriteria {
    FilterCriteria {
        search: " A ".to_string(),
        types: BTreeSet::from([PokemonType::Water, PokemonType::Grass, PokemonType::Fire]),
        generations: BTreeSet::from([Generation::One, Generation::Two]),
        abilities: BTreeSet::new(),
        stats: BTreeMap::from([(StatName::Speed, StatRange::new(20, 120))]),
        type_mode: TypeFilteringMode::Inclusive,
    }
}

#[rstest]
#[case::none(no_filters())]
#[case::search(search("saur"))]
#[case::search_mixed_case(search("CHAR"))]
#[case::no_match(search("pikachu"))]
#[case::one_type(types(&[PokemonType::Fire], TypeFilteringMode::Inclusive))]
#[case::any_type(types(&[PokemonType::Fire, PokemonType::Flying], TypeFilteringMode::Inclusive))]
#[case::every_type(types(&[PokemonType::Fire, PokemonType::Flying], TypeFilteringMode::Exclusive))]
#[case::generation(generations(&[Generation::One]))]
#[case::ability(abilities(&["torrent", "blaze"]))]
#[case::stat_range(stat(StatName::Hp, 50, 100))]
#[case::combined(everything())]
fn returns_exactly_the_matching_items(#[case] criteria: FilterCriteria) {
    let dex = common::dex();

    let visible = filter_and_sort(&dex, &criteria, &SortOption::default());

    let expected: Vec<i64> = dex.iter().filter(|p| passes(p, &criteria)).map(|p| p.id).collect();
    assert_eq!(ids(&visible), expected);
}

#[test]
fn inactive_filters_return_the_whole_collection() {
    let dex = common::dex();

    let visible = filter_and_sort(&dex, &FilterCriteria::default(), &SortOption::default());

    assert_eq!(visible.len(), dex.len());
    assert!(visible.iter().zip(&dex).all(|(a, b)| *a == b));
}

#[rstest]
fn descending_is_ascending_reversed(
    #[values(
        SortField::Id,
        SortField::Name,
        SortField::Height,
        SortField::Weight,
        SortField::Total,
        SortField::Stat(StatName::Hp),
        SortField::Stat(StatName::SpecialDefense),
        SortField::Stat(StatName::Speed)
    )]
    field: SortField,
) {
    let dex = common::dex();
    let criteria = FilterCriteria::default();

    let asc = filter_and_sort(&dex, &criteria, &SortOption::new(field, SortDirection::Asc));
    let mut desc = filter_and_sort(&dex, &criteria, &SortOption::new(field, SortDirection::Desc));
    desc.reverse();

    assert_eq!(ids(&desc), ids(&asc));
}

#[rstest]
fn pages_concatenate_to_the_full_result(#[values(1, 2, 5, 7, 12, 13)] page_size: usize) {
    let dex = common::dex();
    let criteria = types(
        &[PokemonType::Water, PokemonType::Bug, PokemonType::Fire],
        TypeFilteringMode::Inclusive,
    );
    let sort = SortOption::new(SortField::Name, SortDirection::Desc);

    let first = visible_slice(&dex, &criteria, &sort, 1, page_size);
    let concatenated: Vec<&PokemonSummary> = (1..=first.total_pages)
        .flat_map(|page| visible_slice(&dex, &criteria, &sort, page, page_size).items)
        .collect();

    assert_eq!(ids(&concatenated), ids(&filter_and_sort(&dex, &criteria, &sort)));
    assert_eq!(first.total_items, 9);
    assert_eq!(first.total_pages, 9usize.div_ceil(page_size));
}

#[test]
fn same_arguments_same_output() {
    let dex = common::dex();
    let criteria = everything();
    let sort = SortOption::new(SortField::Total, SortDirection::Desc);

    assert_eq!(
        visible_slice(&dex, &criteria, &sort, 1, 3),
        visible_slice(&dex, &criteria, &sort, 1, 3)
    );
}

#[test]
fn first_page_of_twelve_by_id() {
    let dex = common::dex();

    let slice = visible_slice(&dex, &FilterCriteria::default(), &SortOption::default(), 1, 5);

    assert_eq!(ids(&slice.items), vec![1, 2, 3, 4, 5]);
    assert_eq!(slice.total_items, 12);
    assert_eq!(slice.total_pages, 3);
    assert!(slice.has_next);
    assert!(!slice.has_prev);
}

#[test]
fn pipeline_leaves_the_collection_alone() {
    let dex = common::dex();
    let before = dex.clone();

    let _ = visible_slice(
        &dex,
        &everything(),
        &SortOption::new(SortField::Name, SortDirection::Desc),
        2,
        2,
    );

    assert_eq!(dex, before);
}
