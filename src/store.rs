// SPDX-License-Identifier: GPL-3.0-only

//! View state of the list page: filters, sort and current page.
//!
//! [`ViewState`] is an immutable snapshot. [`ViewStore`] is its only writer and
//! hands out a new snapshot on every change.

use std::sync::Arc;

use crate::{
    config::TypeFilteringMode,
    entities::{Generation, PokemonType, StatName},
    pipeline::{
        FilterCriteria, ListEntry, PageSlice, PaginationAction, SortDirection, SortField,
        SortOption, StatRange, visible_slice,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    filters: FilterCriteria,
    sort: SortOption,
    page: usize,
    has_active_filters: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(FilterCriteria::default(), SortOption::default(), 1)
    }
}

impl ViewState {
    pub fn new(filters: FilterCriteria, sort: SortOption, page: usize) -> Self {
        let has_active_filters = filters.any_applied();
        Self {
            filters,
            sort,
            page: page.max(1),
            has_active_filters,
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_active_filters(&self) -> bool {
        self.has_active_filters
    }

    /// The current page of `items` under this state
    pub fn visible<'a, T: ListEntry>(
        &self,
        items: &'a [T],
        page_size: usize,
    ) -> PageSlice<'a, T> {
        visible_slice(items, &self.filters, &self.sort, self.page, page_size)
    }
}

/// Every mutation of the view state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    Search(String),
    ToggleType(PokemonType),
    ToggleGeneration(Generation),
    ToggleAbility(String),
    SetStatRange(StatName, StatRange),
    ClearStatRange(StatName),
    TypeFilteringModeChanged(TypeFilteringMode),
    /// Replaces every filter at once
    ApplyFilters(FilterCriteria),
    ClearFilters,
    SortFieldChanged(SortField),
    SortDirectionChanged(SortDirection),
    SetPage(usize),
    Paginate {
        action: PaginationAction,
        total_pages: usize,
    },
    /// Replaces the whole state, used when hydrating from a url
    Replace(ViewState),
}

impl ViewAction {
    /// Whether this is a toggle whose value `filters` already selects
    pub(crate) fn selects_existing(&self, filters: &FilterCriteria) -> bool {
        match self {
            ViewAction::ToggleType(pokemon_type) => filters.types.contains(pokemon_type),
            ViewAction::ToggleGeneration(generation) => filters.generations.contains(generation),
            ViewAction::ToggleAbility(ability) => {
                filters.abilities.contains(&normalize_ability(ability))
            }
            _ => false,
        }
    }

    /// Whether the action changes what is being filtered, which sends the user back to page 1
    fn changes_filters(&self) -> bool {
        !matches!(
            self,
            ViewAction::SortFieldChanged(_)
                | ViewAction::SortDirectionChanged(_)
                | ViewAction::SetPage(_)
                | ViewAction::Paginate { .. }
                | ViewAction::Replace(_)
        )
    }
}

/// Single writer of the [`ViewState`]
#[derive(Debug, Clone, Default)]
pub struct ViewStore {
    state: Arc<ViewState>,
}

impl ViewStore {
    pub fn new(state: ViewState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Current snapshot; older snapshots held by callers never change
    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    /// Applies `action` and returns the new snapshot
    pub fn apply(&mut self, action: ViewAction) -> Arc<ViewState> {
        let current = &self.state;
        let mut filters = current.filters.clone();
        let mut sort = current.sort;
        let mut page = current.page;

        let resets_page = action.changes_filters();

        match action {
            ViewAction::Search(search) => filters.search = search,
            ViewAction::ToggleType(pokemon_type) => toggle(&mut filters.types, pokemon_type),
            ViewAction::ToggleGeneration(generation) => {
                toggle(&mut filters.generations, generation)
            }
            ViewAction::ToggleAbility(ability) => {
                toggle(&mut filters.abilities, normalize_ability(&ability))
            }
            ViewAction::SetStatRange(stat, range) => {
                filters.stats.insert(stat, StatRange::new(range.min, range.max));
            }
            ViewAction::ClearStatRange(stat) => {
                filters.stats.remove(&stat);
            }
            ViewAction::TypeFilteringModeChanged(mode) => filters.type_mode = mode,
            ViewAction::ApplyFilters(mut new_filters) => {
                new_filters.abilities = new_filters
                    .abilities
                    .iter()
                    .map(|ability| normalize_ability(ability))
                    .collect();
                filters = new_filters;
            }
            ViewAction::ClearFilters => {
                // the matching mode is a preference, not a filter
                filters = FilterCriteria {
                    type_mode: filters.type_mode,
                    ..Default::default()
                };
            }
            ViewAction::SortFieldChanged(field) => sort.field = field,
            ViewAction::SortDirectionChanged(direction) => sort.direction = direction,
            ViewAction::SetPage(new_page) => page = new_page,
            ViewAction::Paginate {
                action,
                total_pages,
            } => page = action.apply(page, total_pages),
            ViewAction::Replace(state) => {
                self.state = Arc::new(ViewState::new(state.filters, state.sort, state.page));
                return self.state();
            }
        }

        if resets_page {
            page = 1;
        }

        self.state = Arc::new(ViewState::new(filters, sort, page));
        self.state()
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> Arc<ViewState> {
        self.apply(ViewAction::Search(search.into()))
    }

    pub fn toggle_type(&mut self, pokemon_type: PokemonType) -> Arc<ViewState> {
        self.apply(ViewAction::ToggleType(pokemon_type))
    }

    pub fn toggle_generation(&mut self, generation: Generation) -> Arc<ViewState> {
        self.apply(ViewAction::ToggleGeneration(generation))
    }

    pub fn toggle_ability(&mut self, ability: impl Into<String>) -> Arc<ViewState> {
        self.apply(ViewAction::ToggleAbility(ability.into()))
    }

    pub fn set_stat_range(&mut self, stat: StatName, range: StatRange) -> Arc<ViewState> {
        self.apply(ViewAction::SetStatRange(stat, range))
    }

    pub fn clear_filters(&mut self) -> Arc<ViewState> {
        self.apply(ViewAction::ClearFilters)
    }

    pub fn set_sort(&mut self, sort: SortOption) -> Arc<ViewState> {
        self.apply(ViewAction::SortFieldChanged(sort.field));
        self.apply(ViewAction::SortDirectionChanged(sort.direction))
    }

    pub fn set_page(&mut self, page: usize) -> Arc<ViewState> {
        self.apply(ViewAction::SetPage(page))
    }

    pub fn paginate(&mut self, action: PaginationAction, total_pages: usize) -> Arc<ViewState> {
        self.apply(ViewAction::Paginate {
            action,
            total_pages,
        })
    }
}

/// Abilities are matched by their lowercase PokéApi name
pub(crate) fn normalize_ability(ability: &str) -> String {
    ability.trim().to_lowercase()
}

fn toggle<T: Ord>(set: &mut std::collections::BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
