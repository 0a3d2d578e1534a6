// SPDX-License-Identifier: GPL-3.0-only

//! Keeps the view state shareable through the page url.
//!
//! The url is read exactly once, when the page is opened. From then on the
//! state only flows the other way: every change is written back into the
//! query string and the url is never parsed again.

use std::sync::Arc;

use reqwest::Url;

use crate::{
    DexConfig,
    config::TypeFilteringMode,
    entities::{Generation, PokemonType, StatName},
    pipeline::{
        FilterCriteria, ListEntry, PageSlice, SortDirection, SortField, SortOption, StatRange,
    },
    store::{ViewAction, ViewState, ViewStore, normalize_ability},
};

const PAGE: &str = "page";
const SEARCH: &str = "search";
const TYPES: &str = "types";
const GENERATIONS: &str = "generations";
const ABILITIES: &str = "abilities";
const STATS: &str = "stats";
const SORT_FIELD: &str = "sortField";
const SORT_DIRECTION: &str = "sortDirection";

const VIEW_PARAMS: [&str; 8] = [
    PAGE,
    SEARCH,
    TYPES,
    GENERATIONS,
    ABILITIES,
    STATS,
    SORT_FIELD,
    SORT_DIRECTION,
];

/// Reads the view state out of `url`; anything missing or malformed keeps its default
pub fn state_from_url(url: &Url, type_mode: TypeFilteringMode) -> ViewState {
    let mut filters = FilterCriteria {
        type_mode,
        ..Default::default()
    };
    let mut sort = SortOption::default();
    let mut page = 1;

    for (key, value) in url.query_pairs() {
        match &*key {
            PAGE => match value.parse::<usize>() {
                Ok(number) if number > 0 => page = number,
                _ => tracing::debug!(%value, "ignoring malformed page"),
            },
            SEARCH => filters.search = value.into_owned(),
            TYPES => {
                filters.types = list(&value)
                    .filter_map(|name| {
                        let parsed = PokemonType::from_name(name);
                        if parsed.is_none() {
                            tracing::debug!(name, "ignoring unknown type");
                        }
                        parsed
                    })
                    .collect()
            }
            GENERATIONS => {
                filters.generations = list(&value).filter_map(parse_generation).collect()
            }
            ABILITIES => {
                filters.abilities = list(&value).map(normalize_ability).collect()
            }
            STATS => filters.stats = list(&value).filter_map(parse_stat_range).collect(),
            SORT_FIELD => match SortField::from_param(&value) {
                Some(field) => sort.field = field,
                None => tracing::debug!(%value, "ignoring unknown sort field"),
            },
            SORT_DIRECTION => match SortDirection::from_param(&value) {
                Some(direction) => sort.direction = direction,
                None => tracing::debug!(%value, "ignoring unknown sort direction"),
            },
            _ => {}
        }
    }

    ViewState::new(filters, sort, page)
}

/// Writes `state` into the query of `url`, leaving params that aren't ours untouched.
///
/// Values equal to their default are left out so an untouched view has a clean url.
pub fn write_state(url: &mut Url, state: &ViewState) {
    let foreign: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !VIEW_PARAMS.contains(&&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let pairs: Vec<(&str, String)> = state_params(state);

    if foreign.is_empty() && pairs.is_empty() {
        url.set_query(None);
        return;
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(foreign.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
}

fn state_params(state: &ViewState) -> Vec<(&'static str, String)> {
    let filters = state.filters();
    let sort = state.sort();
    let mut pairs = Vec::new();

    if state.page() > 1 {
        pairs.push((PAGE, state.page().to_string()));
    }
    if !filters.search.trim().is_empty() {
        pairs.push((SEARCH, filters.search.clone()));
    }
    if !filters.types.is_empty() {
        pairs.push((TYPES, join(filters.types.iter().map(|t| t.name().to_string()))));
    }
    let generations: Vec<String> = filters
        .generations
        .iter()
        .filter_map(|g| g.number().map(|n| n.to_string()))
        .collect();
    if !generations.is_empty() {
        pairs.push((GENERATIONS, generations.join(",")));
    }
    if !filters.abilities.is_empty() {
        pairs.push((ABILITIES, join(filters.abilities.iter().cloned())));
    }
    if !filters.stats.is_empty() {
        pairs.push((
            STATS,
            join(
                filters
                    .stats
                    .iter()
                    .map(|(stat, range)| format!("{}:{}-{}", stat.name(), range.min, range.max)),
            ),
        ));
    }
    if sort.field != SortField::default() {
        pairs.push((SORT_FIELD, sort.field.as_param().to_string()));
    }
    if sort.direction != SortDirection::default() {
        pairs.push((SORT_DIRECTION, sort.direction.as_param().to_string()));
    }

    pairs
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// `4` or `generation-iv`
fn parse_generation(value: &str) -> Option<Generation> {
    let generation = match value.parse::<u8>() {
        Ok(number) => Generation::from_number(number),
        Err(_) => Generation::from_name(value),
    };

    if generation == Generation::Unknown {
        tracing::debug!(value, "ignoring unknown generation");
        return None;
    }
    Some(generation)
}

/// `special-attack:10-200`
fn parse_stat_range(value: &str) -> Option<(StatName, StatRange)> {
    let parsed = value.split_once(':').and_then(|(stat, range)| {
        let stat = StatName::from_name(stat)?;
        let (min, max) = range.split_once('-')?;
        let range = StatRange::new(min.trim().parse().ok()?, max.trim().parse().ok()?);
        Some((stat, range))
    });

    if parsed.is_none() {
        tracing::debug!(value, "ignoring malformed stat range");
    }
    parsed
}

/// Owns the [`ViewStore`] and the page url, and orders url hydration before user actions.
///
/// Until [`ViewController::hydrate`] runs, dispatched actions are queued rather
/// than applied. Hydration applies the url first and then replays the queue, so
/// an early click is never overwritten by the url it raced with.
#[derive(Debug)]
pub struct ViewController {
    store: ViewStore,
    url: Option<Url>,
    pending: Vec<ViewAction>,
    type_mode: TypeFilteringMode,
    page_size: usize,
}

impl ViewController {
    pub fn new(config: &DexConfig) -> Self {
        let type_mode = config.type_filtering_mode;
        Self {
            store: ViewStore::new(ViewState::new(
                FilterCriteria {
                    type_mode,
                    ..Default::default()
                },
                SortOption::default(),
                1,
            )),
            url: None,
            pending: Vec::new(),
            type_mode,
            page_size: config.items_per_page,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.url.is_some()
    }

    /// Applies the page url, then every action queued before it.
    ///
    /// Only the first call has any effect.
    ///
    /// Returns the query string reflecting the resulting state.
    pub fn hydrate(&mut self, url: &Url) -> String {
        if let Some(current) = &self.url {
            tracing::warn!(%url, "view state already hydrated, ignoring url");
            return current.query().unwrap_or_default().to_string();
        }

        let state = state_from_url(url, self.type_mode);
        self.store.apply(ViewAction::Replace(state));

        let pending = std::mem::take(&mut self.pending);
        tracing::debug!(%url, replayed = pending.len(), "hydrated view state");
        for action in pending {
            // a toggle clicked before hydration meant "select", keep it selected
            if action.selects_existing(self.store.state().filters()) {
                continue;
            }
            self.store.apply(action);
        }

        let mut url = url.clone();
        write_state(&mut url, &self.store.state());
        let query = url.query().unwrap_or_default().to_string();
        self.url = Some(url);
        query
    }

    /// Applies `action` and returns the new query string, or `None` when it was queued for hydration
    pub fn dispatch(&mut self, action: ViewAction) -> Option<String> {
        let Some(url) = self.url.as_mut() else {
            tracing::trace!(?action, "queued until the url is hydrated");
            self.pending.push(action);
            return None;
        };

        let state = self.store.apply(action);
        write_state(url, &state);
        Some(url.query().unwrap_or_default().to_string())
    }

    pub fn state(&self) -> Arc<ViewState> {
        self.store.state()
    }

    /// The page url as last written, `None` before hydration
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn visible<'a, T: ListEntry>(&self, items: &'a [T]) -> PageSlice<'a, T> {
        self.store.state().visible(items, self.page_size)
    }
}
