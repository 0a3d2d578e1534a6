// SPDX-License-Identifier: GPL-3.0-only

use dexplorer::{
    DexConfig, ViewAction, ViewController,
    entities::{Generation, PokemonType, StatName},
    pipeline::{PaginationAction, SortDirection, SortField, StatRange},
};
use pretty_assertions::assert_eq;
use reqwest::Url;

mod common;

fn page_url(query: &str) -> Url {
    Url::parse(&format!("https://dex.example/?{query}")).unwrap()
}

fn config() -> DexConfig {
    DexConfig {
        items_per_page: 4,
        ..Default::default()
    }
}

#[test]
fn shared_link_restores_the_same_view() {
    let dex = common::dex();
    let mut sender = ViewController::new(&config());
    sender.hydrate(&page_url(""));

    sender.dispatch(ViewAction::ToggleType(PokemonType::Water));
    sender.dispatch(ViewAction::ToggleType(PokemonType::Bug));
    sender.dispatch(ViewAction::SetStatRange(StatName::Hp, StatRange::new(0, 200)));
    sender.dispatch(ViewAction::SortFieldChanged(SortField::Name));
    let query = sender
        .dispatch(ViewAction::Paginate {
            action: PaginationAction::Next,
            total_pages: 2,
        })
        .unwrap();

    let mut receiver = ViewController::new(&config());
    receiver.hydrate(&page_url(&query));

    assert_eq!(*receiver.state(), *sender.state());
    let sent: Vec<i64> = sender.visible(&dex).items.iter().map(|p| p.id).collect();
    let received: Vec<i64> = receiver.visible(&dex).items.iter().map(|p| p.id).collect();
    assert_eq!(received, sent);
}

#[test]
fn early_click_survives_a_slow_url_parse() {
    let mut controller = ViewController::new(&config());

    // the user picks a generation before the page url was applied
    controller.dispatch(ViewAction::ToggleGeneration(Generation::Two));
    controller.dispatch(ViewAction::SortDirectionChanged(SortDirection::Desc));

    let query = controller.hydrate(&page_url("generations=1&sortDirection=asc&page=3"));

    let state = controller.state();
    assert!(state.filters().generations.contains(&Generation::One));
    assert!(state.filters().generations.contains(&Generation::Two));
    assert_eq!(state.sort().direction, SortDirection::Desc);
    // toggling a filter sends the view back to the first page
    assert_eq!(state.page(), 1);
    assert_eq!(query, "generations=1%2C2&sortDirection=desc");
}

#[test]
fn paging_through_a_filtered_list() {
    let dex = common::dex();
    let mut controller = ViewController::new(&config());
    controller.hydrate(&page_url("types=bug,fire,water"));

    let first = controller.visible(&dex);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 5, 6, 7]);

    let query = controller
        .dispatch(ViewAction::Paginate {
            action: PaginationAction::Next,
            total_pages: first.total_pages,
        })
        .unwrap();
    assert_eq!(query, "page=2&types=fire%2Cwater%2Cbug");

    let second = controller.visible(&dex);
    assert_eq!(second.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![8, 9, 10, 11]);
    assert!(second.has_prev);
    assert!(second.has_next);
}

#[test]
fn clearing_filters_cleans_the_url() {
    let mut controller = ViewController::new(&config());
    controller.hydrate(&page_url("search=mew&abilities=synchronize&page=2"));
    assert!(controller.state().has_active_filters());

    let query = controller.dispatch(ViewAction::ClearFilters).unwrap();

    assert_eq!(query, "");
    assert!(!controller.state().has_active_filters());
    assert_eq!(controller.url().map(Url::as_str), Some("https://dex.example/"));
}
