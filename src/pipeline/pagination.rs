// SPDX-License-Identifier: GPL-3.0-only

use crate::pipeline::{FilterCriteria, ListEntry, SortOption, filter_and_sort};

/// Identifies an action related to Pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationAction {
    Next,
    Back,
}

impl PaginationAction {
    /// The page this action leads to, kept within `1..=total_pages`
    pub fn apply(&self, page: usize, total_pages: usize) -> usize {
        match self {
            PaginationAction::Next => (page + 1).min(total_pages.max(1)),
            PaginationAction::Back => page.saturating_sub(1).max(1),
        }
    }
}

/// One page of a filtered and sorted list
#[derive(Debug, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Filters, sorts and cuts out page `page` (1-indexed) of `items`.
///
/// Out of range pages are not clamped, they just come back empty.
pub fn visible_slice<'a, T: ListEntry>(
    items: &'a [T],
    filters: &FilterCriteria,
    sort: &SortOption,
    page: usize,
    page_size: usize,
) -> PageSlice<'a, T> {
    let visible = filter_and_sort(items, filters, sort);
    let total_items = visible.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let page_items = match page.checked_sub(1) {
        Some(index) if page_size > 0 => visible
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        _ => Vec::new(),
    };

    PageSlice {
        items: page_items,
        page,
        page_size,
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}
