// SPDX-License-Identifier: GPL-3.0-only

//! Client-side filter -> sort -> paginate pipeline over an already loaded collection.
//!
//! Nothing in here mutates the source collection; every step borrows it and
//! produces a new derived view.

mod entry;
mod filters;
mod pagination;
mod sort;
mod stat_bounds;

pub use entry::ListEntry;
pub use filters::{FilterCriteria, StatRange};
pub use pagination::{PageSlice, PaginationAction, visible_slice};
pub use sort::{SortDirection, SortField, SortOption};
pub use stat_bounds::stat_bounds;

/// Every item passing `filters`, in `sort` order
pub fn filter_and_sort<'a, T: ListEntry>(
    items: &'a [T],
    filters: &FilterCriteria,
    sort: &SortOption,
) -> Vec<&'a T> {
    let mut visible: Vec<&T> = items.iter().filter(|item| filters.matches(*item)).collect();
    sort.sort(&mut visible);
    visible
}
