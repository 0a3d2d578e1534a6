// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use crate::{
    entities::StatName,
    pipeline::{ListEntry, StatRange},
};

/// Bounds used when nothing with stats is loaded; 255 is the highest base stat the games allow
const FALLBACK_RANGE: StatRange = StatRange { min: 0, max: 255 };

/// Lowest and highest value of every stat across the loaded collection.
///
/// These are the slider bounds of the stat filters. They describe what is
/// loaded right now, not what the API could return.
pub fn stat_bounds<T: ListEntry>(items: &[T]) -> BTreeMap<StatName, StatRange> {
    StatName::ALL
        .iter()
        .map(|stat| {
            let values = items.iter().filter_map(|item| item.stats().map(|s| s.get(*stat)));
            let range = values.fold(None, |range: Option<StatRange>, value| {
                Some(match range {
                    Some(r) => StatRange {
                        min: r.min.min(value),
                        max: r.max.max(value),
                    },
                    None => StatRange {
                        min: value,
                        max: value,
                    },
                })
            });
            (*stat, range.unwrap_or(FALLBACK_RANGE))
        })
        .collect()
}
