// SPDX-License-Identifier: GPL-3.0-only

/// How many cards fit in a row of `container_width`, clamped to `1..=max_columns`.
///
/// Each card takes at least `min_card_width`, with `gap` between neighbouring cards.
pub fn grid_columns(
    container_width: f32,
    min_card_width: f32,
    gap: f32,
    max_columns: usize,
) -> usize {
    let max_columns = max_columns.max(1);
    let slot = min_card_width + gap;

    if !container_width.is_finite() || !slot.is_finite() || slot <= 0.0 {
        return 1;
    }

    let fits = ((container_width + gap) / slot).floor();
    if fits < 1.0 {
        1
    } else {
        (fits as usize).min(max_columns)
    }
}
