//! Random sampling helpers shared by the generators.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;

/// Weights for the `is_active` flag of courses, modules and lessons: two "active"
/// outcomes for every "inactive" one.
pub const ACTIVE_WEIGHTS: (u32, u32) = (2, 1);

/// Returns `true` with probability `weight_true / (weight_true + weight_false)`.
///
/// Two zero weights always yield `false`.
pub fn biased_boolean(rng: &mut impl Rng, weight_true: u32, weight_false: u32) -> bool {
    let total = weight_true.saturating_add(weight_false);
    if total == 0 {
        return false;
    }
    rng.gen_ratio(weight_true.min(total), total)
}

/// Draws the active flag using [`ACTIVE_WEIGHTS`].
pub fn active_flag(rng: &mut impl Rng) -> bool {
    biased_boolean(rng, ACTIVE_WEIGHTS.0, ACTIVE_WEIGHTS.1)
}

/// Picks a size from `size`, capped at the pool length, then samples that many
/// distinct items uniformly.
pub fn sample_distinct<T: Clone>(
    pool: &[T],
    size: RangeInclusive<usize>,
    rng: &mut impl Rng,
) -> Vec<T> {
    let k = rng.gen_range(size).min(pool.len());
    pool.choose_multiple(rng, k).cloned().collect()
}
