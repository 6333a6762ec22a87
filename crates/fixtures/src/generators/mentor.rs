//! Mentor attributes: specialization, experience and technology stack.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;

use academy::models::{Specialization, Technology};

use super::sampling::sample_distinct;

pub const EXPERIENCE_YEARS: RangeInclusive<i32> = 3..=15;

/// Final size of a mentor's technology set.
pub const MENTOR_TECHNOLOGIES: RangeInclusive<usize> = 2..=5;

/// Extra pool technologies mixed into a specialized mentor's relevant ones.
pub const ADDITIONAL_TECHNOLOGIES: RangeInclusive<usize> = 1..=3;

pub fn experience_years(rng: &mut impl Rng) -> i32 {
    rng.gen_range(EXPERIENCE_YEARS)
}

/// Picks a specialization uniformly with probability `rate`, otherwise none.
pub fn pick_specialization<'a>(
    specializations: &'a [Specialization],
    rate: f64,
    rng: &mut impl Rng,
) -> Option<&'a Specialization> {
    if specializations.is_empty() || !rng.gen_bool(rate) {
        return None;
    }
    specializations.choose(rng)
}

/// Builds the technology set of a mentor.
///
/// With relevant technologies (the mentor has a specialization), 1-3 random pool
/// technologies are added, the union is deduplicated by id, shuffled and cut to a
/// random size in [`MENTOR_TECHNOLOGIES`]. Without them, 2-5 technologies are sampled
/// straight from the pool.
pub fn mentor_technologies(
    relevant: &[Technology],
    pool: &[Technology],
    rng: &mut impl Rng,
) -> Vec<Technology> {
    if relevant.is_empty() {
        return sample_distinct(pool, MENTOR_TECHNOLOGIES, rng);
    }

    let additional = sample_distinct(pool, ADDITIONAL_TECHNOLOGIES, rng);

    let mut seen = HashSet::new();
    let mut union: Vec<Technology> = relevant
        .iter()
        .chain(additional.iter())
        .filter(|t| seen.insert(t.id))
        .cloned()
        .collect();

    union.shuffle(rng);
    union.truncate(rng.gen_range(MENTOR_TECHNOLOGIES));
    union
}
