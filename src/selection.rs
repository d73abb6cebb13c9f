//! Uniform random selection of spin winners.

use rand::{Rng, seq::SliceRandom};

/// The most meals a single spin may return.
pub const MAX_MEAL_PICKS: usize = 5;

/// Clamp a requested meal count to `1..=MAX_MEAL_PICKS`.
///
/// A missing count means one meal.
pub fn meal_pick_count(requested: Option<i64>) -> usize {
    requested.unwrap_or(1).clamp(1, MAX_MEAL_PICKS as i64) as usize
}

/// Draw up to `count` items uniformly at random without replacement.
///
/// The order of the returned items is itself uniformly random. Fewer than
/// `count` items are returned when `items` is shorter than `count`.
pub fn pick_random<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let count = count.min(items.len());
    let mut candidates: Vec<&T> = items.iter().collect();
    let (picked, _) = candidates.partial_shuffle(rng, count);

    picked.iter().map(|&item| item.clone()).collect()
}

/// Draw a single item, or `None` if there is nothing to draw from.
pub fn pick_one<T, R>(items: &[T], rng: &mut R) -> Option<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    pick_random(items, 1, rng).into_iter().next()
}
