use rand::seq::SliceRandom;
use rand::Rng;

/// Draw up to `count` elements from `pool`, uniformly at random and
/// without replacement.
///
/// Works on a copy: the pool itself is never reordered, so the same pool
/// can back several quota draws in one composition. A pool shorter than
/// `count` yields the whole pool shuffled; callers tolerate the
/// under-fill.
pub fn sample<T: Clone, R: Rng + ?Sized>(pool: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(count);
    drawn
}
