use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// Every call draws a fresh permutation from `rng`; nothing is cached between calls.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}
