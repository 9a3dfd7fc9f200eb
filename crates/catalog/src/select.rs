//! Selection policies over an eligible subset.

use rand::Rng;
use rand::seq::IndexedRandom;

/// How many laptops the quiz returns.
pub const QUIZ_PICKS: usize = 3;

/// One item chosen uniformly at random, or `None` for an empty subset.
pub fn pick_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// The first `k` items in their existing order.
pub fn first_k<T>(items: &[T], k: usize) -> &[T] {
    &items[..k.min(items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn pick_one_from_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert!(pick_one(&empty, &mut rng).is_none());
    }

    #[test]
    fn pick_one_stays_within_subset_and_varies() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [10, 20, 30, 40];
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = *pick_one(&items, &mut rng).unwrap();
            assert!(items.contains(&picked));
            seen.insert(picked);
        }
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn same_seed_same_pick() {
        let items = ["a", "b", "c", "d", "e"];
        let a = pick_one(&items, &mut StdRng::seed_from_u64(9)).copied();
        let b = pick_one(&items, &mut StdRng::seed_from_u64(9)).copied();
        assert_eq!(a, b);
    }

    #[test]
    fn first_k_truncates_and_keeps_order() {
        assert_eq!(first_k(&[5, 3, 9, 1], QUIZ_PICKS), &[5, 3, 9]);
        assert_eq!(first_k(&[5], QUIZ_PICKS), &[5]);
        assert!(first_k::<u8>(&[], QUIZ_PICKS).is_empty());
    }
}
