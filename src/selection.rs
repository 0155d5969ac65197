//! Roulette-wheel parent selection and reverse-weight bookkeeping.
//!
//! Parent selection over the elite uses a cumulative-sum walk against a
//! random draw scaled to the total weight. The weight table handed to the
//! walk is the elite's scores in *reverse* rank order: since lower scores
//! are better but the wheel favors larger values, reversing the table
//! gives the best candidates the largest weights.
//!
//! Two quirks of the walk are deliberate behavioral contracts, not bugs
//! to correct (see DESIGN.md):
//!
//! - The total weight is the sum of the *raw* elite scores, while the
//!   walk accumulates the *reversed* table. The sums are numerically
//!   equal, but the walk's band boundaries keep the historical skew:
//!   index 0 is selected only by a draw of exactly zero, and draws in the
//!   top band resolve to the last index.
//! - The walk counts accumulated terms rather than locating the covering
//!   band, which shifts every band up by one index.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning* (fitness-proportionate selection)

use crate::types::Score;
use rand::Rng;

/// Weighted-random index selection via cumulative-sum walk.
///
/// Draws a uniform value in `[0, total)` and accumulates `weights` in
/// index order until the running total reaches the draw; the number of
/// accumulated terms, clamped to the last valid index, is the selected
/// index.
///
/// When `total` is not positive (all-zero elite scores) the wheel is
/// undefined, and selection falls back to a uniform draw over the table
/// instead of dividing by zero. A NaN total takes the same fallback.
///
/// # Panics
/// Panics if `weights` is empty.
pub fn roulette<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "cannot select from an empty weight table");

    if !(total > 0.0) {
        return rng.random_range(0..weights.len());
    }
    walk(weights, rng.random_range(0.0..total))
}

/// The deterministic core of [`roulette`]: cumulative-sum walk for a
/// known draw.
fn walk(weights: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    let mut index = 0;
    while index < weights.len() && cumulative < draw {
        cumulative += weights[index];
        index += 1;
    }
    // Draws in the top band walk one past the table; clamp to the last index.
    index.min(weights.len() - 1)
}

/// Builds the reverse-weight table and total weight over the ranked
/// elite scores.
///
/// `reverse[len - 1 - i]` holds `scores[i]`, so the table is exactly the
/// elite scores back to front. The total is the sum of the raw scores.
pub(crate) fn elite_weights<S: Score>(elite_scores: &[S]) -> (Vec<f64>, f64) {
    let n = elite_scores.len();
    let mut reverse = vec![0.0; n];
    let mut total = 0.0;
    for (i, score) in elite_scores.iter().enumerate() {
        let value = score.to_f64();
        reverse[n - 1 - i] = value;
        total += value;
    }
    (reverse, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ---- Walk semantics ----

    #[test]
    fn test_walk_reference_vector() {
        // Cumulative sums 5, 8, 10: a draw of 4.9 consumes one term.
        assert_eq!(walk(&[5.0, 3.0, 2.0], 4.9), 1);
    }

    #[test]
    fn test_walk_zero_draw_selects_first() {
        assert_eq!(walk(&[5.0, 3.0, 2.0], 0.0), 0);
    }

    #[test]
    fn test_walk_band_boundaries() {
        // Bands are half-open at the bottom: (0, 5] -> 1, (5, 8] -> 2.
        assert_eq!(walk(&[5.0, 3.0, 2.0], 5.0), 1);
        assert_eq!(walk(&[5.0, 3.0, 2.0], 5.1), 2);
        assert_eq!(walk(&[5.0, 3.0, 2.0], 8.0), 2);
    }

    #[test]
    fn test_walk_top_band_clamps_to_last() {
        assert_eq!(walk(&[5.0, 3.0, 2.0], 9.9), 2);
    }

    #[test]
    fn test_walk_single_entry() {
        assert_eq!(walk(&[7.0], 0.0), 0);
        assert_eq!(walk(&[7.0], 6.9), 0);
    }

    // ---- Roulette ----

    #[test]
    fn test_roulette_in_bounds() {
        let weights = [4.0, 3.0, 2.0, 1.0];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            assert!(roulette(&weights, 10.0, &mut rng) < 4);
        }
    }

    #[test]
    fn test_roulette_favors_heavy_bands() {
        // With weights [8, 1, 1], draws in (0, 8] land on index 1, so the
        // walk's one-position shift makes index 1 the dominant outcome.
        let weights = [8.0, 1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 3];
        let n = 10_000;
        for _ in 0..n {
            counts[roulette(&weights, 10.0, &mut rng)] += 1;
        }
        assert!(
            counts[1] > 7000,
            "expected index 1 to dominate, got {counts:?}"
        );
        assert!(counts[0] < 10, "index 0 needs a draw of exactly zero: {counts:?}");
    }

    #[test]
    fn test_roulette_zero_total_is_uniform() {
        let weights = [0.0, 0.0, 0.0, 0.0];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[roulette(&weights, 0.0, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform fallback, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_nan_total_is_uniform() {
        let weights = [1.0, 2.0];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(roulette(&weights, f64::NAN, &mut rng) < 2);
        }
    }

    #[test]
    #[should_panic(expected = "empty weight table")]
    fn test_roulette_empty_panics() {
        let mut rng = StdRng::seed_from_u64(42);
        roulette(&[], 1.0, &mut rng);
    }

    // ---- Reverse-weight table ----

    #[test]
    fn test_elite_weights_reverses_scores() {
        let (reverse, total) = elite_weights(&[1.0f64, 2.0, 5.0]);
        assert_eq!(reverse, vec![5.0, 2.0, 1.0]);
        assert!((total - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_elite_weights_single() {
        let (reverse, total) = elite_weights(&[3.0f64]);
        assert_eq!(reverse, vec![3.0]);
        assert!((total - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_elite_weights_empty() {
        let (reverse, total) = elite_weights::<f64>(&[]);
        assert!(reverse.is_empty());
        assert_eq!(total, 0.0);
    }

    proptest! {
        #[test]
        fn prop_roulette_always_in_bounds(
            weights in proptest::collection::vec(0.0f64..100.0, 1..64),
            seed in any::<u64>(),
        ) {
            let total: f64 = weights.iter().sum();
            let mut rng = StdRng::seed_from_u64(seed);
            let idx = roulette(&weights, total, &mut rng);
            prop_assert!(idx < weights.len());
        }

        #[test]
        fn prop_elite_weights_total_matches_sum(
            scores in proptest::collection::vec(0.0f64..1000.0, 0..64),
        ) {
            let (reverse, total) = elite_weights(&scores);
            let sum: f64 = scores.iter().sum();
            prop_assert!((total - sum).abs() < 1e-9);
            for (i, &s) in scores.iter().enumerate() {
                prop_assert_eq!(reverse[scores.len() - 1 - i], s);
            }
        }
    }
}
